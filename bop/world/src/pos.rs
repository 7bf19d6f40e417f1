use std::fmt;

/// Position of a block in the world. Measured in blocks, `y` is the altitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z }
    }

    /// Returns the position `n` blocks in `direction`
    pub fn offset_by(self, direction: Direction, n: i32) -> Self {
        let (dx, dy, dz) = direction.delta();
        BlockPos::new(self.x + dx * n, self.y + dy * n, self.z + dz * n)
    }

    pub fn offset(self, direction: Direction) -> Self {
        self.offset_by(direction, 1)
    }

    pub fn up(self) -> Self {
        self.offset(Direction::Up)
    }

    pub fn down(self) -> Self {
        self.offset(Direction::Down)
    }

    pub fn north(self) -> Self {
        self.offset(Direction::North)
    }

    pub fn south(self) -> Self {
        self.offset(Direction::South)
    }

    pub fn east(self) -> Self {
        self.offset(Direction::East)
    }

    pub fn west(self) -> Self {
        self.offset(Direction::West)
    }

    /// The four positions that share a face with this one and have the same altitude
    pub fn horizontal_neighbors(self) -> impl Iterator<Item = BlockPos> {
        Direction::HORIZONTAL
            .into_iter()
            .map(move |direction| self.offset(direction))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The six faces of a block
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub const HORIZONTAL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// North is towards negative z, east towards positive x
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}
