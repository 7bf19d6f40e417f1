use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use bop_common::Ident;
use smol_str::SmolStr;

use crate::{BlockClassId, Material, SustainsPlantType};

/// The namespace of names which do not specify one
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identifies a block in a [`crate::BlockRegistry`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) u16);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A namespaced name like `minecraft:sand`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName {
    pub namespace: SmolStr,
    pub path: SmolStr,
}

impl ResourceName {
    pub fn new(namespace: impl Into<SmolStr>, path: impl Into<SmolStr>) -> Self {
        ResourceName {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parses `namespace:path`, a bare `path` lives in [`DEFAULT_NAMESPACE`]
    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((namespace, path)) => ResourceName::new(namespace, path),
            None => ResourceName::new(DEFAULT_NAMESPACE, value),
        }
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// The value of a block state property
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Int(i32),
    Bool(bool),
    Name(SmolStr),
}

impl PropertyValue {
    /// The lowercase text queries compare against
    pub fn as_query_string(&self) -> SmolStr {
        match self {
            PropertyValue::Int(value) => value.to_string().into(),
            PropertyValue::Bool(value) => value.to_string().into(),
            PropertyValue::Name(value) => value.to_lowercase().into(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_query_string())
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Name(value.into())
    }
}

/// Static description of a block
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub name: ResourceName,
    pub class: BlockClassId,
    pub material: Material,
    /// Negative hardness marks unbreakable blocks
    pub hardness: f32,
    /// Whether the top face is a full solid face
    pub solid_top: bool,
    /// The declared properties together with their default values
    pub properties: Vec<(Ident, PropertyValue)>,
    pub plant_capability: Option<Arc<dyn SustainsPlantType>>,
}

impl BlockDef {
    pub fn new(name: ResourceName, class: BlockClassId, material: Material) -> Self {
        BlockDef {
            name,
            class,
            material,
            hardness: 0.0,
            solid_top: false,
            properties: Vec::new(),
            plant_capability: None,
        }
    }

    pub fn with_hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    pub fn with_solid_top(mut self) -> Self {
        self.solid_top = true;
        self
    }

    pub fn with_property(mut self, name: &str, default: impl Into<PropertyValue>) -> Self {
        self.properties.push((Ident::new(name), default.into()));
        self
    }

    pub fn with_plant_capability(mut self, capability: Arc<dyn SustainsPlantType>) -> Self {
        self.plant_capability = Some(capability);
        self
    }

    pub fn is_breakable(&self) -> bool {
        self.hardness >= 0.0
    }
}

/// A block together with concrete values for its properties
///
/// States compare equal when they agree on the block and on every property,
/// regardless of property order and case.
#[derive(Clone, Debug)]
pub struct BlockState {
    pub block: BlockId,
    pub properties: Vec<(Ident, PropertyValue)>,
}

impl BlockState {
    pub fn new(block: BlockId) -> Self {
        BlockState {
            block,
            properties: Vec::new(),
        }
    }

    /// Sets `name` to `value`, adding the property if the state does not have it yet
    pub fn with(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        let value = value.into();
        match self
            .properties
            .iter_mut()
            .find(|(property, _)| property.eq_ignore_case(name))
        {
            Some((_, old)) => *old = value,
            None => self.properties.push((Ident::new(name), value)),
        }
        self
    }

    /// Looks a property up, ignoring case
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(property, _)| property.eq_ignore_case(name))
            .map(|(_, value)| value)
    }

    /// The properties as queries see them, sorted by name
    fn canonical_properties(&self) -> Vec<(SmolStr, SmolStr)> {
        let mut properties: Vec<_> = self
            .properties
            .iter()
            .map(|(name, value)| {
                (
                    SmolStr::from(name.as_str().to_lowercase()),
                    value.as_query_string(),
                )
            })
            .collect();
        properties.sort_unstable();
        properties
    }
}

impl PartialEq for BlockState {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block
            && self.properties.len() == other.properties.len()
            && self.canonical_properties() == other.canonical_properties()
    }
}

impl Eq for BlockState {}

impl Hash for BlockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block.hash(state);
        self.canonical_properties().hash(state);
    }
}
