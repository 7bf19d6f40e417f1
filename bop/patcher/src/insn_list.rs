use std::ops::Range;

use bop_error::{PatchError, PatchResult};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::insn::{Insn, Label};

/// The instructions of a method body
///
/// Every label occurs at most once and every jump targets a label of the same
/// list. Edits which would break this are rejected and leave the list unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsnList {
    insns: Vec<Insn>,
}

impl InsnList {
    /// Creates a list from `insns` and checks the label invariants
    pub fn new(insns: Vec<Insn>) -> PatchResult<Self> {
        validate(&insns)?;
        Ok(InsnList { insns })
    }

    /// Checks that every label occurs once and that every jump target exists
    pub fn validate(&self) -> PatchResult<()> {
        validate(&self.insns)
    }

    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Insn> {
        self.insns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Insn> {
        self.insns.iter()
    }

    pub fn as_slice(&self) -> &[Insn] {
        &self.insns
    }

    /// Returns the index of the first instruction at or after `from` that matches `predicate`
    pub fn find(&self, from: usize, predicate: impl Fn(&Insn) -> bool) -> Option<usize> {
        self.insns
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, insn)| predicate(insn))
            .map(|(index, _)| index)
    }

    /// Returns the first non-`None` result of `f`, which receives every instruction with its index
    pub fn find_map<T>(&self, mut f: impl FnMut(usize, &Insn) -> Option<T>) -> Option<T> {
        self.insns
            .iter()
            .enumerate()
            .find_map(|(index, insn)| f(index, insn))
    }

    /// Returns a label which does not occur in this list yet.
    /// The label still has to be inserted.
    pub fn new_label(&self) -> Label {
        let next = self
            .insns
            .iter()
            .filter_map(|insn| match insn {
                Insn::Label(label) => Some(label.0),
                Insn::Jump { target, .. } => Some(target.0),
                _ => None,
            })
            .max()
            .map_or(0, |max| max + 1);
        Label(next)
    }

    /// Inserts `insns` so that the first of them ends up at `index`
    pub fn insert_before(
        &mut self,
        index: usize,
        insns: impl IntoIterator<Item = Insn>,
    ) -> PatchResult<()> {
        if index > self.insns.len() {
            return Err(PatchError::InvalidIndex {
                index,
                len: self.insns.len(),
            });
        }

        let insns: Vec<_> = insns.into_iter().collect();
        let mut candidate = Vec::with_capacity(self.insns.len() + insns.len());
        candidate.extend_from_slice(&self.insns[..index]);
        candidate.extend(insns);
        candidate.extend_from_slice(&self.insns[index..]);
        validate(&candidate)?;

        self.insns = candidate;
        Ok(())
    }

    /// Removes the instruction at `index`
    pub fn remove(&mut self, index: usize) -> PatchResult<Insn> {
        if index >= self.insns.len() {
            return Err(PatchError::InvalidIndex {
                index,
                len: self.insns.len(),
            });
        }
        let mut removed = self.remove_range(index..index + 1)?;
        Ok(removed.remove(0))
    }

    /// Removes the instructions in `range`
    ///
    /// Fails if a removed label is the target of a jump outside of `range`.
    pub fn remove_range(&mut self, range: Range<usize>) -> PatchResult<Vec<Insn>> {
        if range.start > range.end || range.end > self.insns.len() {
            return Err(PatchError::InvalidIndex {
                index: range.end.max(range.start),
                len: self.insns.len(),
            });
        }

        let removed_labels: FxHashSet<Label> = self.insns[range.clone()]
            .iter()
            .filter_map(|insn| match insn {
                Insn::Label(label) => Some(*label),
                _ => None,
            })
            .collect();
        let dangling = self
            .insns
            .iter()
            .enumerate()
            .filter(|(index, _)| !range.contains(index))
            .filter_map(|(_, insn)| insn.jump_target())
            .find(|target| removed_labels.contains(target));
        if let Some(label) = dangling {
            return Err(PatchError::DanglingLabel { label: label.0 });
        }

        Ok(self.insns.drain(range).collect())
    }

    pub fn into_vec(self) -> Vec<Insn> {
        self.insns
    }

    /// Returns the bytecode offset of every label
    pub fn label_offsets(&self) -> FxHashMap<Label, u32> {
        let mut offsets = FxHashMap::default();
        let mut offset = 0u32;
        for insn in &self.insns {
            if let Insn::Label(label) = insn {
                offsets.insert(*label, offset);
            }
            offset = offset.saturating_add(insn.size());
        }
        offsets
    }
}

fn validate(insns: &[Insn]) -> PatchResult<()> {
    let mut labels = FxHashSet::default();
    for insn in insns {
        if let Insn::Label(label) = insn {
            if !labels.insert(*label) {
                return Err(PatchError::DuplicateLabel { label: label.0 });
            }
        }
    }

    match insns
        .iter()
        .filter_map(Insn::jump_target)
        .find(|target| !labels.contains(target))
    {
        Some(label) => Err(PatchError::DanglingLabel { label: label.0 }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use bop_error::PatchError;

    use super::InsnList;
    use crate::insn::{Insn, JumpOp, Label};

    fn load(slot: u8) -> Insn {
        Insn::Other {
            opcode: 0x19,
            operands: vec![slot],
        }
    }

    fn jump(target: u32) -> Insn {
        Insn::Jump {
            op: JumpOp::IfEq,
            target: Label(target),
        }
    }

    fn list() -> InsnList {
        InsnList::new(vec![
            load(0),
            jump(1),
            load(1),
            Insn::Label(Label(1)),
            Insn::Other {
                opcode: 0xb1,
                operands: Vec::new(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn rejects_inconsistent_lists() {
        assert_eq!(
            InsnList::new(vec![jump(3)]),
            Err(PatchError::DanglingLabel { label: 3 })
        );
        assert_eq!(
            InsnList::new(vec![Insn::Label(Label(0)), Insn::Label(Label(0))]),
            Err(PatchError::DuplicateLabel { label: 0 })
        );
    }

    #[test]
    fn find_and_find_map() {
        let list = list();
        assert_eq!(list.find(0, |insn| insn.jump_target().is_some()), Some(1));
        assert_eq!(list.find(2, |insn| insn.jump_target().is_some()), None);
        assert_eq!(
            list.find_map(|index, insn| insn.jump_target().map(|label| (index, label))),
            Some((1, Label(1)))
        );
        assert_eq!(list.new_label(), Label(2));
    }

    #[test]
    fn edits_keep_labels_consistent() {
        let mut list = list();
        assert_eq!(
            list.insert_before(0, [jump(7)]),
            Err(PatchError::DanglingLabel { label: 7 })
        );
        assert_eq!(
            list.insert_before(0, [Insn::Label(Label(1))]),
            Err(PatchError::DuplicateLabel { label: 1 })
        );
        assert_eq!(
            list.insert_before(9, [load(2)]),
            Err(PatchError::InvalidIndex { index: 9, len: 5 })
        );
        assert_eq!(list.remove(3), Err(PatchError::DanglingLabel { label: 1 }));
        assert_eq!(
            list.remove(5),
            Err(PatchError::InvalidIndex { index: 5, len: 5 })
        );
        assert_eq!(
            list.remove(usize::MAX),
            Err(PatchError::InvalidIndex {
                index: usize::MAX,
                len: 5
            })
        );
        assert_eq!(list, self::list());

        let label = list.new_label();
        list.insert_before(0, [Insn::Label(label), jump(label.0)])
            .unwrap();
        assert_eq!(list.len(), 7);

        // A label can go together with the jumps to it
        list.remove_range(2..6).unwrap();
        assert_eq!(list.len(), 3);
        list.validate().unwrap();
    }

    #[test]
    fn offsets_skip_labels() {
        let offsets = list().label_offsets();
        assert_eq!(offsets[&Label(1)], 2 + 3 + 2);
    }
}
