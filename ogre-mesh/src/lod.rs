//! Level-of-detail index chains keyed by submesh index

use hashbrown::HashMap;

use crate::buffer::SharedBuffer;

/// Submesh index → index buffers, finest first
///
/// Level 0 of every chain is the submesh's own index buffer; further levels
/// follow declaration order.
#[derive(Debug, Clone, Default)]
pub struct LodTable {
    chains: HashMap<usize, Vec<SharedBuffer>>,
}

impl LodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, submesh: usize) -> bool {
        self.chains.contains_key(&submesh)
    }

    /// Create the chain for `submesh` seeded with its full-resolution indices
    ///
    /// Does nothing when the chain already exists.
    pub fn ensure_chain(&mut self, submesh: usize, base: impl FnOnce() -> SharedBuffer) {
        self.chains.entry(submesh).or_insert_with(|| vec![base()]);
    }

    /// Append a coarser level to an existing chain
    pub fn push_level(&mut self, submesh: usize, level: SharedBuffer) {
        if let Some(chain) = self.chains.get_mut(&submesh) {
            chain.push(level);
        }
    }

    pub fn levels(&self, submesh: usize) -> Option<&[SharedBuffer]> {
        self.chains.get(&submesh).map(Vec::as_slice)
    }

    /// Chains sorted by submesh index
    pub fn chains(&self) -> Vec<(usize, &[SharedBuffer])> {
        let mut chains: Vec<_> = self
            .chains
            .iter()
            .map(|(&index, levels)| (index, levels.as_slice()))
            .collect();
        chains.sort_by_key(|(index, _)| *index);
        chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferKind, Format, TypedBuffer};
    use std::sync::Arc;

    fn indices(faces: i64) -> SharedBuffer {
        let mut buf = TypedBuffer::new(BufferKind::Index, faces, 3, Format::UnsignedShort).unwrap();
        buf.close();
        Arc::new(buf)
    }

    #[test]
    fn chain_is_seeded_once() {
        let mut table = LodTable::new();
        let base = indices(4);
        table.ensure_chain(1, || Arc::clone(&base));
        table.ensure_chain(1, || panic!("base requested twice"));

        table.push_level(1, indices(2));
        table.push_level(1, indices(1));

        let levels = table.levels(1).unwrap();
        assert_eq!(levels.len(), 3);
        assert!(Arc::ptr_eq(&levels[0], &base));
        assert_eq!(levels[2].capacity(), 3);
    }

    #[test]
    fn levels_without_chain_are_dropped() {
        let mut table = LodTable::new();
        table.push_level(0, indices(1));
        assert!(table.is_empty());
        assert!(!table.contains(0));
    }
}
