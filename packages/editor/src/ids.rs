//! Entry id allocation.

use blockwork_document::{EntryId, LayoutDocument};

/// Allocates entry ids for one page slot.
///
/// The counter only ever increments, so an id is never reused within an
/// editing session even after the entry holding it is deleted - reuse
/// would let the canvas reconcile a new block against a dead one. Ids
/// already present in a fetched document are skipped over.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self, doc: &LayoutDocument) -> EntryId {
        loop {
            let candidate = EntryId::new(format!("blk-{}", self.next));
            self.next += 1;
            if !doc.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwork_document::ComponentEntry;

    #[test]
    fn skips_ids_already_in_the_document() {
        let doc = LayoutDocument::from_entries(vec![ComponentEntry::new(
            EntryId::new("blk-1"),
            "hero",
            "plain",
        )])
        .unwrap();
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(&doc), EntryId::new("blk-2"));
    }

    #[test]
    fn never_hands_out_the_same_id_twice() {
        let empty = LayoutDocument::new();
        let mut ids = IdAllocator::new();
        let first = ids.allocate(&empty);
        // Even though the first id was never inserted (or was deleted), the
        // allocator does not go back.
        let second = ids.allocate(&empty);
        assert_ne!(first, second);
    }
}
