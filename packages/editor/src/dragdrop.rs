//! # Drag/Drop Controller
//!
//! Translates a continuous pointer drag into exactly one discrete mutation
//! at drop time.
//!
//! The drag is modelled as an explicit short-lived value object, not
//! scattered boolean flags. One transform (pointer position → candidate
//! insert index) feeds both the visual drop indicator and the eventual
//! mutation, so what the indicator promises is exactly what the drop
//! performs - the indicator and the splice cannot disagree.

use crate::Mutation;
use blockwork_document::{EntryId, LayoutDocument};
use tracing::warn;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A palette item: dropping inserts a new block of this type.
    NewFromCatalog { type_id: String },
    /// An existing canvas block: dropping reorders it.
    ExistingEntry { id: EntryId },
}

/// Vertical extent of one rendered block on the canvas, in canvas
/// coordinates. Supplied by the host UI on every drag-over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub height: f32,
}

impl RowBounds {
    fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Ephemeral state of one in-progress drag. Created on drag start,
/// consumed by [`DragSession::drop_on`] or [`DragSession::cancel`]; never
/// persisted. The document is not touched until drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    source: DragSource,
    candidate: Option<usize>,
}

impl DragSession {
    pub fn start(source: DragSource) -> Self {
        Self {
            source,
            candidate: None,
        }
    }

    pub fn source(&self) -> &DragSource {
        &self.source
    }

    /// Index the drop indicator should point at, `None` while the pointer
    /// is outside the canvas. Uses the same indexing convention as
    /// [`Mutation::InsertBlock`]: an index in `[0, len]` naming the
    /// boundary the block would land on.
    pub fn candidate_index(&self) -> Option<usize> {
        self.candidate
    }

    /// Recompute the candidate from the pointer position (potentially every
    /// frame). The candidate is the number of row midpoints above the
    /// pointer: nearest boundary between two blocks, start, or end. An
    /// empty canvas has no boundaries and always yields 0.
    pub fn update(&mut self, pointer_y: Option<f32>, rows: &[RowBounds]) {
        self.candidate =
            pointer_y.map(|y| rows.iter().filter(|row| row.midpoint() < y).count());
    }

    /// Consume the session and produce the mutation the drop performs, if
    /// any. `None` means no mutation: pointer outside any valid target,
    /// cancelled drag, or a drop on the dragged block's own position (which
    /// must not flip the dirty flag).
    pub fn drop_on(self, doc: &LayoutDocument) -> Option<Mutation> {
        let candidate = self.candidate?;
        match self.source {
            DragSource::NewFromCatalog { type_id } => {
                Some(Mutation::InsertBlock { type_id, at: candidate })
            }
            DragSource::ExistingEntry { id } => {
                let Some(from) = doc.index_of(&id) else {
                    warn!(%id, "dragged entry vanished before drop");
                    return None;
                };
                // The boundaries on either side of the dragged block are
                // its own position.
                if candidate == from || candidate == from + 1 {
                    return None;
                }
                // Removing the source shifts the boundaries after it down
                // by one.
                let to = if candidate > from { candidate - 1 } else { candidate };
                Some(Mutation::MoveBlock { from, to })
            }
        }
    }

    /// Discard the session with no mutation (escape, drop outside).
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<RowBounds> {
        // Blocks of height 100 stacked from 0: midpoints at 50, 150, ...
        (0..n)
            .map(|i| RowBounds {
                top: i as f32 * 100.0,
                height: 100.0,
            })
            .collect()
    }

    fn doc(n: usize) -> LayoutDocument {
        (0..n)
            .map(|i| {
                blockwork_document::ComponentEntry::new(
                    EntryId::new(format!("blk-{i}")),
                    "hero",
                    "plain",
                )
            })
            .collect()
    }

    fn catalog_drag() -> DragSession {
        DragSession::start(DragSource::NewFromCatalog {
            type_id: "hero".to_string(),
        })
    }

    #[test]
    fn empty_canvas_always_yields_index_zero() {
        let mut session = catalog_drag();
        session.update(Some(240.0), &[]);
        assert_eq!(session.candidate_index(), Some(0));
        assert_eq!(
            session.drop_on(&doc(0)),
            Some(Mutation::InsertBlock {
                type_id: "hero".to_string(),
                at: 0
            })
        );
    }

    #[test]
    fn candidate_is_nearest_boundary() {
        let rows = rows(3);
        let mut session = catalog_drag();

        session.update(Some(10.0), &rows);
        assert_eq!(session.candidate_index(), Some(0));

        session.update(Some(70.0), &rows);
        assert_eq!(session.candidate_index(), Some(1));

        session.update(Some(170.0), &rows);
        assert_eq!(session.candidate_index(), Some(2));

        // Below everything appends.
        session.update(Some(900.0), &rows);
        assert_eq!(session.candidate_index(), Some(3));
    }

    #[test]
    fn pointer_outside_canvas_clears_the_candidate() {
        let mut session = catalog_drag();
        session.update(Some(70.0), &rows(3));
        session.update(None, &rows(3));
        assert_eq!(session.candidate_index(), None);
        assert_eq!(session.drop_on(&doc(3)), None);
    }

    #[test]
    fn own_position_drop_is_not_a_mutation() {
        let doc = doc(3);
        for candidate in [1usize, 2] {
            let mut session = DragSession::start(DragSource::ExistingEntry {
                id: EntryId::new("blk-1"),
            });
            session.update(Some(candidate as f32 * 100.0 - 40.0), &rows(3));
            assert_eq!(session.candidate_index(), Some(candidate));
            assert_eq!(session.drop_on(&doc), None);
        }
    }

    #[test]
    fn move_down_adjusts_for_the_removed_source() {
        let doc = doc(3);
        let mut session = DragSession::start(DragSource::ExistingEntry {
            id: EntryId::new("blk-0"),
        });
        // Boundary below the last block: candidate 3, source at 0.
        session.update(Some(900.0), &rows(3));
        assert_eq!(
            session.drop_on(&doc),
            Some(Mutation::MoveBlock { from: 0, to: 2 })
        );
    }

    #[test]
    fn move_up_uses_the_candidate_unchanged() {
        let doc = doc(3);
        let mut session = DragSession::start(DragSource::ExistingEntry {
            id: EntryId::new("blk-2"),
        });
        session.update(Some(10.0), &rows(3));
        assert_eq!(
            session.drop_on(&doc),
            Some(Mutation::MoveBlock { from: 2, to: 0 })
        );
    }

    #[test]
    fn vanished_entry_drops_nothing() {
        let mut session = DragSession::start(DragSource::ExistingEntry {
            id: EntryId::new("ghost"),
        });
        session.update(Some(10.0), &rows(3));
        assert_eq!(session.drop_on(&doc(3)), None);
    }
}
