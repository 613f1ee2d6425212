// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Hierarchical views over flat parent/child records.
//!
//! A `Hierarchy` borrows the caller's records, indexes them once, and
//! answers every query from that index. Nothing is cached between calls
//! and the input is never modified: every view is built from clones.
//!
//! The views fall into three groups:
//!
//! - Descent (`nest`): level-annotated lists, nested trees, descendant
//!   lists, all depth-first pre-order in input order.
//! - Ascent (`ancestors`): ancestor chains, root first.
//! - Grafting (`merge`): the two-tier merge, direct branches, orphans.
//!
//! Every traversal is iterative. Cycles fail with
//! `TreeError::CycleDetected` and runaway depth with
//! `TreeError::DepthExceeded`.

mod ancestors;
mod merge;
mod nest;
pub mod walk;

pub use merge::Branch;
pub use walk::Descend;
pub use walk::Step;

use crate::error::Diagnostic;
use crate::error::Result;
use crate::index::HierarchyIndex;
use crate::options::TreeOptions;
use crate::record::Key;
use crate::record::Record;

/// An indexed view of a record slice.
#[derive(Clone, Debug)]
pub struct Hierarchy<'a> {
    index: HierarchyIndex<'a>,
    options: TreeOptions,
}

impl<'a> Hierarchy<'a> {
    /// Index `records` with the default `pid`/`id` fields.
    pub fn new(records: &'a [Record]) -> Hierarchy<'a> {
        return Hierarchy::build(records, TreeOptions::default());
    }

    /// Index `records` with custom options, rejecting unusable ones.
    pub fn with_options(records: &'a [Record], options: TreeOptions) -> Result<Hierarchy<'a>> {
        options.validate()?;
        return Ok(Hierarchy::build(records, options));
    }

    /// Index `records` with options already known to be valid.
    pub(crate) fn build(records: &'a [Record], options: TreeOptions) -> Hierarchy<'a> {
        let index = HierarchyIndex::build(records, &options);
        tracing::debug!(
            records = records.len(),
            diagnostics = index.diagnostics().len(),
            parent_field = %options.parent_field,
            id_field = %options.id_field,
            "indexed hierarchy",
        );
        return Hierarchy { index, options };
    }

    #[inline]
    pub fn options(&self) -> &TreeOptions {
        return &self.options;
    }

    /// Findings collected while indexing: skipped records, duplicate ids.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        return self.index.diagnostics();
    }

    /// Number of records given, including skipped ones.
    #[inline]
    pub fn len(&self) -> usize {
        return self.index.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.index.is_empty();
    }

    /// Walk everything below `start`, depth-first.
    pub fn descend(&self, start: impl Into<Key>) -> Descend<'_> {
        return Descend::new(&self.index, start.into(), self.options.max_depth);
    }

    /// A clone of the record at `position`.
    fn cloned(&self, position: usize) -> Record {
        return self.index.record(position).clone();
    }
}
