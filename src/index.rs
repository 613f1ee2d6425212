// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! One-pass index over a record slice.
//!
//! Every traversal asks the same two questions, "which records hang off
//! this key?" and "which records carry this id?". The index answers both
//! in O(1) and remembers input order so siblings come back in the order
//! the caller gave them.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Diagnostic;
use crate::options::TreeOptions;
use crate::record::Key;
use crate::record::Record;
use crate::record::key_of;

/// The two keys of an indexed record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub parent: Key,
    pub id: Key,
}

#[derive(Clone, Debug)]
pub struct HierarchyIndex<'a> {
    records: &'a [Record],
    /// Parallel to `records`; `None` for records missing a field.
    entries: Vec<Option<Entry>>,
    /// parent key -> positions of its children, in input order
    by_parent: FxHashMap<Key, SmallVec<[usize; 4]>>,
    /// id -> positions of records carrying it, in input order
    by_id: FxHashMap<Key, SmallVec<[usize; 1]>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> HierarchyIndex<'a> {
    pub fn build(records: &'a [Record], options: &TreeOptions) -> HierarchyIndex<'a> {
        let mut entries = Vec::with_capacity(records.len());
        let mut by_parent: FxHashMap<Key, SmallVec<[usize; 4]>> = FxHashMap::default();
        let mut by_id: FxHashMap<Key, SmallVec<[usize; 1]>> = FxHashMap::default();
        let mut diagnostics = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let parent = key_of(record, &options.parent_field);
            let id = key_of(record, &options.id_field);

            let (parent, id) = match (parent, id) {
                (Some(parent), Some(id)) => (parent, id),
                (parent, _) => {
                    let field = if parent.is_none() { &options.parent_field } else { &options.id_field };
                    diagnostics.push(Diagnostic::MissingField { position, field: field.clone() });
                    entries.push(None);
                    continue;
                }
            };

            let same_id = by_id.entry(id.clone()).or_default();
            if let Some(&first) = same_id.first() {
                diagnostics.push(Diagnostic::DuplicateId { id: id.clone(), first, duplicate: position });
            }
            same_id.push(position);

            by_parent.entry(parent.clone()).or_default().push(position);
            entries.push(Some(Entry { parent, id }));
        }

        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "hierarchy input");
        }

        return HierarchyIndex { records, entries, by_parent, by_id, diagnostics };
    }

    /// The record at `position` in the original slice.
    #[inline]
    pub fn record(&self, position: usize) -> &'a Record {
        return &self.records[position];
    }

    /// The keys of the record at `position`, if it was indexed.
    #[inline]
    pub fn entry(&self, position: usize) -> Option<&Entry> {
        return self.entries.get(position).and_then(Option::as_ref);
    }

    /// Positions of the records whose parent is `key`.
    #[inline]
    pub fn children_of(&self, key: &Key) -> &[usize] {
        return match self.by_parent.get(key) {
            Some(children) => children.as_slice(),
            None => &[],
        };
    }

    /// Positions of the records whose id is `key`.
    #[inline]
    pub fn with_id(&self, key: &Key) -> &[usize] {
        return match self.by_id.get(key) {
            Some(matches) => matches.as_slice(),
            None => &[],
        };
    }

    #[inline]
    pub fn contains_id(&self, key: &Key) -> bool {
        return self.by_id.contains_key(key);
    }

    /// Indexed positions with their keys, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Entry)> {
        return self.entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| entry.as_ref().map(|entry| (position, entry)));
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.records.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        return &self.diagnostics;
    }
}
