// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Grafting: one level of children onto top-level records.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::Hierarchy;
use crate::column::column;
use crate::column::sort_parallel;
use crate::options::ROOT_SENTINEL;
use crate::options::SortDirection;
use crate::record::Key;
use crate::record::Record;
use crate::record::push_child;

/// A record and its direct children.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Branch {
    pub record: Record,
    pub children: Vec<Record>,
}

impl<'a> Hierarchy<'a> {
    /// Top-level records (parent `0`) with their direct children grafted
    /// under `children_field`, sorted by id in `direction`.
    ///
    /// Only one level is grafted: a record whose parent is not a top-level
    /// id appears nowhere. When top-level ids repeat, the first wins.
    pub fn two_tier_merge(&self, direction: SortDirection, children_field: &str) -> Vec<Record> {
        return self.graft(direction, children_field, false);
    }

    /// `two_tier_merge` that first lifts grandchildren.
    ///
    /// Walking the sorted non-top records in order, a record whose parent is
    /// another non-top record takes over that record's current parent, and
    /// its output carries the rewritten parent field. Since earlier rewrites
    /// are visible to later ones, how far a deep record climbs depends on
    /// the sort order.
    pub fn two_tier_merge_regrafted(&self, direction: SortDirection, children_field: &str) -> Vec<Record> {
        return self.graft(direction, children_field, true);
    }

    fn graft(&self, direction: SortDirection, children_field: &str, regraft: bool) -> Vec<Record> {
        let root = Key::Int(ROOT_SENTINEL);
        let parent_field = self.options.parent_field.as_str();

        let mut roots: Vec<Record> = Vec::new();
        let mut root_slots: FxHashMap<&Key, usize> = FxHashMap::default();
        let mut rest: Vec<Record> = Vec::new();

        for (position, entry) in self.index.iter() {
            if entry.parent == root {
                root_slots.entry(&entry.id).or_insert(roots.len());
                roots.push(self.cloned(position));
            } else {
                rest.push(self.cloned(position));
            }
        }

        // indexed records carry both fields as keys, so the columns line up
        let mut ids = key_column(&rest, &self.options.id_field);
        let parents = key_column(&rest, parent_field);
        if ids.len() != rest.len() || parents.len() != rest.len() {
            return roots;
        }
        let mut pending: Vec<(Key, Record)> = parents.into_iter().zip(rest).collect();
        sort_parallel(&mut ids, &mut pending, direction);
        let (mut parents, mut grafted): (Vec<Key>, Vec<Record>) = pending.into_iter().unzip();

        if regraft {
            let mut first_at: FxHashMap<&Key, usize> = FxHashMap::default();
            for (slot, id) in ids.iter().enumerate() {
                first_at.entry(id).or_insert(slot);
            }
            for k in 0..grafted.len() {
                let Some(&slot) = first_at.get(&parents[k]) else { continue };
                parents[k] = parents[slot].clone();
                if let Some(raw) = grafted[slot].get(parent_field).cloned() {
                    grafted[k].insert(parent_field.to_string(), raw);
                }
            }
        }

        let mut attached = 0;
        for (record, parent) in grafted.into_iter().zip(parents.iter()) {
            if let Some(&slot) = root_slots.get(parent) {
                push_child(&mut roots[slot], children_field, record);
                attached += 1;
            }
        }

        tracing::debug!(roots = roots.len(), attached, regraft, "two tier merge");
        return roots;
    }

    /// Each direct child of `start` with its own direct children, in input
    /// order.
    pub fn direct_branches(&self, start: impl Into<Key>) -> Vec<Branch> {
        let start = start.into();
        return self.index
            .children_of(&start)
            .iter()
            .filter_map(|&position| {
                let entry = self.index.entry(position)?;
                let children = self.index
                    .children_of(&entry.id)
                    .iter()
                    .map(|&child| self.cloned(child))
                    .collect();
                return Some(Branch { record: self.cloned(position), children });
            })
            .collect();
    }

    /// Indexed records that no walk from the root sentinel reaches: those
    /// whose parent id exists nowhere, everything below them, and detached
    /// cycles. None of these appear in a nested view. Input order.
    pub fn collect_orphans(&self) -> Vec<&'a Record> {
        let mut reached = vec![false; self.index.len()];
        let mut seen: FxHashSet<&Key> = FxHashSet::default();
        seen.insert(&self.options.root);
        let mut pending = vec![&self.options.root];

        while let Some(key) = pending.pop() {
            for &position in self.index.children_of(key) {
                if reached[position] {
                    continue;
                }
                reached[position] = true;
                if let Some(entry) = self.index.entry(position) {
                    if seen.insert(&entry.id) {
                        pending.push(&entry.id);
                    }
                }
            }
        }

        let orphans: Vec<&'a Record> = self.index
            .iter()
            .filter(|(position, _)| !reached[*position])
            .map(|(position, _)| self.index.record(position))
            .collect();
        if !orphans.is_empty() {
            tracing::debug!(orphans = orphans.len(), "unreachable records");
        }
        return orphans;
    }
}

/// The `field` column of `records` as keys.
fn key_column(records: &[Record], field: &str) -> Vec<Key> {
    return column(records, field).iter().filter_map(Key::from_value).collect();
}
