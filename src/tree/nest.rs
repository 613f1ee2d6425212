// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Descent: everything below a start key, flat or nested.

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::Hierarchy;
use super::Step;
use crate::error::Result;
use crate::error::TreeError;
use crate::options::COUNT_FIELD;
use crate::options::Counting;
use crate::options::RenderStyle;
use crate::record::Key;
use crate::record::Record;

impl<'a> Hierarchy<'a> {
    /// Every record below `start`, pre-order, with `level_field` set to
    /// `start_level` for direct children and one more per level below.
    pub fn level_annotated_descendants(
        &self,
        start: impl Into<Key>,
        level_field: &str,
        start_level: i64,
    ) -> Result<Vec<Record>> {
        let start = start.into();
        let mut flat = Vec::new();
        for step in self.descend(&start) {
            if let Step::Enter { index, depth } = step? {
                let level = offset_level(start_level, depth, 0)?;
                let mut record = self.cloned(index);
                record.insert(level_field.to_string(), Value::from(level));
                flat.push(record);
            }
        }
        tracing::debug!(%start, emitted = flat.len(), "level annotated descendants");
        return Ok(flat);
    }

    /// Like `level_annotated_descendants`, decorated for display.
    ///
    /// A record whose parent sits at depth `d` gets level `d + 1` and the
    /// glyph repeated `d` times, so the prefix is one step shallower than
    /// the level. Depths count from `style.start_level`.
    pub fn rendered_merge(&self, start: impl Into<Key>, style: &RenderStyle) -> Result<Vec<Record>> {
        style.validate(self.options.max_depth)?;
        let start = start.into();
        let mut flat = Vec::new();
        for step in self.descend(&start) {
            if let Step::Enter { index, depth } = step? {
                let parent_depth = offset_level(style.start_level, depth, 0)?;
                let level = offset_level(style.start_level, depth, 1)?;
                let mut record = self.cloned(index);
                record.insert(style.level_field.clone(), Value::from(level));
                record.insert(
                    style.render_field.clone(),
                    Value::from(style.glyph.repeat(parent_depth.max(0) as usize)),
                );
                flat.push(record);
            }
        }
        tracing::debug!(%start, emitted = flat.len(), "rendered merge");
        return Ok(flat);
    }

    /// Every record below `start` as a tree: each record with children
    /// carries them under `children_field`.
    pub fn nested_tree(&self, start: impl Into<Key>, children_field: &str) -> Result<Vec<Record>> {
        return self.nest(start.into(), |record, children| {
            if !children.is_empty() {
                record.insert(children_field.to_string(), into_array(children));
            }
        });
    }

    /// `nested_tree` that also records how many direct children each
    /// record has under `count`.
    ///
    /// With `Counting::WhenNonEmpty` leaves get neither field; with
    /// `Counting::Always` they get `count: 0`.
    pub fn descendant_list_with_counts(
        &self,
        start: impl Into<Key>,
        children_field: &str,
    ) -> Result<Vec<Record>> {
        let counting = self.options.counting;
        return self.nest(start.into(), |record, children| {
            if counting == Counting::Always || !children.is_empty() {
                record.insert(COUNT_FIELD.to_string(), Value::from(children.len()));
            }
            if !children.is_empty() {
                record.insert(children_field.to_string(), into_array(children));
            }
        });
    }

    /// Nested tree over the records de-duplicated by id.
    ///
    /// When several records share an id the last one wins, in the position
    /// of the first. Children go under `children_field` (`"items"` by
    /// convention).
    pub fn linked_tree(&self, start: impl Into<Key>, children_field: &str) -> Result<Vec<Record>> {
        let mut slots: FxHashMap<&Key, usize> = FxHashMap::default();
        let mut unique: Vec<Record> = Vec::new();
        for (position, entry) in self.index.iter() {
            let record = self.cloned(position);
            match slots.get(&entry.id) {
                Some(&slot) => unique[slot] = record,
                None => {
                    slots.insert(&entry.id, unique.len());
                    unique.push(record);
                }
            }
        }

        let linked = Hierarchy::build(&unique, self.options.clone());
        return linked.nested_tree(start, children_field);
    }

    /// Ids of every record below `start`, pre-order.
    pub fn descendant_id_list(&self, start: impl Into<Key>) -> Result<Vec<Key>> {
        let mut ids = Vec::new();
        for step in self.descend(start) {
            if let Step::Enter { index, .. } = step? {
                if let Some(entry) = self.index.entry(index) {
                    ids.push(entry.id.clone());
                }
            }
        }
        return Ok(ids);
    }

    /// Every record below `start`, pre-order, unmodified.
    pub fn descendant_list(&self, start: impl Into<Key>) -> Result<Vec<Record>> {
        let mut flat = Vec::new();
        for step in self.descend(start) {
            if let Step::Enter { index, .. } = step? {
                flat.push(self.cloned(index));
            }
        }
        return Ok(flat);
    }

    /// Build the tree below `start` bottom-up. `attach` receives each
    /// record together with its finished children.
    fn nest(&self, start: Key, attach: impl Fn(&mut Record, Vec<Record>)) -> Result<Vec<Record>> {
        // one list of finished siblings per open level
        let mut levels: Vec<Vec<Record>> = vec![Vec::new()];
        for step in self.descend(&start) {
            match step? {
                Step::Enter { .. } => levels.push(Vec::new()),
                Step::Leave { index, .. } => {
                    let children = levels.pop().unwrap_or_default();
                    let mut record = self.cloned(index);
                    attach(&mut record, children);
                    if let Some(siblings) = levels.last_mut() {
                        siblings.push(record);
                    }
                }
            }
        }
        let roots = levels.pop().unwrap_or_default();
        tracing::debug!(%start, roots = roots.len(), "nested");
        return Ok(roots);
    }
}

fn into_array(records: Vec<Record>) -> Value {
    return Value::Array(records.into_iter().map(Value::Object).collect());
}

/// `start + depth + extra`, failing instead of wrapping.
fn offset_level(start: i64, depth: usize, extra: i64) -> Result<i64> {
    return i64::try_from(depth)
        .ok()
        .and_then(|depth| start.checked_add(depth))
        .and_then(|level| level.checked_add(extra))
        .ok_or_else(|| TreeError::InvalidOptions(format!("level {start} overflows at depth {depth}")));
}
