// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Ascent: from a record up to the top of its hierarchy.

use rustc_hash::FxHashSet;

use super::Hierarchy;
use crate::error::Result;
use crate::error::TreeError;
use crate::index::Entry;
use crate::record::Key;
use crate::record::Record;

/// Pending work for one key on the way up.
struct Climb<'h, T> {
    key: Key,
    /// Records carrying `key` as their id.
    matches: &'h [usize],
    next: usize,
    /// Finished chain for this key, root first.
    chain: Vec<T>,
}

impl<'a> Hierarchy<'a> {
    /// The records carrying `target` as their id, each preceded by its
    /// ancestors, root first.
    ///
    /// Duplicate ids each contribute their own chain, so a chain may repeat
    /// records. A literal record whose id is the root sentinel is included
    /// if some record points at it.
    pub fn ancestor_chain(&self, target: impl Into<Key>) -> Result<Vec<Record>> {
        return self.climb(target.into(), |position, entry| {
            return Some((self.cloned(position), entry.parent.clone()));
        });
    }

    /// The parent ids above `target`, root first, without the root
    /// sentinel.
    ///
    /// For a record with id 4 under 2 under 1 under the root this is
    /// `[1, 2]`.
    pub fn ancestor_id_chain(&self, target: impl Into<Key>) -> Result<Vec<Key>> {
        let root = &self.options.root;
        return self.climb(target.into(), |_, entry| {
            if entry.parent == *root {
                return None;
            }
            return Some((entry.parent.clone(), entry.parent.clone()));
        });
    }

    /// Walk upward from `target`. For every record carrying the current
    /// key, `pick` yields the item to emit and the key to climb to next,
    /// or `None` to ignore the record. Each match is appended to the chain
    /// of its key, then the chain of the next key is prepended.
    fn climb<T>(
        &self,
        target: Key,
        pick: impl Fn(usize, &Entry) -> Option<(T, Key)>,
    ) -> Result<Vec<T>> {
        let mut path = FxHashSet::default();
        path.insert(target.clone());
        let mut stack = vec![Climb {
            matches: self.index.with_id(&target),
            key: target,
            next: 0,
            chain: Vec::new(),
        }];

        loop {
            let Some(top) = stack.last_mut() else { return Ok(Vec::new()) };

            if let Some(&position) = top.matches.get(top.next) {
                top.next += 1;
                let Some(entry) = self.index.entry(position) else { continue };
                let Some((item, up)) = pick(position, entry) else { continue };
                top.chain.push(item);

                // `stack.len()` records are on the chain so far
                if stack.len() > self.options.max_depth {
                    tracing::debug!(from = %stack[0].key, "ancestor depth exceeded");
                    return Err(TreeError::DepthExceeded { limit: self.options.max_depth });
                }
                if !path.insert(up.clone()) {
                    tracing::debug!(from = %stack[0].key, at = %up, "ancestor cycle");
                    return Err(TreeError::CycleDetected(up));
                }
                stack.push(Climb {
                    matches: self.index.with_id(&up),
                    key: up,
                    next: 0,
                    chain: Vec::new(),
                });
                continue;
            }

            let Some(done) = stack.pop() else { return Ok(Vec::new()) };
            path.remove(&done.key);
            match stack.last_mut() {
                Some(below) => {
                    let mut chain = done.chain;
                    chain.append(&mut below.chain);
                    below.chain = chain;
                }
                None => return Ok(done.chain),
            }
        }
    }
}
