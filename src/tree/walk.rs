// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Depth-first descent over the parent index.
//!
//! `Descend` is an iterator of enter/leave events, so the flat and nested
//! builders share one traversal. It keeps its own stack rather than
//! recursing, and tracks the ids on the current path so a cycle surfaces
//! as an error instead of an endless walk.

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::error::TreeError;
use crate::index::HierarchyIndex;
use crate::record::Key;

/// One event of a depth-first walk.
///
/// `index` is the record's position in the input slice. `depth` is 0 for
/// children of the start key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Emitted before any of the record's descendants.
    Enter { index: usize, depth: usize },
    /// Emitted after all of the record's descendants.
    Leave { index: usize, depth: usize },
}

struct Frame<'h> {
    key: Key,
    /// The record this frame lists children for; `None` for the start key.
    node: Option<usize>,
    children: &'h [usize],
    next: usize,
}

pub struct Descend<'h> {
    index: &'h HierarchyIndex<'h>,
    stack: Vec<Frame<'h>>,
    path: FxHashSet<Key>,
    max_depth: usize,
    halted: bool,
}

impl<'h> Descend<'h> {
    pub(crate) fn new(index: &'h HierarchyIndex<'h>, start: Key, max_depth: usize) -> Descend<'h> {
        let mut path = FxHashSet::default();
        path.insert(start.clone());
        let root = Frame {
            children: index.children_of(&start),
            key: start,
            node: None,
            next: 0,
        };
        return Descend { index, stack: vec![root], path, max_depth, halted: false };
    }

    fn fail(&mut self, error: TreeError) -> Option<Result<Step>> {
        tracing::debug!(%error, "descent stopped");
        self.halted = true;
        return Some(Err(error));
    }
}

impl<'h> Iterator for Descend<'h> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Result<Step>> {
        if self.halted {
            return None;
        }

        let index = self.index;
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let frame = self.stack.last_mut()?;

            if let Some(&child) = frame.children.get(frame.next) {
                frame.next += 1;
                let Some(entry) = index.entry(child) else { continue };

                if depth >= self.max_depth {
                    return self.fail(TreeError::DepthExceeded { limit: self.max_depth });
                }
                if !self.path.insert(entry.id.clone()) {
                    return self.fail(TreeError::CycleDetected(entry.id.clone()));
                }

                self.stack.push(Frame {
                    key: entry.id.clone(),
                    node: Some(child),
                    children: index.children_of(&entry.id),
                    next: 0,
                });
                return Some(Ok(Step::Enter { index: child, depth }));
            }

            let done = self.stack.pop()?;
            self.path.remove(&done.key);
            if let Some(node) = done.node {
                // the start frame is still below us
                return Some(Ok(Step::Leave { index: node, depth: self.stack.len() - 1 }));
            }
        }
    }
}
