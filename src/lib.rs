// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Arbor - hierarchical views over flat parent/child records.
//!
//! Records are JSON objects that name their own id and their parent's id.
//! A `Hierarchy` indexes a slice of them once and then answers queries:
//! nested trees, level-annotated lists, ancestor chains, descendant lists,
//! and a one-level "roots with children" merge.
//!
//! # Quick Start
//!
//! ```
//! use arbor::Hierarchy;
//! use arbor::Key;
//! use serde_json::json;
//!
//! let data: Vec<arbor::Record> = serde_json::from_value(json!([
//!     {"id": 1, "pid": 0},
//!     {"id": 2, "pid": 1},
//!     {"id": 3, "pid": 0},
//! ])).unwrap();
//!
//! let tree = Hierarchy::new(&data);
//! assert_eq!(tree.descendant_id_list(0).unwrap(), vec![Key::Int(1), Key::Int(2), Key::Int(3)]);
//! assert_eq!(tree.ancestor_id_chain(2).unwrap(), vec![Key::Int(1)]);
//!
//! let nested = tree.nested_tree(0, "child").unwrap();
//! assert_eq!(nested[0]["child"], json!([{"id": 2, "pid": 1}]));
//! ```
//!
//! Malformed input never panics: records missing a field are skipped and
//! reported through `Hierarchy::diagnostics`, and cycles fail with
//! `TreeError::CycleDetected`.

pub mod column;
pub mod error;
pub mod index;
pub mod options;
pub mod record;
pub mod tree;

pub use error::Diagnostic;
pub use error::Result;
pub use error::TreeError;
pub use options::Counting;
pub use options::RenderStyle;
pub use options::SortDirection;
pub use options::TreeOptions;
pub use record::Key;
pub use record::Record;
pub use tree::Branch;
pub use tree::Hierarchy;
pub use tree::Step;
