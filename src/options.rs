// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Options shared by every traversal.
//!
//! Both `TreeOptions` and `RenderStyle` deserialize with every field
//! defaulted, so a host can keep them in its own config file and only
//! spell out what differs.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::error::TreeError;
use crate::record::Key;

pub const DEFAULT_PARENT_FIELD: &str = "pid";
pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_CHILDREN_FIELD: &str = "child";
pub const DEFAULT_ITEMS_FIELD: &str = "items";
pub const DEFAULT_LEVEL_FIELD: &str = "lv";
pub const COUNT_FIELD: &str = "count";

/// Deep enough for any real category tree, shallow enough to stop a
/// runaway chain quickly.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Sentinel parent of top-level records in the two-tier merge.
pub const ROOT_SENTINEL: i64 = 0;

/// Order of the children grafted by the two-tier merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// When `descendant_list_with_counts` writes the `count` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counting {
    /// Only on records that have children.
    #[default]
    WhenNonEmpty,
    /// On every record, `0` for leaves.
    Always,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Field holding the parent reference.
    pub parent_field: String,
    /// Field holding the record's own id.
    pub id_field: String,
    /// Parent reference meaning "no parent".
    pub root: Key,
    /// Deepest level a traversal may reach before failing.
    pub max_depth: usize,
    pub counting: Counting,
}

impl Default for TreeOptions {
    fn default() -> Self {
        return TreeOptions {
            parent_field: DEFAULT_PARENT_FIELD.to_string(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            root: Key::Int(ROOT_SENTINEL),
            max_depth: DEFAULT_MAX_DEPTH,
            counting: Counting::default(),
        };
    }
}

impl TreeOptions {
    /// Load options from JSON, filling gaps with defaults.
    pub fn from_json(text: &str) -> Result<TreeOptions> {
        let options: TreeOptions = serde_json::from_str(text)?;
        options.validate()?;
        return Ok(options);
    }

    /// Check the options are usable.
    pub fn validate(&self) -> Result<()> {
        if self.parent_field.is_empty() || self.id_field.is_empty() {
            return Err(TreeError::InvalidOptions("field names must not be empty".into()));
        }
        if self.parent_field == self.id_field {
            return Err(TreeError::InvalidOptions(format!(
                "parent and id fields are both `{}`",
                self.id_field,
            )));
        }
        if self.max_depth == 0 {
            return Err(TreeError::InvalidOptions("max_depth must be at least 1".into()));
        }
        return Ok(());
    }

    pub fn with_fields(mut self, parent_field: &str, id_field: &str) -> TreeOptions {
        self.parent_field = parent_field.to_string();
        self.id_field = id_field.to_string();
        return self;
    }

    pub fn with_root(mut self, root: impl Into<Key>) -> TreeOptions {
        self.root = root.into();
        return self;
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> TreeOptions {
        self.max_depth = max_depth;
        return self;
    }

    pub fn with_counting(mut self, counting: Counting) -> TreeOptions {
        self.counting = counting;
        return self;
    }
}

/// How `rendered_merge` decorates each record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Field receiving the indent prefix.
    pub render_field: String,
    /// Repeated once per level of the record's parent.
    pub glyph: String,
    /// Field receiving the one-based level.
    pub level_field: String,
    pub start_level: i64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        return RenderStyle {
            render_field: "html".to_string(),
            glyph: "├─".to_string(),
            level_field: "level".to_string(),
            start_level: 0,
        };
    }
}

impl RenderStyle {
    /// The prefix is the glyph repeated once per level, so the start level
    /// may not exceed the depth a traversal is allowed to reach.
    pub fn validate(&self, max_depth: usize) -> Result<()> {
        let too_deep = usize::try_from(self.start_level).is_ok_and(|level| level > max_depth);
        if too_deep {
            return Err(TreeError::InvalidOptions(format!(
                "start_level {} is beyond max_depth {}",
                self.start_level, max_depth,
            )));
        }
        return Ok(());
    }
}
