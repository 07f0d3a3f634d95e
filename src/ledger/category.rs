use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PLACEHOLDER_NAME: &str = "Uncategorized";
pub const PLACEHOLDER_COLOR: &str = "#9e9e9e";

/// Categorises ledger activity for reporting. Transactions reference categories
/// by id only, so a category may disappear while entries still point at it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            kind,
        }
    }

    /// Stand-in used when an entry references a category that no longer exists.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: PLACEHOLDER_NAME.into(),
            color: PLACEHOLDER_COLOR.into(),
            kind: CategoryKind::Transaction,
        }
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Transaction,
    Savings,
}
