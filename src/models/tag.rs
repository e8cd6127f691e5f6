use serde::{Deserialize, Serialize};

/// Colour the backend assigns when a new tag has none
pub const DEFAULT_TAG_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub tag_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagInput {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagResponse {
    pub success: bool,
    pub tag_id: Option<i64>,
}
