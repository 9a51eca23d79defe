use serde::{Deserialize, Serialize};

/// Surrogate key of a row in the `user` table.
pub type UserId = i64;

/// Message priority as supplied by the client.
///
/// Opaque on purpose: the store keeps whatever JSON scalar it was given and
/// hands the same scalar back. No ordering is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Int(i64),
    Real(f64),
    Text(String),
}

/// A stored message as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub user_id: UserId,
    pub date: String,
    pub topic: String,
    pub priority: Priority,
    pub details: Option<String>,
    pub archived: bool,
}
