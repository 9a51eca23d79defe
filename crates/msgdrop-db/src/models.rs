//! Database row types. These map directly to SQLite rows and stay separate
//! from the msgdrop-types wire models.

use std::fmt;

use msgdrop_types::{MessageRecord, Priority, UserId};
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;

pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub token_hash: String,
    pub token_scheme: i64,
    pub created: String,
    pub activated: bool,
}

pub struct MessageRow {
    pub id: i64,
    pub user_id: UserId,
    pub date: String,
    pub topic: String,
    pub priority: Priority,
    pub details: Option<String>,
    pub archived: bool,
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        MessageRecord {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            topic: row.topic,
            priority: row.priority,
            details: row.details,
            archived: row.archived,
        }
    }
}

/// Credentials of a freshly created user. The raw token exists only here;
/// it is never written to the database or to logs.
pub struct IssuedToken {
    pub user_id: UserId,
    pub token: String,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Binds a `Priority` with its native SQLite storage class.
pub(crate) struct SqlPriority<'a>(pub &'a Priority);

impl ToSql for SqlPriority<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Priority::Int(v) => ToSqlOutput::from(*v),
            Priority::Real(v) => ToSqlOutput::from(*v),
            Priority::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

pub(crate) fn read_priority(row: &Row<'_>, idx: usize) -> rusqlite::Result<Priority> {
    match row.get_ref(idx)? {
        ValueRef::Integer(v) => Ok(Priority::Int(v)),
        ValueRef::Real(v) => Ok(Priority::Real(v)),
        ValueRef::Text(v) => Ok(Priority::Text(String::from_utf8_lossy(v).into_owned())),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "priority".to_string(),
            other.data_type(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_debug_hides_token() {
        let issued = IssuedToken {
            user_id: 4,
            token: "s3cr3t-token".into(),
        };
        let shown = format!("{:?}", issued);
        assert!(!shown.contains("s3cr3t-token"));
        assert!(shown.contains("user_id: 4"));
    }
}
