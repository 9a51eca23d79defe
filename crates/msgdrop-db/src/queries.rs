use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, ffi};

use msgdrop_types::UserId;

use crate::Database;
use crate::models::{MessageRow, SqlPriority, UserRow, read_priority};

impl Database {
    // -- Users --

    pub fn get_user_by_name(&self, name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_name(conn, name))
    }

    pub fn get_user_by_id(&self, id: UserId) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM user", [], |r| r.get(0))?))
    }
}

const USER_COLUMNS: &str = "id, name, token_hash, token_scheme, created, activated";

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        token_hash: row.get(2)?,
        token_scheme: row.get(3)?,
        created: row.get(4)?,
        activated: row.get(5)?,
    })
}

pub(crate) fn query_user_by_name(conn: &Connection, name: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE name = ?1"))?;
    Ok(stmt.query_row([name], map_user).optional()?)
}

pub(crate) fn query_user_by_id(conn: &Connection, id: UserId) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub(crate) fn query_user_by_token_hash(conn: &Connection, token_hash: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE token_hash = ?1"))?;
    Ok(stmt.query_row([token_hash], map_user).optional()?)
}

/// Insert a user row. Returns `Ok(None)` when the name is already taken;
/// the failed statement leaves no row behind.
pub(crate) fn insert_user(
    conn: &Connection,
    name: &str,
    token_hash: &str,
    scheme: i64,
    created: &str,
    activated: bool,
) -> Result<Option<UserId>> {
    let res = conn.execute(
        "INSERT INTO user (name, token_hash, token_scheme, created, activated) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![name, token_hash, scheme, created, activated],
    );

    match res {
        Ok(_) => Ok(Some(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn insert_message(conn: &Connection, row: &MessageRow) -> Result<i64> {
    conn.execute(
        "INSERT INTO messages (user_id, date, topic, priority, details, archived) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            row.user_id,
            row.date,
            row.topic,
            SqlPriority(&row.priority),
            row.details,
            row.archived
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All unarchived messages of one user, oldest first.
pub(crate) fn query_unarchived_messages(conn: &Connection, user_id: UserId) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, topic, priority, details, archived
         FROM messages
         WHERE user_id = ?1 AND archived = 0
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: row.get(2)?,
                topic: row.get(3)?,
                priority: read_priority(row, 4)?,
                details: row.get(5)?,
                archived: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
