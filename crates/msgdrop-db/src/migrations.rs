use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Bring the schema up to date. Safe to call on every start: existing tables
/// and rows are left alone, only missing versions are applied.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (users and messages)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE IF NOT EXISTS user (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL UNIQUE,
                token_hash      TEXT NOT NULL,
                token_scheme    INTEGER NOT NULL DEFAULT 1,
                created         TEXT NOT NULL,
                activated       INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_user_token_hash
                ON user(token_hash);

            -- priority has no declared type so integers and text keep their storage class
            CREATE TABLE IF NOT EXISTS messages (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES user(id),
                date        TEXT NOT NULL,
                topic       TEXT NOT NULL,
                priority    NOT NULL,
                details     TEXT,
                archived    INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_messages_user
                ON messages(user_id, archived);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
