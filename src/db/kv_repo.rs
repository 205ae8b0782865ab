use rusqlite::{OptionalExtension, params};

use crate::db::Db;

pub(crate) fn set_kv(db: &Db, key: &str, value: &str) -> rusqlite::Result<()> {
    db.conn().execute(
        "INSERT INTO kv (key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub(crate) fn get_kv(db: &Db, key: &str) -> rusqlite::Result<Option<String>> {
    db.conn()
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
}
