use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

mod idea_repo;
mod kv_repo;
mod schema;

pub(crate) use idea_repo::{read_ideas, write_ideas};
#[cfg(test)]
pub(crate) use idea_repo::IDEAS_KEY;
#[cfg(test)]
pub(crate) use kv_repo::{get_kv, set_kv};

pub(crate) struct Db {
    conn: Connection,
}

impl Db {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
