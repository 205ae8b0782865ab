use thiserror::Error;

use super::kv_repo::{get_kv, set_kv};
use crate::{db::Db, domain::idea::Idea};

pub(crate) const IDEAS_KEY: &str = "ideas";

#[derive(Debug, Error)]
pub(crate) enum PersistError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("stored ideas are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads the stored list. `Ok(None)` means nothing has been saved yet.
pub(crate) fn read_ideas(db: &Db) -> Result<Option<Vec<Idea>>, PersistError> {
    let Some(raw) = get_kv(db, IDEAS_KEY)? else {
        return Ok(None);
    };
    let ideas = serde_json::from_str::<Vec<Idea>>(&raw)?;
    Ok(Some(ideas))
}

pub(crate) fn write_ideas(db: &Db, ideas: &[Idea]) -> Result<(), PersistError> {
    let raw = serde_json::to_string(ideas)?;
    set_kv(db, IDEAS_KEY, &raw)?;
    Ok(())
}
