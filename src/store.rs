//! Persistence adapter: failures are logged and swallowed so the UI always
//! has a usable list.

use tracing::{debug, info, warn};

use crate::{
    db::{self, Db},
    domain::{
        collection::IdeaList,
        idea::{Idea, default_ideas},
    },
};

pub(crate) fn load(db: &Db) -> Option<Vec<Idea>> {
    match db::read_ideas(db) {
        Ok(Some(ideas)) => {
            debug!(count = ideas.len(), "loaded ideas");
            Some(ideas)
        }
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "failed to load ideas, using defaults");
            None
        }
    }
}

pub(crate) fn save(db: &Db, ideas: &[Idea]) {
    match db::write_ideas(db, ideas) {
        Ok(()) => debug!(count = ideas.len(), "saved ideas"),
        Err(err) => warn!(error = %err, "failed to save ideas"),
    }
}

/// Loads the stored list, seeding (and writing out) the defaults when
/// nothing usable is stored.
pub(crate) fn open_list(db: &Db) -> IdeaList {
    let mut list = match load(db) {
        Some(ideas) => IdeaList::new(ideas),
        None => {
            info!("no stored ideas, seeding defaults");
            IdeaList::seeded(default_ideas())
        }
    };
    persist_changes(db, &mut list);
    list
}

/// Writes the list out if it changed since the last call.
pub(crate) fn persist_changes(db: &Db, list: &mut IdeaList) {
    if list.take_changed() {
        save(db, list.as_slice());
    }
}
