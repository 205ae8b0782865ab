use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::idea::{IdGenerator, Idea, IdeaDraft, IdeaId};

/// Ordered idea collection. Mutations set a change flag that the owner drains
/// with [`IdeaList::take_changed`] to decide when to persist.
#[derive(Clone, Debug)]
pub(crate) struct IdeaList {
    ideas: Vec<Idea>,
    ids: IdGenerator,
    changed: bool,
}

impl IdeaList {
    pub(crate) fn new(ideas: Vec<Idea>) -> Self {
        let ids = IdGenerator::after(&ideas);
        Self {
            ideas,
            ids,
            changed: false,
        }
    }

    /// Builds the list from seed data that has never been written out.
    pub(crate) fn seeded(ideas: Vec<Idea>) -> Self {
        let mut list = Self::new(ideas);
        list.changed = true;
        list
    }

    pub(crate) fn as_slice(&self) -> &[Idea] {
        &self.ideas
    }

    pub(crate) fn len(&self) -> usize {
        self.ideas.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    pub(crate) fn get(&self, id: IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| idea.id == id)
    }

    pub(crate) fn create(&mut self, draft: IdeaDraft) -> IdeaId {
        self.create_at(draft, Utc::now())
    }

    pub(crate) fn create_at(&mut self, draft: IdeaDraft, now: DateTime<Utc>) -> IdeaId {
        let id = self.ids.next(now);
        self.ideas.push(Idea::new(id, draft, now));
        self.changed = true;
        info!(%id, "idea created");
        id
    }

    pub(crate) fn update(&mut self, id: IdeaId, draft: IdeaDraft) -> bool {
        let Some(idea) = self.ideas.iter_mut().find(|idea| idea.id == id) else {
            debug!(%id, "update skipped, idea not found");
            return false;
        };
        idea.apply(draft);
        self.changed = true;
        info!(%id, "idea updated");
        true
    }

    pub(crate) fn remove(&mut self, id: IdeaId) -> Option<Idea> {
        let index = self.ideas.iter().position(|idea| idea.id == id)?;
        let removed = self.ideas.remove(index);
        self.changed = true;
        info!(%id, "idea deleted");
        Some(removed)
    }

    pub(crate) fn filter(&self, keyword: &str) -> Vec<&Idea> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return self.ideas.iter().collect();
        }
        self.ideas
            .iter()
            .filter(|idea| {
                idea.title.to_lowercase().contains(&needle)
                    || idea.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::idea::default_ideas;
    use chrono::TimeZone;

    fn draft(title: &str, description: &str) -> IdeaDraft {
        IdeaDraft {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let mut list = IdeaList::new(default_ideas());
        let id = list.create(draft("测试创意标题", "这是一个测试创意的详细描述"));
        assert_eq!(list.len(), 4);
        let last = list.as_slice().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.title, "测试创意标题");
        assert!(last.created_at.is_some());
        assert!(list.as_slice()[..3].iter().all(|idea| idea.id != id));
        assert!(list.take_changed());
        assert!(!list.take_changed());
    }

    #[test]
    fn rapid_creates_get_distinct_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut list = IdeaList::new(Vec::new());
        let a = list.create_at(draft("aa", "aaaaa"), now);
        let b = list.create_at(draft("bb", "bbbbb"), now);
        assert_ne!(a, b);
    }

    #[test]
    fn update_preserves_id_position_and_timestamp() {
        let mut list = IdeaList::new(default_ideas());
        let id = list.create(draft("待编辑的创意", "待编辑的创意描述"));
        list.take_changed();
        let before = list.get(id).cloned().unwrap();

        assert!(list.update(id, draft("已编辑的创意", "已编辑的创意描述")));
        let after = list.get(id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.title, "已编辑的创意");
        assert_eq!(after.description, "已编辑的创意描述");
        assert_eq!(list.as_slice()[3].id, id);
        assert!(list.take_changed());
    }

    #[test]
    fn update_unknown_id_is_silent() {
        let mut list = IdeaList::new(default_ideas());
        let before = list.as_slice().to_vec();
        assert!(!list.update(IdeaId::from(999), draft("xx", "xxxxx")));
        assert_eq!(list.as_slice(), before.as_slice());
        assert!(!list.take_changed());
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut list = IdeaList::new(default_ideas());
        let removed = list.remove(IdeaId::from(2)).unwrap();
        assert_eq!(removed.title, "内部创意征集活动");
        let ids: Vec<i64> = list.as_slice().iter().map(|idea| idea.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(list.remove(IdeaId::from(2)).is_none());
    }

    #[test]
    fn filter_matches_title_exactly_one_seed() {
        let list = IdeaList::new(default_ideas());
        let hits = list.filter("内部创意征集活动");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "内部创意征集活动");
        assert!(hits.iter().all(|idea| idea.title != "新品发布会创意策划"));
    }

    #[test]
    fn filter_is_case_insensitive_over_both_fields() {
        let mut list = IdeaList::new(Vec::new());
        list.create(draft("Rust Meetup", "monthly TALKS"));
        list.create(draft("Garden", "grow herbs"));
        assert_eq!(list.filter("rust").len(), 1);
        assert_eq!(list.filter("talks").len(), 1);
        assert_eq!(list.filter("  HERBS ").len(), 1);
        assert!(list.filter("nothing").is_empty());
    }

    #[test]
    fn blank_keyword_returns_everything_in_order() {
        let list = IdeaList::new(default_ideas());
        let all: Vec<&Idea> = list.as_slice().iter().collect();
        assert_eq!(list.filter(""), all);
        assert_eq!(list.filter("   "), all);
    }

    #[test]
    fn seeded_list_starts_dirty() {
        let mut list = IdeaList::seeded(default_ideas());
        assert!(list.take_changed());
        let mut loaded = IdeaList::new(default_ideas());
        assert!(!loaded.take_changed());
    }
}
