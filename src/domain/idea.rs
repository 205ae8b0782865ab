use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct IdeaId(i64);

impl IdeaId {
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for IdeaId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Idea {
    pub(crate) id: IdeaId,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<String>,
}

impl Idea {
    pub(crate) fn new(id: IdeaId, draft: IdeaDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub(crate) fn apply(&mut self, draft: IdeaDraft) {
        self.title = draft.title;
        self.description = draft.description;
    }
}

/// Title and description that already passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IdeaDraft {
    pub(crate) title: String,
    pub(crate) description: String,
}

/// Hands out time-based ids, never repeating one even when the clock stalls
/// or steps backwards.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub(crate) fn after(ideas: &[Idea]) -> Self {
        let last = ideas.iter().map(|idea| idea.id.as_i64()).max().unwrap_or(0);
        Self { last }
    }

    pub(crate) fn next(&mut self, now: DateTime<Utc>) -> IdeaId {
        let candidate = now.timestamp_millis();
        self.last = if candidate > self.last {
            candidate
        } else {
            self.last + 1
        };
        IdeaId(self.last)
    }
}

pub(crate) fn default_ideas() -> Vec<Idea> {
    [
        (
            1,
            "新品发布会创意策划",
            "为年度新品发布会设计沉浸式互动体验，提升现场氛围与传播效果。",
        ),
        (
            2,
            "内部创意征集活动",
            "面向全体员工征集产品改进点子，每月评选优秀创意并给予奖励。",
        ),
        (
            3,
            "品牌联名周边设计",
            "与本地艺术家合作推出限量联名周边，拓展年轻用户群体。",
        ),
    ]
    .into_iter()
    .map(|(id, title, description)| Idea {
        id: IdeaId(id),
        title: title.to_string(),
        description: description.to_string(),
        created_at: None,
    })
    .collect()
}
