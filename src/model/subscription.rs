use serde::{Deserialize, Serialize};
use std::fmt;

/// Directed edge: `subscriber_id` follows `author_id`.
///
/// The pair is the primary key; there is no self-follow check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscriber_id: String,
    pub author_id: String,
}

impl Subscription {
    pub fn new(subscriber_id: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            subscriber_id: subscriber_id.into(),
            author_id: author_id.into(),
        }
    }

    pub fn touches(&self, user_id: &str) -> bool {
        self.subscriber_id == user_id || self.author_id == user_id
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.subscriber_id, self.author_id)
    }
}
