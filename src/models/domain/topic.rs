use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    pub question_count: usize,
}

impl TopicRecord {
    /// Orders by topic, then subtopic, with subtopic-less records first.
    pub fn listing_order(a: &TopicRecord, b: &TopicRecord) -> Ordering {
        a.topic
            .cmp(&b.topic)
            .then_with(|| match (&a.subtopic, &b.subtopic) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.cmp(y),
            })
    }
}
