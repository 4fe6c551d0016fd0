//! Bucket tag sets.
//!
//! A [`TagSet`] keeps tags in the order the storage service returned them so
//! that a merged set is written back with existing tags first and new keys
//! appended at the end.

use std::collections::HashMap;

/// A single key/value tag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Create a new tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered set of tags attached to a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    /// Set `key` to `value`.
    ///
    /// The first tag with a matching key is overwritten in place; otherwise a
    /// new tag is appended. Tags are never removed, so applying the same
    /// assignment twice leaves the set unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3tagger_core::TagSet;
    ///
    /// let mut tags = TagSet::from_pairs([("owner", "alice")]);
    /// tags.set("env", "prod");
    /// tags.set("env", "prod");
    /// assert_eq!(tags.len(), 2);
    /// assert_eq!(tags.get("owner"), Some("alice"));
    /// assert_eq!(tags.get("env"), Some("prod"));
    /// ```
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(tag) = self.0.iter_mut().find(|t| t.key == key) {
            value.clone_into(&mut tag.value);
        } else {
            self.0.push(Tag::new(key, value));
        }
    }

    /// Build a tag set from key/value pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| Tag::new(k, v)).collect())
    }

    /// Project the set into a key to value map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|t| (t.key.clone(), t.value.clone()))
            .collect()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tags in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
