//! Style objects: unconditional properties plus media-conditioned variants.

use std::collections::BTreeMap;

use super::parse::media::MediaQuery;
use super::properties::{StyleKey, StyleValue};

/// Properties keyed by target style key.
pub type StyleMap = BTreeMap<StyleKey, StyleValue>;

/// A style object.
///
/// `props` always apply; each `media` entry applies only under its
/// condition. Serialized, the media entries appear as nested objects keyed
/// `"@media max-width: 600px"` next to the plain properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub props: StyleMap,
    pub media: BTreeMap<MediaQuery, StyleMap>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unconditional value for `key`.
    pub fn get(&self, key: StyleKey) -> Option<&StyleValue> {
        self.props.get(&key)
    }

    /// Returns the value for `key` under `query`.
    pub fn get_media(&self, query: &MediaQuery, key: StyleKey) -> Option<&StyleValue> {
        self.media.get(query)?.get(&key)
    }

    pub fn set(&mut self, key: StyleKey, value: StyleValue) {
        self.props.insert(key, value);
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.media.values().all(StyleMap::is_empty)
    }

    /// Move all unconditional properties under `query`.
    pub fn conditioned(self, query: MediaQuery) -> Self {
        let mut media = self.media;
        media.entry(query).or_default().extend(self.props);
        Self {
            props: StyleMap::new(),
            media,
        }
    }

    /// Merge a later rule into this one.
    ///
    /// Plain keys overwrite. Media maps are merged key by key into any
    /// existing map for the same condition instead of replacing it.
    pub fn merge(&mut self, later: &Style) {
        self.props
            .extend(later.props.iter().map(|(k, v)| (*k, v.clone())));
        for (query, props) in &later.media {
            self.media
                .entry(query.clone())
                .or_default()
                .extend(props.iter().map(|(k, v)| (*k, v.clone())));
        }
    }

    /// Shallow overlay: every top-level entry of `other` wins, including
    /// whole media maps.
    pub fn overlay(&mut self, other: &Style) {
        self.props
            .extend(other.props.iter().map(|(k, v)| (*k, v.clone())));
        self.media
            .extend(other.media.iter().map(|(q, m)| (q.clone(), m.clone())));
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Style {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.props.len() + self.media.len()))?;
        for (key, value) in &self.props {
            map.serialize_entry(key.as_str(), value)?;
        }
        for (query, props) in &self.media {
            let nested: BTreeMap<&str, &StyleValue> =
                props.iter().map(|(k, v)| (k.as_str(), v)).collect();
            map.serialize_entry(&query.to_string(), &nested)?;
        }
        map.end()
    }
}
