use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use serde_json::Value as Json;
pub use time::OffsetDateTime as Timestamp;

/// Canonical format of a [`Timestamp`] on the wire: ISO-8601 with microseconds and an explicit offset,
/// e.g. `2024-01-02T03:04:05.000006+00:00`.
pub const TIMESTAMP_FORMAT: &[time::format_description::FormatItem<'static>] = time::macros::format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The unit of data a provider hands to its host.
///
/// ```json
/// { "data": { ... }, "metadata": { "seq": 1, ... } }
/// ```
pub struct Envelope<D = Json> {
    data: D,
    metadata: Metadata,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// String-keyed JSON values attached to an [`Envelope`]. Keys are kept sorted.
pub struct Metadata {
    entries: BTreeMap<String, Json>,
}

impl<D> Envelope<D> {
    pub fn new(data: D, metadata: Metadata) -> Self {
        Self { data, metadata }
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_parts(self) -> (D, Metadata) {
        let Self { data, metadata } = self;
        (data, metadata)
    }
}

impl Metadata {
    pub fn new() -> Self {
        Default::default()
    }

    /// Insert or replace an entry. Returns self for chaining.
    pub fn insert<K: Into<String>, V: Into<Json>>(&mut self, key: K, value: V) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn with<K: Into<String>, V: Into<Json>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.entries.get(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Json::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Json::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Json)> {
        self.entries.iter()
    }
}

/// (De)serialize a [`Timestamp`] with [`TIMESTAMP_FORMAT`]. Use with `#[serde(with = "serde_timestamp")]`.
pub mod serde_timestamp {
    use super::{Timestamp, TIMESTAMP_FORMAT};
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        let text = timestamp
            .format(TIMESTAMP_FORMAT)
            .map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text, TIMESTAMP_FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::datetime;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Tick {
        n: i64,
        #[serde(with = "serde_timestamp")]
        at: Timestamp,
    }

    #[test]
    fn test_timestamp_keeps_offset() {
        let ts = datetime!(2022-01-02 03:04:05.000006 UTC);
        assert_eq!(
            ts.format(TIMESTAMP_FORMAT).unwrap(),
            "2022-01-02T03:04:05.000006+00:00"
        );
        let ts = datetime!(2022-01-02 03:04:05.5 +08:00);
        assert_eq!(
            ts.format(TIMESTAMP_FORMAT).unwrap(),
            "2022-01-02T03:04:05.500000+08:00"
        );
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = Envelope::new(
            Tick {
                n: 7,
                at: datetime!(2022-01-02 03:04:05 UTC),
            },
            Metadata::new().with("seq", 7).with("source", "tick"),
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": { "n": 7, "at": "2022-01-02T03:04:05.000000+00:00" },
                "metadata": { "seq": 7, "source": "tick" }
            })
        );
        let back: Envelope<Tick> = serde_json::from_value(json).unwrap();
        assert_eq!(back, envelope);
        let (data, metadata) = back.into_parts();
        assert_eq!(data.n, 7);
        let keys: Vec<&String> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["seq", "source"]);
    }

    #[test]
    fn test_metadata_accessors() {
        let mut meta = Metadata::new();
        assert!(meta.is_empty());
        meta.insert("seq", 3).insert("source", "x").insert("seq", 4);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get_i64("seq"), Some(4));
        assert_eq!(meta.get_str("source"), Some("x"));
        assert_eq!(meta.get_i64("source"), None);
        assert_eq!(meta.get("missing"), None);
    }

    #[test]
    fn test_metadata_keys_sorted() {
        let meta = Metadata::new()
            .with("seq", 1)
            .with("source", "x")
            .with("interval_ms", 5);
        let keys: Vec<&String> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["interval_ms", "seq", "source"]);
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"interval_ms":5,"seq":1,"source":"x"}"#
        );
    }
}
