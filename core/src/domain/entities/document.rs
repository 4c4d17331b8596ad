//! Document shape exchanged with the store and the store-native timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// A stored record: an unordered mapping of field name to JSON value
pub type Document = Map<String, Value>;

const SECONDS_KEYS: [&str; 2] = ["_seconds", "seconds"];
const NANOS_KEYS: [&str; 3] = ["_nanoseconds", "nanoseconds", "nanos"];
const ACCESSOR_KEY: &str = "$timestamp";

/// Store-native instant: whole seconds since the Unix epoch plus a nanosecond part
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl StoreTimestamp {
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            seconds: instant.timestamp(),
            nanos: instant.timestamp_subsec_nanos(),
        }
    }

    /// None when the instant is outside chrono's representable range
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)
    }

    /// ISO-8601 / RFC 3339 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
    pub fn to_iso_string(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Store-native JSON representation
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("_seconds".to_string(), Value::from(self.seconds));
        map.insert("_nanoseconds".to_string(), Value::from(self.nanos));
        Value::Object(map)
    }

    /// Structural detection of a store-native timestamp inside a mapping.
    ///
    /// Recognised shapes: an object whose only keys are an epoch-seconds field
    /// (`_seconds` or `seconds`) and optionally one nanosecond field
    /// (`_nanoseconds`, `nanoseconds` or `nanos`), all integers; or an object
    /// whose only key is the `$timestamp` accessor wrapping such an object or
    /// an RFC 3339 string.
    pub fn detect(map: &Map<String, Value>) -> Option<Self> {
        if Self::is_accessor(map) {
            if let Some(inner) = map.get(ACCESSOR_KEY) {
                return match inner {
                    Value::Object(inner) => Self::detect_epoch_fields(inner),
                    Value::String(text) => DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|dt| Self::from_datetime(dt.with_timezone(&Utc))),
                    _ => None,
                };
            }
        }
        Self::detect_epoch_fields(map)
    }

    /// Whether the mapping has the `$timestamp` accessor as its only key
    pub fn is_accessor(map: &Map<String, Value>) -> bool {
        map.len() == 1 && map.contains_key(ACCESSOR_KEY)
    }

    fn detect_epoch_fields(map: &Map<String, Value>) -> Option<Self> {
        if map.is_empty() || map.len() > 2 {
            return None;
        }

        let seconds_key = SECONDS_KEYS.iter().find(|k| map.contains_key(**k))?;
        let seconds = map.get(*seconds_key)?.as_i64()?;

        let nanos = match map.len() {
            1 => 0,
            _ => {
                let nanos_key = NANOS_KEYS.iter().find(|k| map.contains_key(**k))?;
                let nanos = map.get(*nanos_key)?.as_u64()?;
                u32::try_from(nanos).ok().filter(|n| *n < 1_000_000_000)?
            }
        };

        Some(Self { seconds, nanos })
    }
}

impl From<StoreTimestamp> for Value {
    fn from(ts: StoreTimestamp) -> Self {
        ts.to_value()
    }
}
