//! Timestamped export record.

use super::Ipv4;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// ISO-8601 with microsecond precision, no offset (`2024-01-10T20:43:07.123456`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Immutable record of one export action.
///
/// Field order is the key order of the persisted JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    #[serde(with = "iso_micros")]
    pub export_timestamp: NaiveDateTime,
    /// Absolute path of the source file.
    pub source_file: String,
    pub source_name: String,
    pub ipv4_count: usize,
    /// The clipboard payload, kept verbatim.
    pub terraform_list: String,
    pub cidr_blocks: Vec<Ipv4>,
}

mod iso_micros {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| de::Error::custom(format!("invalid timestamp {s}: {e}")))
    }
}
