//! Normalization of raw activity objects
//!
//! Upstream producers emit loosely-structured objects keyed by an
//! externally-defined alias scheme (`schema:actor:name`, ...), with
//! inconsistent timestamp encodings and free-text sentiment labels.
//! `normalize` maps one such object to a canonical [`Activity`] or rejects
//! it. It never panics on malformed input; rejection is an ordinary outcome.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Activity, Sentiment};

/// A raw record that failed structural validation.
///
/// Rejections are silent at the API boundary: callers drop the input and
/// report only the count of successes. The wrapped detail exists for
/// diagnostics, never for responses.
#[derive(Debug, Error)]
#[error("record rejected: {0}")]
pub struct Rejected(#[from] serde_json::Error);

/// Raw activity object, keyed by the upstream alias scheme.
///
/// The `rename` attributes are the alias table; they must match the
/// upstream producers byte for byte. Every field is optional: an absent
/// key is an absent field, not an error. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct RawActivity {
    #[serde(rename = "schema:actor:image")]
    pub actor_image: Option<String>,
    #[serde(rename = "schema:actor:name")]
    pub actor_name: Option<String>,
    /// Kept as raw JSON: may be a number, a string in one of several
    /// formats, or junk. Resolved by [`resolve_timestamp`].
    #[serde(rename = "schema:activity.timestamp:timestamp", default)]
    pub raw_timestamp: Value,
    #[serde(rename = "schema:metadata:datatype")]
    pub datatype: Option<String>,
    #[serde(rename = "schema:activity.content:value")]
    pub content: Option<String>,
    #[serde(rename = "schema:activity.content:language")]
    pub languages: Option<Vec<String>>,
    #[serde(rename = "schema:activity.location:placename")]
    pub place: Option<String>,
    #[serde(
        rename = "schema:actor:followers_count",
        default,
        deserialize_with = "lax_int"
    )]
    pub followers: Option<i64>,
    #[serde(rename = "schema:activity.content:sentiment")]
    pub sentiment: Option<String>,
    #[serde(rename = "streams")]
    pub streams: Option<Vec<String>>,
}

/// Normalize one raw object into a canonical record
///
/// Structural failures (a list where a scalar belongs, a follower count
/// that is not an integer at all) reject the record. Unparseable
/// sub-fields never reject: a bad timestamp degrades to `None` and a bad
/// sentiment label degrades to `Neutral`.
pub fn normalize(raw: &Value) -> Result<Activity, Rejected> {
    let parsed: RawActivity = serde_json::from_value(raw.clone())?;

    Ok(Activity {
        actor_name: parsed.actor_name,
        actor_image: parsed.actor_image,
        timestamp: resolve_timestamp(&parsed.raw_timestamp),
        datatype: parsed.datatype,
        content: parsed.content,
        languages: clean_labels(parsed.languages.unwrap_or_default()),
        place: parsed.place,
        followers: parsed.followers,
        sentiment: parsed
            .sentiment
            .map(|label| Sentiment::from_label(&label))
            .unwrap_or_default(),
        streams: clean_labels(parsed.streams.unwrap_or_default()),
    })
}

/// Epoch values at or above this magnitude are milliseconds, below it seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Resolve the raw timestamp value to a UTC instant
///
/// Priority order, first success wins:
/// 1. numeric: epoch seconds when the magnitude is below 10^12, else
///    epoch milliseconds
/// 2. text: ISO-8601, substituting a trailing `Z` with `+00:00`;
///    offset-less forms are read as UTC
/// 3. text: `DD/MM/YYYY HH:MM:SS`, read as UTC
///
/// Absent values, unexpected JSON types and values no rule can parse all
/// resolve to `None`. There is no error outcome.
pub fn resolve_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(n) => {
            let epoch = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            if (-EPOCH_MILLIS_THRESHOLD..EPOCH_MILLIS_THRESHOLD).contains(&epoch) {
                DateTime::from_timestamp(epoch, 0)
            } else {
                DateTime::from_timestamp_millis(epoch)
            }
        }
        Value::String(text) => parse_text_timestamp(text),
        _ => None,
    }
}

fn parse_text_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let substituted = text
        .strip_suffix('Z')
        .map(|head| format!("{head}+00:00"));
    let iso = substituted.as_deref().unwrap_or(text);

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less ISO forms are interpreted as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(iso, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%d/%m/%Y %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Trim and lower-case each label, dropping entries that become empty.
/// Relative order (and any duplicates) are preserved.
fn clean_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Lax integer coercion for the follower count.
///
/// Accepts an integer, an integral float, or a string of digits. Anything
/// else is a structural failure, which rejects the whole record.
fn lax_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0) {
                Ok(Some(f as i64))
            } else {
                Err(D::Error::custom(format!("invalid follower count: {n}")))
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid follower count: {s:?}"))),
        Some(other) => Err(D::Error::custom(format!(
            "invalid follower count: {other}"
        ))),
    }
}
