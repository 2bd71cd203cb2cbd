//! Aggregate statistics over canonical record sets
//!
//! Four independent, pure aggregations over an already-selected slice of
//! [`Activity`] records: sentiment distribution, time-bucketed sentiment
//! counts, and language/stream frequency tables. Selection and filtering
//! happen upstream in the persistence layer; nothing here mutates shared
//! state, so the aggregations may run in any order with identical results.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::model::{Activity, Sentiment};

/// Per-category record counts over the fixed sentiment set.
///
/// Categories with zero occurrences still appear with count 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    fn bump(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

/// Per-category share of the total, rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentPercentages {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Sentiment distribution over a record set.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    pub counts: SentimentCounts,
    pub percentages: SentimentPercentages,
    /// True record count. Zero for an empty input; the percentage
    /// denominator is floored at 1 separately.
    pub total: u64,
}

/// Time-series bucket granularity. Defaults to [`Granularity::Day`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    #[default]
    Day,
    Week,
}

impl Granularity {
    /// Read a granularity from a request parameter.
    ///
    /// Only `"week"` selects weekly buckets; anything else, recognized or
    /// not, means daily.
    pub fn parse(value: &str) -> Self {
        if value == "week" {
            Granularity::Week
        } else {
            Granularity::Day
        }
    }

    /// Bucket key for an instant: `YYYY-MM-DD` for days, `YYYY-Www` (ISO
    /// week year + zero-padded ISO week number) for weeks. Both formats
    /// sort chronologically under plain lexicographic order.
    fn bucket_key(&self, ts: DateTime<Utc>) -> String {
        match self {
            Granularity::Day => ts.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let week = ts.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
        }
    }
}

/// One time-series bucket with per-sentiment counts.
///
/// Sentiments unseen within the bucket are emitted as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    pub date: String,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// Count records per sentiment category and derive percentage shares
///
/// `sum(counts) == total` always holds; each percentage equals
/// `count / max(total, 1) * 100` rounded to one decimal place,
/// half away from zero.
pub fn aggregate_sentiment(rows: &[Activity]) -> SentimentSummary {
    let mut counts = SentimentCounts::default();
    for row in rows {
        counts.bump(row.sentiment);
    }

    let total = rows.len() as u64;
    let denominator = total.max(1) as f64;
    let share = |count: u64| round_one_decimal(count as f64 / denominator * 100.0);

    SentimentSummary {
        counts,
        percentages: SentimentPercentages {
            positive: share(counts.positive),
            neutral: share(counts.neutral),
            negative: share(counts.negative),
        },
        total,
    }
}

/// Bucket records by calendar period and count sentiments per bucket
///
/// Records without a resolved timestamp are excluded entirely; they
/// neither create nor inflate a bucket. Output is ascending by bucket key.
pub fn aggregate_time_series(rows: &[Activity], granularity: Granularity) -> Vec<TimeBucket> {
    let mut buckets: BTreeMap<String, SentimentCounts> = BTreeMap::new();
    for row in rows {
        let Some(ts) = row.timestamp else { continue };
        buckets
            .entry(granularity.bucket_key(ts))
            .or_default()
            .bump(row.sentiment);
    }

    buckets
        .into_iter()
        .map(|(date, counts)| TimeBucket {
            date,
            positive: counts.positive,
            neutral: counts.neutral,
            negative: counts.negative,
        })
        .collect()
}

/// Occurrence counts of every distinct language across the record set.
///
/// No fixed category set, no zero-filling, no ordering guarantee; callers
/// needing determinism sort as a presentation concern.
pub fn aggregate_languages(rows: &[Activity]) -> HashMap<String, u64> {
    frequency(rows.iter().flat_map(|row| row.languages.iter()))
}

/// Occurrence counts of every distinct stream across the record set.
pub fn aggregate_streams(rows: &[Activity]) -> HashMap<String, u64> {
    frequency(rows.iter().flat_map(|row| row.streams.iter()))
}

fn frequency<'a>(values: impl Iterator<Item = &'a String>) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }
    counts
}

/// Round half away from zero to one decimal place.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
