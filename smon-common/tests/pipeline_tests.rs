//! End-to-end tests for the normalization → aggregation pipeline
//!
//! Drives the public crate surface the way the ingestion and query
//! services do: split a payload, normalize each raw record, aggregate the
//! survivors.

use chrono::{TimeZone, Utc};
use smon_common::aggregate::{
    aggregate_sentiment, aggregate_time_series, Granularity,
};
use smon_common::batch::{split_batch, BatchError};
use smon_common::model::Sentiment;
use smon_common::normalize::normalize;
use smon_common::Activity;

fn normalize_payload(payload: &str) -> (Vec<Activity>, usize) {
    let items = split_batch(payload).expect("payload should frame");
    let total = items.len();
    let activities: Vec<Activity> = items.iter().filter_map(|item| normalize(item).ok()).collect();
    (activities, total)
}

#[test]
fn test_single_record_scenario() {
    let payload = r#"[{"schema:activity.content:sentiment":"POSITIVE",
        "schema:activity.timestamp:timestamp":1700000000,
        "schema:activity.content:language":["En"," fr "]}]"#;

    let (activities, framed) = normalize_payload(payload);
    assert_eq!(framed, 1);
    assert_eq!(activities.len(), 1);

    let activity = &activities[0];
    assert_eq!(activity.sentiment, Sentiment::Positive);
    assert_eq!(activity.languages, vec!["en", "fr"]);
    assert_eq!(
        activity.timestamp,
        Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).single()
    );
}

#[test]
fn test_ndjson_payload_with_bad_line_ingests_the_rest() {
    let payload = "not json\n{\"streams\":[\"a\"]}\n";
    let (activities, _) = normalize_payload(payload);
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].streams, vec!["a"]);
}

#[test]
fn test_payloads_with_no_records_are_framing_errors() {
    assert_eq!(split_batch(""), Err(BatchError::Empty));
    assert_eq!(split_batch("not json"), Err(BatchError::Empty));
}

#[test]
fn test_rejections_lower_the_success_count_only() {
    // Second element rejects (languages is not a list); the others survive.
    let payload = r#"[
        {"schema:activity.content:sentiment": "positive"},
        {"schema:activity.content:language": 3},
        {"schema:activity.content:sentiment": "negative"}
    ]"#;
    let (activities, framed) = normalize_payload(payload);
    assert_eq!(framed, 3);
    assert_eq!(activities.len(), 2);

    let summary = aggregate_sentiment(&activities);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.counts.positive, 1);
    assert_eq!(summary.counts.negative, 1);
}

#[test]
fn test_week_granularity_merges_same_iso_week() {
    let payload = r#"[
        {"schema:activity.timestamp:timestamp": "2023-11-27T08:00:00Z",
         "schema:activity.content:sentiment": "positive"},
        {"schema:activity.timestamp:timestamp": "2023-12-02T20:00:00Z",
         "schema:activity.content:sentiment": "negative"}
    ]"#;
    let (activities, _) = normalize_payload(payload);
    let series = aggregate_time_series(&activities, Granularity::Week);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, "2023-W48");
    assert_eq!(series[0].positive, 1);
    assert_eq!(series[0].negative, 1);
}

#[test]
fn test_mixed_timestamp_encodings_in_one_batch() {
    let payload = r#"[
        {"schema:activity.timestamp:timestamp": 1700000000},
        {"schema:activity.timestamp:timestamp": 1700000000000},
        {"schema:activity.timestamp:timestamp": "2023-11-14T22:13:20Z"},
        {"schema:activity.timestamp:timestamp": "14/11/2023 22:13:20"},
        {"schema:activity.timestamp:timestamp": "not a date"}
    ]"#;
    let (activities, _) = normalize_payload(payload);
    assert_eq!(activities.len(), 5);

    let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).single();
    for activity in &activities[..4] {
        assert_eq!(activity.timestamp, expected);
    }
    assert_eq!(activities[4].timestamp, None);

    // The unparseable record is absent from the time series but still
    // counted by the sentiment aggregation.
    let series = aggregate_time_series(&activities, Granularity::Day);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, "2023-11-14");
    assert_eq!(series[0].neutral, 4);
    assert_eq!(aggregate_sentiment(&activities).total, 5);
}
