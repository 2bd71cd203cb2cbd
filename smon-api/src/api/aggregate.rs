//! Aggregate statistics endpoint

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use smon_common::aggregate::{
    aggregate_languages, aggregate_sentiment, aggregate_streams, aggregate_time_series,
    Granularity, SentimentSummary, TimeBucket,
};
use smon_common::Activity;

use crate::db::activities::{self, ActivityRecord};
use crate::error::Result;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    pub language: Option<String>,
    pub granularity: Option<String>,
}

/// Aggregate statistics over the filtered record set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub sentiment: SentimentSummary,
    pub time_series: Vec<TimeBucket>,
    pub languages: HashMap<String, u64>,
    pub streams: HashMap<String, u64>,
    pub total: usize,
}

/// GET /api/activities/aggregate
///
/// Runs the four aggregations over a snapshot of the (optionally
/// language-filtered) stored records.
pub async fn aggregate_activities(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> Result<Json<AggregateResponse>> {
    let language = super::language_filter(query.language.as_deref());
    let granularity = query
        .granularity
        .as_deref()
        .map(Granularity::parse)
        .unwrap_or_default();

    let rows: Vec<Activity> = activities::fetch_filtered(&state.db, language)
        .await?
        .into_iter()
        .map(ActivityRecord::into_activity)
        .collect();

    Ok(Json(AggregateResponse {
        sentiment: aggregate_sentiment(&rows),
        time_series: aggregate_time_series(&rows, granularity),
        languages: aggregate_languages(&rows),
        streams: aggregate_streams(&rows),
        total: rows.len(),
    }))
}
