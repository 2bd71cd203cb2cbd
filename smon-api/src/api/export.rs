//! Filtered record export endpoint

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::db::activities;
use crate::error::Result;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub language: Option<String>,
    pub format: Option<String>,
}

/// GET /api/activities/export
///
/// Serializes the filtered record set either as one JSON array (the
/// default) or, with `format=jsonl`, as newline-delimited JSON with one
/// stored row per line.
pub async fn export_activities(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let language = super::language_filter(query.language.as_deref());
    let rows = activities::fetch_filtered(&state.db, language).await?;

    if query.format.as_deref() == Some("jsonl") {
        let lines = rows
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let body = lines.join("\n");
        return Ok((
            [(header::CONTENT_TYPE, "application/x-ndjson")],
            body,
        )
            .into_response());
    }

    Ok(Json(rows).into_response())
}
