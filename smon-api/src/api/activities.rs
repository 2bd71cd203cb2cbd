//! Activity ingestion, listing and deletion endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use smon_common::batch::split_batch;
use smon_common::normalize;

use crate::db::activities::{self, ActivityRecord};
use crate::error::{ApiError, Result};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ingested: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub language: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// POST /api/activities
///
/// Accepts a JSON array, a single JSON object, or newline-delimited JSON.
/// Each raw record is normalized independently; records that reject are
/// dropped silently and only the success count is reported. A payload
/// framing no record at all is the caller's error.
pub async fn ingest_activities(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<IngestResponse>> {
    let items = split_batch(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let mut ingested = 0;
    for item in &items {
        match normalize(item) {
            Ok(activity) => {
                activities::insert(&state.db, &activity).await?;
                ingested += 1;
            }
            Err(err) => debug!("dropping rejected record: {err}"),
        }
    }

    info!("Ingested {ingested} of {} raw records", items.len());
    Ok(Json(IngestResponse { ingested }))
}

/// GET /api/activities
///
/// Stored rows, newest first, optionally filtered by language.
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ActivityRecord>>> {
    let language = super::language_filter(query.language.as_deref());
    let limit = query.limit.unwrap_or(100);

    let rows = activities::list(&state.db, language, limit).await?;
    Ok(Json(rows))
}

/// DELETE /api/activities/:id
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if activities::delete_by_id(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// POST /api/activities/bulk_delete
///
/// Body: `{"ids": [1, 2, ...]}`. Returns the count actually deleted.
/// A missing, malformed or empty id list is a bad request.
pub async fn bulk_delete_activities(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<BulkDeleteResponse>> {
    let request: BulkDeleteRequest = serde_json::from_str(&body).unwrap_or_default();
    if request.ids.is_empty() {
        return Err(ApiError::BadRequest("ids list required".to_string()));
    }

    let deleted = activities::delete_many(&state.db, &request.ids).await?;
    info!("Bulk deleted {deleted} of {} requested activities", request.ids.len());
    Ok(Json(BulkDeleteResponse { deleted }))
}
