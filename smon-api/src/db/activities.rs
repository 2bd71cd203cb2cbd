//! Activity table queries
//!
//! Stores canonical records and returns them for listing, aggregation and
//! export. Language and stream lists are stored comma-joined (entries are
//! already trimmed and lower-cased by the normalizer); timestamps are
//! stored as RFC 3339 UTC text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use smon_common::{Activity, Sentiment};

/// A stored activity row
///
/// The canonical record plus its database id. Serializes with camelCase
/// keys, which is the wire shape of the list and export endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: i64,
    pub actor_name: Option<String>,
    pub actor_image: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub datatype: Option<String>,
    pub content: Option<String>,
    pub languages: Vec<String>,
    pub place: Option<String>,
    pub followers: Option<i64>,
    pub sentiment: Sentiment,
    pub streams: Vec<String>,
}

impl ActivityRecord {
    /// Shed the database id, yielding the canonical record for aggregation
    pub fn into_activity(self) -> Activity {
        Activity {
            actor_name: self.actor_name,
            actor_image: self.actor_image,
            timestamp: self.timestamp,
            datatype: self.datatype,
            content: self.content,
            languages: self.languages,
            place: self.place,
            followers: self.followers,
            sentiment: self.sentiment,
            streams: self.streams,
        }
    }

    fn from_row(row: &SqliteRow) -> Self {
        Self {
            id: row.get("id"),
            actor_name: row.get("actor_name"),
            actor_image: row.get("actor_image"),
            timestamp: row.get("timestamp"),
            datatype: row.get("datatype"),
            content: row.get("content"),
            languages: split_list(row.get::<Option<String>, _>("languages")),
            place: row.get("place"),
            followers: row.get("followers"),
            sentiment: row
                .get::<Option<String>, _>("sentiment")
                .map(|label| Sentiment::from_label(&label))
                .unwrap_or_default(),
            streams: split_list(row.get::<Option<String>, _>("streams")),
        }
    }
}

fn split_list(joined: Option<String>) -> Vec<String> {
    joined
        .unwrap_or_default()
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Insert one canonical record, returning its new id
pub async fn insert(pool: &SqlitePool, activity: &Activity) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO activities
            (actor_name, actor_image, timestamp, datatype, content,
             languages, place, followers, sentiment, streams)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&activity.actor_name)
    .bind(&activity.actor_image)
    .bind(activity.timestamp)
    .bind(&activity.datatype)
    .bind(&activity.content)
    .bind(activity.languages.join(","))
    .bind(&activity.place)
    .bind(activity.followers)
    .bind(activity.sentiment.as_str())
    .bind(activity.streams.join(","))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List stored rows, newest timestamp first
///
/// `language`, when present, is matched case-insensitively as a substring
/// of the stored language list. Rows without a timestamp sort last.
pub async fn list(
    pool: &SqlitePool,
    language: Option<&str>,
    limit: i64,
) -> Result<Vec<ActivityRecord>, sqlx::Error> {
    let rows = match language {
        Some(language) => {
            sqlx::query(
                "SELECT * FROM activities WHERE languages LIKE ? \
                 ORDER BY timestamp DESC LIMIT ?",
            )
            .bind(like_pattern(language))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT * FROM activities ORDER BY timestamp DESC LIMIT ?")
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows.iter().map(ActivityRecord::from_row).collect())
}

/// Fetch every stored row matching the language filter
///
/// Feeds aggregation and export, which consume the whole filtered set.
pub async fn fetch_filtered(
    pool: &SqlitePool,
    language: Option<&str>,
) -> Result<Vec<ActivityRecord>, sqlx::Error> {
    let rows = match language {
        Some(language) => {
            sqlx::query("SELECT * FROM activities WHERE languages LIKE ?")
                .bind(like_pattern(language))
                .fetch_all(pool)
                .await?
        }
        None => sqlx::query("SELECT * FROM activities").fetch_all(pool).await?,
    };

    Ok(rows.iter().map(ActivityRecord::from_row).collect())
}

/// Delete one row by id; false when no such row exists
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM activities WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a set of rows by id, returning the count actually deleted
pub async fn delete_many(pool: &SqlitePool, ids: &[i64]) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM activities WHERE id IN ({placeholders})");

    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

fn like_pattern(language: &str) -> String {
    format!("%{}%", language.to_lowercase())
}
