//! HTTP API handlers for smon-api

pub mod activities;
pub mod aggregate;
pub mod export;
pub mod health;

pub use activities::{
    bulk_delete_activities, delete_activity, ingest_activities, list_activities,
};
pub use aggregate::aggregate_activities;
pub use export::export_activities;
pub use health::health_check;

/// Resolve the optional `language` query parameter.
///
/// An empty value and the `all` sentinel both mean "no filter".
pub(crate) fn language_filter(param: Option<&str>) -> Option<&str> {
    param.filter(|value| !value.is_empty() && *value != "all")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_filter_sentinels() {
        assert_eq!(language_filter(None), None);
        assert_eq!(language_filter(Some("")), None);
        assert_eq!(language_filter(Some("all")), None);
        assert_eq!(language_filter(Some("en")), Some("en"));
    }
}
