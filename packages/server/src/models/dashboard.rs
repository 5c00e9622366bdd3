use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default and maximum number of activity entries.
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 10;
pub const MAX_ACTIVITY_LIMIT: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Update,
}

impl ActivityAction {
    /// Rows never touched since insert still carry identical timestamps.
    /// Best effort: clock truncation can misreport either way.
    pub fn infer(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        if created_at == updated_at {
            Self::Create
        } else {
            Self::Update
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// `{contentType}-{rowId}`, unique across tables.
    #[schema(example = "program-4")]
    pub id: String,
    pub action: ActivityAction,
    #[schema(example = "program")]
    pub content_type: String,
    pub content_title: String,
    #[schema(example = "Admin")]
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Number of entries, 1-50 (default 10).
    pub limit: Option<u64>,
}

impl ActivityQuery {
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}

/// Row counts of one table. `published <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct TableCount {
    pub total: u64,
    pub published: u64,
}

#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub hero: TableCount,
    pub about: TableCount,
    pub programs: TableCount,
    pub events: TableCount,
    pub team: TableCount,
    pub founders: TableCount,
    pub testimonials: TableCount,
    pub mentor_talks: TableCount,
    pub event_gallery: TableCount,
    /// `published` counts assets with a public object-storage path.
    pub media: TableCount,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn action_follows_timestamps() {
        let t = Utc::now();
        assert_eq!(ActivityAction::infer(t, t), ActivityAction::Create);
        assert_eq!(
            ActivityAction::infer(t, t + Duration::milliseconds(1)),
            ActivityAction::Update
        );
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(ActivityQuery { limit: None }.effective_limit(), 10);
        assert_eq!(ActivityQuery { limit: Some(0) }.effective_limit(), 1);
        assert_eq!(ActivityQuery { limit: Some(500) }.effective_limit(), 50);
        assert_eq!(ActivityQuery { limit: Some(25) }.effective_limit(), 25);
    }
}
