use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Create payload as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionInput {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
}

/// Full replacement payload for update. `user_id` is not part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionInput {
    pub service_name: String,
    pub price: i32,
    pub start_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
}

/// Validated, normalized row ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Validated, normalized column values for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChanges {
    pub service_name: String,
    pub price: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Optional query filters. Empty strings count as absent.
///
/// `start`/`end` are inclusive `YYYY-MM` bounds on the month of `start_date`
/// and only apply to the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionFilter {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}
