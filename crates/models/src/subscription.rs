//! The `subscriptions` table and the rules every persisted row obeys.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Server-assigned identifier: a v4 UUID in its hyphenated string form.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// First day of the month at UTC midnight.
///
/// The month is read in the offset the timestamp was written with, so
/// `2025-03-01T01:00:00+03:00` stays in March.
pub fn month_start(ts: DateTime<FixedOffset>) -> DateTime<Utc> {
    let local = ts.date_naive();
    let first = local.with_day(1).unwrap_or(local);
    first.and_time(NaiveTime::MIN).and_utc()
}

pub fn validate_service_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation { field: "service_name", reason: "required" });
    }
    Ok(())
}

pub fn validate_price(price: i32) -> Result<(), ModelError> {
    if price < 0 {
        return Err(ModelError::Validation { field: "price", reason: "must be >= 0" });
    }
    Ok(())
}
