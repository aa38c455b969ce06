use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::subscription::domain::{
    CreateSubscriptionInput, NewSubscription, SubscriptionChanges, SubscriptionFilter, UpdateSubscriptionInput,
};
use crate::subscription::repository::SubscriptionRepository;
use models::subscription::{self, Model};

/// Application service encapsulating subscription business rules.
///
/// Create and update share one policy: `service_name` must be non-blank,
/// `price` non-negative, and `start_date` is moved to the first of its month.
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(user_id = %input.user_id, service_name = %input.service_name))]
    pub async fn create(&self, input: CreateSubscriptionInput) -> Result<Model, ServiceError> {
        subscription::validate_service_name(&input.service_name)?;
        subscription::validate_price(input.price)?;
        let new = NewSubscription {
            service_name: input.service_name,
            price: input.price,
            user_id: input.user_id,
            start_date: subscription::month_start(input.start_date),
            end_date: input.end_date.map(|d| d.with_timezone(&Utc)),
        };
        debug!(start_date = %new.start_date, "normalized start_date");
        self.repo.create(new).await
    }

    pub async fn list(&self, filter: &SubscriptionFilter) -> Result<Vec<Model>, ServiceError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Model>, ServiceError> { self.repo.get(id).await }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateSubscriptionInput) -> Result<Model, ServiceError> {
        subscription::validate_service_name(&input.service_name)?;
        subscription::validate_price(input.price)?;
        let changes = SubscriptionChanges {
            service_name: input.service_name,
            price: input.price,
            start_date: subscription::month_start(input.start_date),
            end_date: input.end_date.map(|d| d.with_timezone(&Utc)),
        };
        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("subscription"))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.repo.delete(id).await }

    pub async fn summary(&self, filter: &SubscriptionFilter) -> Result<i64, ServiceError> {
        self.repo.total_price(filter).await
    }
}
