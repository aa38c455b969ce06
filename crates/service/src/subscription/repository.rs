use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::subscription::domain::{NewSubscription, SubscriptionChanges, SubscriptionFilter};
use models::subscription::Model;

/// Data access seam for subscriptions; every method issues one statement.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, new: NewSubscription) -> Result<Model, ServiceError>;
    async fn list(&self, filter: &SubscriptionFilter) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Model>, ServiceError>;
    /// `Ok(None)` when no row has this id.
    async fn update(&self, id: &str, changes: SubscriptionChanges) -> Result<Option<Model>, ServiceError>;
    /// `Ok(false)` when no row was deleted.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn total_price(&self, filter: &SubscriptionFilter) -> Result<i64, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSubscriptionRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn create(&self, new: NewSubscription) -> Result<Model, ServiceError> {
        crate::db::subscription_service::create_subscription(&self.db, new).await
    }

    async fn list(&self, filter: &SubscriptionFilter) -> Result<Vec<Model>, ServiceError> {
        crate::db::subscription_service::list_subscriptions(&self.db, filter).await
    }

    async fn get(&self, id: &str) -> Result<Option<Model>, ServiceError> {
        crate::db::subscription_service::get_subscription(&self.db, id).await
    }

    async fn update(&self, id: &str, changes: SubscriptionChanges) -> Result<Option<Model>, ServiceError> {
        crate::db::subscription_service::update_subscription(&self.db, id, changes).await
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        crate::db::subscription_service::delete_subscription(&self.db, id).await
    }

    async fn total_price(&self, filter: &SubscriptionFilter) -> Result<i64, ServiceError> {
        crate::db::subscription_service::sum_subscription_prices(&self.db, filter).await
    }
}
