use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::subscription::{repository::SeaOrmSubscriptionRepository, SubscriptionService};

/// Shared handler state: one service over one pooled connection handle.
#[derive(Clone)]
pub struct ServerState {
    pub subscriptions: SubscriptionService,
}

impl ServerState {
    pub fn new(subscriptions: SubscriptionService) -> Self {
        Self { subscriptions }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        let repo = SeaOrmSubscriptionRepository { db };
        Self::new(SubscriptionService::new(Arc::new(repo)))
    }
}
