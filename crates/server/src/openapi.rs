use chrono::{DateTime, Utc};
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::subscriptions::{MessageOutput, SummaryOutput};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SubscriptionDoc {
    #[schema(example = "6f1c2d3e-4b5a-4c7d-8e9f-0a1b2c3d4e5f")]
    pub id: String,
    #[schema(example = "Netflix")]
    pub service_name: String,
    #[schema(example = 15)]
    pub price: i32,
    #[schema(example = "60601fee-2bf1-4721-ae6f-7636e79a0cba")]
    pub user_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(ToSchema)]
pub struct CreateSubscriptionDoc {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(ToSchema)]
pub struct UpdateSubscriptionDoc {
    pub service_name: String,
    pub price: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Subscription Service API", description = "CRUD and price summary for user subscriptions"),
    paths(
        crate::routes::health,
        crate::routes::subscriptions::create,
        crate::routes::subscriptions::list,
        crate::routes::subscriptions::get,
        crate::routes::subscriptions::update,
        crate::routes::subscriptions::delete,
        crate::routes::subscriptions::summary,
    ),
    components(
        schemas(
            HealthResponse,
            SubscriptionDoc,
            CreateSubscriptionDoc,
            UpdateSubscriptionDoc,
            SummaryOutput,
            MessageOutput,
        )
    ),
    tags(
        (name = "health"),
        (name = "subscriptions")
    )
)]
pub struct ApiDoc;
