use sea_orm::{
    ActiveModelTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, NotSet, Set, Statement,
};
use models::subscription::{self, Entity as SubscriptionEntity};
use crate::errors::ServiceError;
use crate::subscription::domain::{NewSubscription, SubscriptionChanges, SubscriptionFilter};

const SELECT_SUBSCRIPTIONS: &str =
    "SELECT id, service_name, price, user_id, start_date, end_date FROM subscriptions";
const SUM_PRICES: &str = "SELECT COALESCE(SUM(price), 0)::BIGINT AS total FROM subscriptions";

#[derive(Debug, FromQueryResult)]
struct TotalRow {
    total: i64,
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// Insert a row with a fresh id; the stored row comes back via `RETURNING`.
pub async fn create_subscription(db: &DatabaseConnection, new: NewSubscription) -> Result<subscription::Model, ServiceError> {
    let am = subscription::ActiveModel {
        id: Set(subscription::new_id()),
        service_name: Set(new.service_name),
        price: Set(new.price),
        user_id: Set(new.user_id),
        start_date: Set(new.start_date),
        end_date: Set(new.end_date),
    };
    am.insert(db).await.map_err(db_err)
}

/// List subscriptions matching the equality filters, in database order.
pub async fn list_subscriptions(db: &DatabaseConnection, filter: &SubscriptionFilter) -> Result<Vec<subscription::Model>, ServiceError> {
    let predicate = filter.list_predicate();
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        format!("{SELECT_SUBSCRIPTIONS} WHERE {}", predicate.sql),
        predicate.values,
    );
    SubscriptionEntity::find().from_raw_sql(stmt).all(db).await.map_err(db_err)
}

/// Get a subscription by id.
pub async fn get_subscription(db: &DatabaseConnection, id: &str) -> Result<Option<subscription::Model>, ServiceError> {
    SubscriptionEntity::find_by_id(id.to_owned()).one(db).await.map_err(db_err)
}

/// Replace the mutable columns; `user_id` is left untouched.
pub async fn update_subscription(
    db: &DatabaseConnection,
    id: &str,
    changes: SubscriptionChanges,
) -> Result<Option<subscription::Model>, ServiceError> {
    let am = subscription::ActiveModel {
        id: Set(id.to_owned()),
        service_name: Set(changes.service_name),
        price: Set(changes.price),
        user_id: NotSet,
        start_date: Set(changes.start_date),
        end_date: Set(changes.end_date),
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(db_err(e)),
    }
}

/// Delete a subscription; returns true if a row was removed.
pub async fn delete_subscription(db: &DatabaseConnection, id: &str) -> Result<bool, ServiceError> {
    let res = SubscriptionEntity::delete_by_id(id.to_owned()).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}

/// Sum of `price` over the filtered rows; zero when nothing matches.
pub async fn sum_subscription_prices(db: &DatabaseConnection, filter: &SubscriptionFilter) -> Result<i64, ServiceError> {
    let predicate = filter.summary_predicate();
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        format!("{SUM_PRICES} WHERE {}", predicate.sql),
        predicate.values,
    );
    let row = TotalRow::find_by_statement(stmt).one(db).await.map_err(db_err)?;
    Ok(row.map(|r| r.total).unwrap_or(0))
}
