#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};
use configs::AppConfig;
use models::db::connect_with_config;
use models::subscription;

// Ensure the table is created only once across the entire test process
static SCHEMA_READY: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<AppConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
    let _ = dotenvy::dotenv();
    match AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!("skip: no database configured: {}", e);
            None
        }
    }
}

async fn ensure_table(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(subscription::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Fresh connection for the current test's runtime, or `None` when no database is available.
pub async fn get_db() -> Option<DatabaseConnection> {
    let cfg = test_config()?;
    let ready = SCHEMA_READY
        .get_or_init(|| async {
            match connect_with_config(&cfg.database).await {
                Ok(db) => match ensure_table(&db).await {
                    Ok(()) => true,
                    Err(e) => { eprintln!("skip: cannot create subscriptions table: {}", e); false }
                },
                Err(e) => { eprintln!("skip: cannot connect to db: {}", e); false }
            }
        })
        .await;
    if !*ready { return None; }
    connect_with_config(&cfg.database).await.ok()
}
