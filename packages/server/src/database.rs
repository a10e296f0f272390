use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::debug;

const MAX_CONNECTIONS: u32 = 20;
const MIN_CONNECTIONS: u32 = 2;

/// Connect to Postgres and create or alter the `video` table to match the entity.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(db_url.to_owned());
    options
        .max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    db.get_schema_registry("tubely::entity::*").sync(&db).await?;
    debug!("Video schema synced");

    Ok(db)
}
