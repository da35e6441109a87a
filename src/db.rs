use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    // Every pooled connection to `:memory:` opens its own empty database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    // sqlx turns `foreign_keys` on for each SQLite connection it opens.
    let db = Database::connect(options).await?;

    execute(&db, "PRAGMA journal_mode=WAL").await?;
    execute(&db, "PRAGMA synchronous=NORMAL").await?;

    Migrator::up(&db, None).await?;
    tracing::debug!("migrations applied");
    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> AppResult<()> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string())).await?;
    Ok(())
}
