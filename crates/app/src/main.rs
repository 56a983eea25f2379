//! Shop demonstration entry point.

use app::{AppError, Config};
use sqlx::postgres::PgPoolOptions;
use storage::{InMemoryStore, PgStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dispatcher = app::default_dispatcher();

    let summary = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await?;
            let store = PgStore::new(pool);
            store.run_migrations().await?;
            tracing::info!(max_connections = config.max_connections, "using PostgreSQL store");
            app::run(store, &dispatcher).await?
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            app::run(InMemoryStore::new(), &dispatcher).await?
        }
    };

    tracing::info!(
        customer_id = %summary.customer_id,
        order_id = %summary.order_id,
        order_total = %summary.order_total,
        orders = summary.orders,
        products = summary.products,
        "demo finished"
    );
    Ok(())
}
