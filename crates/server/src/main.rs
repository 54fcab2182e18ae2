use std::sync::Arc;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use legenda_core::FetchConfig;

use legenda_server::config::ServerConfig;
use legenda_server::fetcher::HttpFetcher;
use legenda_server::service::ArticleService;
use legenda_server::store::{self, ArticleStore, BlobStore, PgArticleStore, PgBlobStore};
use legenda_server::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legenda_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let pg_config: tokio_postgres::Config = config.database_url.parse()?;
    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig { recycling_method: RecyclingMethod::Fast },
    );
    let pool = Pool::builder(manager).max_size(16).build()?;

    store::init_schema(&pool).await?;

    let blobs: Arc<dyn BlobStore> = Arc::new(PgBlobStore::new(pool.clone(), config.public_base_url.clone()));
    let articles: Arc<dyn ArticleStore> = Arc::new(PgArticleStore::new(pool));
    let fetcher = Arc::new(HttpFetcher::new(
        blobs.clone(),
        FetchConfig { timeout: config.fetch_timeout, ..Default::default() },
    ));

    let service = Arc::new(ArticleService::new(articles, blobs, fetcher));
    let app = routes::build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "legenda server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
