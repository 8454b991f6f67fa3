//! Backend entry-point: configuration, tracing, and server bootstrap.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use vetclinic_backend::server::{self, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(|err| std::io::Error::other(err.to_string()))?;
    server::run(config).await
}
