use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Owned handle on the connection pool, shared behind an `Arc`.
///
/// The process opens it at startup and closes it only after the HTTP
/// listener has stopped.
#[cfg(feature = "postgres")]
pub struct DatabaseHandle {
    main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseHandle {
    /// Open the pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connected"
        );

        Ok(Self::from_conn(main))
    }

    /// Wrap an already open connection.
    pub fn from_conn(main: DbConn) -> Self {
        Self { main }
    }

    pub fn conn(&self) -> &DbConn {
        &self.main
    }

    /// Close the pool.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.main.close_by_ref().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
