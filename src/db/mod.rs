use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

/// Handle to the exam database, created once at startup and shared by every
/// repository. Pool size and timeouts come from `Config`.
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

fn tune(options: &mut ClientOptions, config: &Config) {
    let timeout = Duration::from_secs(config.mongo_timeout_secs);

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.min_pool_size = Some(config.mongo_min_pool_size);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
}

impl Database {
    /// Connects and pings, so a bad connection string fails at startup rather
    /// than on the first request.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        tune(&mut options, config);

        let db = Self {
            client: Client::with_options(options)?,
            name: config.mongo_db_name.clone(),
        };
        db.ping().await?;

        log::info!(
            "Connected to database '{}' (pool {}..{})",
            db.name,
            config.mongo_min_pool_size,
            config.mongo_max_pool_size
        );
        Ok(db)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.name).collection(collection_name)
    }

    /// Backs the readiness route.
    pub async fn health_check(&self) -> AppResult<()> {
        self.ping().await
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Closes the connection pool. Called once after the HTTP server stops.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("Database connection closed");
    }
}
