use crate::config::RedisConfig;
use anyhow::Context;
use redis::aio::MultiplexedConnection;
use secrecy::ExposeSecret;

/// Handle to a single multiplexed connection. Cloning shares the connection.
#[derive(Clone)]
pub struct Client {
    pub(crate) conn: MultiplexedConnection,
}

impl Client {
    pub async fn connect(config: &RedisConfig) -> anyhow::Result<Self> {
        let conn = redis::Client::open(config.url.expose_secret().as_str())
            .context("Invalid redis url")?
            .get_multiplexed_tokio_connection()
            .await
            .context("Failed to connect to redis")?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}
