use log::info;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::env;

/// Redis connection wrapper
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Initialize Redis connection from environment variable
    pub async fn init() -> Result<Self, String> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let client =
            Client::open(redis_url).map_err(|e| format!("Failed to create Redis client: {}", e))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Failed to connect to Redis: {}", e))?;

        info!("Connected successfully to Redis");

        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }
}

/// Redis-backed session store for JWT sessions
#[derive(Clone)]
pub struct RedisService {
    connection: MultiplexedConnection,
}

impl RedisService {
    pub fn new(client: &RedisClient) -> Self {
        Self {
            connection: client.get_connection(),
        }
    }

    /// Store a session token in Redis
    pub async fn store_session(
        &self,
        user_id: &str,
        token: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        let mut conn = self.connection.clone();
        let key = format!("session:{}", user_id);

        conn.set_ex::<_, _, ()>(&key, token, expiry_seconds)
            .await
            .map_err(|e| format!("Failed to store session: {}", e))?;

        // Reverse lookup (token -> user_id) for validation
        let token_key = format!("token:{}", token);
        conn.set_ex::<_, _, ()>(&token_key, user_id, expiry_seconds)
            .await
            .map_err(|e| format!("Failed to store token mapping: {}", e))?;

        Ok(())
    }

    /// Validate a session token, returning the owning user id if present
    pub async fn validate_session(&self, token: &str) -> Result<Option<String>, String> {
        let mut conn = self.connection.clone();
        let token_key = format!("token:{}", token);

        let user_id: Option<String> = conn
            .get(&token_key)
            .await
            .map_err(|e| format!("Failed to validate session: {}", e))?;

        Ok(user_id)
    }

    /// Get a user's current session token
    pub async fn get_session(&self, user_id: &str) -> Result<Option<String>, String> {
        let mut conn = self.connection.clone();
        let key = format!("session:{}", user_id);

        let token: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| format!("Failed to get session: {}", e))?;

        Ok(token)
    }

    /// Invalidate a user's session (logout)
    pub async fn invalidate_session(&self, user_id: &str) -> Result<(), String> {
        let mut conn = self.connection.clone();
        let session_key = format!("session:{}", user_id);

        // Delete the reverse lookup first
        if let Some(token) = self.get_session(user_id).await? {
            let token_key = format!("token:{}", token);
            conn.del::<_, ()>(&token_key)
                .await
                .map_err(|e| format!("Failed to delete token: {}", e))?;
        }

        conn.del::<_, ()>(&session_key)
            .await
            .map_err(|e| format!("Failed to delete session: {}", e))?;

        Ok(())
    }
}

/// Convenience function to connect to Redis
pub async fn connect_to_redis() -> Result<RedisClient, String> {
    RedisClient::init().await
}
