//! Redis conversation store implementation.
//!
//! Implements `ConversationStore` from `chatrelay-core` with one Redis list
//! per chat. Each list element is a JSON-encoded turn; `RPUSH` appends and
//! `LRANGE 0 -1` reads the whole history back in order.

use chatrelay_core::storage::conversation_store::{ConversationStore, history_key};
use chatrelay_types::chat::ChatId;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::turn::Turn;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo, RedisError};
use secrecy::{ExposeSecret, SecretString};

/// Redis-backed implementation of `ConversationStore`.
///
/// Holds a multiplexed [`ConnectionManager`] that reconnects on failure and
/// is cheap to clone, so one store is shared by every request.
#[derive(Clone)]
pub struct RedisConversationStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisConversationStore {
    /// Connect to Redis at `redis_url`, overriding the URL's password with
    /// `password` when one is given.
    pub async fn connect(
        redis_url: &str,
        password: Option<&SecretString>,
        key_prefix: impl Into<String>,
    ) -> Result<Self, RepositoryError> {
        let mut info = redis_url
            .into_connection_info()
            .map_err(|e| RepositoryError::Connection(format!("invalid redis URL: {e}")))?;
        if let Some(password) = password {
            info.redis.password = Some(password.expose_secret().to_string());
        }

        let client = redis::Client::open(info).map_err(map_redis_error)?;
        let conn = ConnectionManager::new(client).await.map_err(map_redis_error)?;

        tracing::info!(addr = %redacted_addr(redis_url), "Connected to Redis");

        Ok(Self {
            conn,
            key_prefix: key_prefix.into(),
        })
    }

    fn key(&self, chat_id: ChatId) -> String {
        history_key(&self.key_prefix, chat_id)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn map_redis_error(err: RedisError) -> RepositoryError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        RepositoryError::Connection(err.to_string())
    } else {
        RepositoryError::Query(err.to_string())
    }
}

/// Serialize turns into list elements.
fn encode_turns(turns: &[Turn]) -> Result<Vec<String>, RepositoryError> {
    turns
        .iter()
        .map(|turn| {
            serde_json::to_string(turn)
                .map_err(|e| RepositoryError::Serialization(format!("failed to encode turn: {e}")))
        })
        .collect()
}

/// Deserialize list elements, skipping any that are not valid turns.
fn decode_turns(key: &str, raw: Vec<String>) -> Vec<Turn> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_str::<Turn>(&value) {
            Ok(turn) => Some(turn),
            Err(e) => {
                tracing::warn!(key = %key, index, error = %e, "Skipping undecodable history entry");
                None
            }
        })
        .collect()
}

/// Host part of a Redis URL without any userinfo, for logging.
fn redacted_addr(redis_url: &str) -> &str {
    let rest = redis_url.split_once("://").map_or(redis_url, |(_, rest)| rest);
    rest.rsplit_once('@').map_or(rest, |(_, host)| host)
}

// ---------------------------------------------------------------------------
// ConversationStore implementation
// ---------------------------------------------------------------------------

impl ConversationStore for RedisConversationStore {
    async fn fetch(&self, chat_id: ChatId) -> Result<Vec<Turn>, RepositoryError> {
        let key = self.key(chat_id);
        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn.lrange(&key, 0, -1).await.map_err(map_redis_error)?;

        Ok(decode_turns(&key, raw))
    }

    async fn append(&self, chat_id: ChatId, turns: &[Turn]) -> Result<(), RepositoryError> {
        if turns.is_empty() {
            return Ok(());
        }

        let values = encode_turns(turns)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .rpush(self.key(chat_id), values)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }

    async fn clear(&self, chat_id: ChatId) -> Result<(), RepositoryError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.key(chat_id)).await.map_err(map_redis_error)?;

        Ok(())
    }
}
