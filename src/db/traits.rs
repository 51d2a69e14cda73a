//! Database abstraction traits.
//!
//! The [`ChatStore`] trait defines every persistence operation the chat
//! pipeline needs; [`DatabaseProvider`] selects the backing store.

use crate::types::{ChatMessage, MessageRole, PatientMemory, Result};
use async_trait::async_trait;

/// Database provider configuration.
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g. `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a store from this provider configuration.
    pub async fn create_client(&self) -> Result<Box<dyn ChatStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::sqlite::SqliteClient::new_memory().await?;
                Ok(Box::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::sqlite::SqliteClient::new_local(path).await?;
                Ok(Box::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::sqlite::SqliteClient::new_remote(url.clone(), auth_token.clone())
                        .await?;
                Ok(Box::new(client))
            }
        }
    }

    /// Create from environment variables or use defaults.
    pub fn from_env() -> Self {
        #[cfg(feature = "turso")]
        {
            if let (Ok(url), Ok(token)) = (
                std::env::var("TURSO_DATABASE_URL"),
                std::env::var("TURSO_AUTH_TOKEN"),
            ) {
                if !url.is_empty() && !token.is_empty() {
                    return DatabaseProvider::Turso {
                        url,
                        auth_token: token,
                    };
                }
            }
        }

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            if !path.is_empty() && path != ":memory:" {
                return DatabaseProvider::SQLite { path };
            }
        }

        DatabaseProvider::Memory
    }
}

/// Abstract trait for chat persistence.
///
/// Implementations can use different backends; the pipeline only sees this.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Load the memory record for a patient, defaulting when absent.
    async fn load_memory(&self, user_id: &str) -> Result<PatientMemory>;

    /// Upsert the memory record for a patient.
    async fn save_memory(&self, user_id: &str, memory: &PatientMemory) -> Result<()>;

    /// Append one message to the patient's chat history.
    async fn append_message(&self, user_id: &str, role: MessageRole, text: &str) -> Result<()>;

    /// Last `limit` messages for the patient, oldest first.
    async fn recent_history(&self, user_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;

    /// Delete the patient's memory record and chat history.
    async fn clear_user(&self, user_id: &str) -> Result<()>;
}
