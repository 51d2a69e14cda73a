//! libsql-backed chat store.

use crate::db::traits::ChatStore;
use crate::types::{AppError, ChatMessage, MessageRole, PatientMemory, Result};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database};

/// Chat store over a libsql database (in-memory, local file, or remote).
pub struct SqliteClient {
    _db: Database,
    conn: Connection,
}

impl SqliteClient {
    /// Open an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory db: {}", e)))?;

        Self::init(db).await
    }

    /// Open (or create) a local database file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        Self::init(db).await
    }

    /// Connect to a remote Turso database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        Self::init(db).await
    }

    async fn init(db: Database) -> Result<Self> {
        // One connection shared by all operations; for in-memory databases a
        // fresh connection per operation would see a fresh database.
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    fn connection(&self) -> Connection {
        self.conn.clone()
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS patient_memory (
                user_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create patient_memory table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_history (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                role TEXT NOT NULL,
                message TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create chat_history table: {}", e)))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chat_history_user_time
             ON chat_history (user_id, timestamp)",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create history index: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl ChatStore for SqliteClient {
    async fn load_memory(&self, user_id: &str) -> Result<PatientMemory> {
        let conn = self.connection();

        let mut rows = conn
            .query(
                "SELECT data FROM patient_memory WHERE user_id = ?",
                [user_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query memory: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let data: String = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
            serde_json::from_str(&data)
                .map_err(|e| AppError::Database(format!("Corrupt memory record: {}", e)))
        } else {
            Ok(PatientMemory::default())
        }
    }

    async fn save_memory(&self, user_id: &str, memory: &PatientMemory) -> Result<()> {
        let conn = self.connection();
        let data = serde_json::to_string(memory)
            .map_err(|e| AppError::Internal(format!("Failed to serialize memory: {}", e)))?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT OR REPLACE INTO patient_memory (user_id, data, updated_at)
             VALUES (?, ?, ?)",
            (user_id, data, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to save memory: {}", e)))?;

        Ok(())
    }

    async fn append_message(&self, user_id: &str, role: MessageRole, text: &str) -> Result<()> {
        let conn = self.connection();
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO chat_history (id, user_id, role, message, timestamp)
             VALUES (?, ?, ?, ?, ?)",
            (id, user_id, role.as_str(), text, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to append message: {}", e)))?;

        Ok(())
    }

    async fn recent_history(&self, user_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let conn = self.connection();

        // Newest `limit` rows; rowid breaks same-second ties so a user
        // message never trades places with the reply that followed it.
        let mut rows = conn
            .query(
                "SELECT role, message, timestamp FROM chat_history
                 WHERE user_id = ?
                 ORDER BY timestamp DESC, rowid DESC
                 LIMIT ?",
                (user_id, limit as i64),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query history: {}", e)))?;

        let mut messages = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let role_str: String = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
            let role = match role_str.as_str() {
                "assistant" => MessageRole::Assistant,
                _ => MessageRole::User,
            };

            messages.push(ChatMessage {
                role,
                content: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                timestamp: chrono::DateTime::from_timestamp(
                    row.get::<i64>(2)
                        .map_err(|e| AppError::Database(e.to_string()))?,
                    0,
                )
                .unwrap_or_default(),
            });
        }

        messages.reverse();
        Ok(messages)
    }

    async fn clear_user(&self, user_id: &str) -> Result<()> {
        let conn = self.connection();

        conn.execute("DELETE FROM patient_memory WHERE user_id = ?", [user_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to clear memory: {}", e)))?;

        conn.execute("DELETE FROM chat_history WHERE user_id = ?", [user_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to clear history: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_round_trip() {
        let store = SqliteClient::new_memory().await.unwrap();
        let memory = PatientMemory {
            symptoms: vec!["headache".to_string()],
            duration: Some("since yesterday".to_string()),
            severity: None,
        };

        store.save_memory("alice", &memory).await.unwrap();
        let loaded = store.load_memory("alice").await.unwrap();

        assert_eq!(loaded, memory);
    }

    #[tokio::test]
    async fn missing_memory_defaults() {
        let store = SqliteClient::new_memory().await.unwrap();
        let loaded = store.load_memory("nobody").await.unwrap();
        assert_eq!(loaded, PatientMemory::default());
    }

    #[tokio::test]
    async fn save_memory_overwrites() {
        let store = SqliteClient::new_memory().await.unwrap();

        let mut memory = PatientMemory {
            symptoms: vec!["fever".to_string()],
            duration: None,
            severity: None,
        };
        store.save_memory("bob", &memory).await.unwrap();

        memory.symptoms.push("cough".to_string());
        memory.duration = Some("today".to_string());
        store.save_memory("bob", &memory).await.unwrap();

        assert_eq!(store.load_memory("bob").await.unwrap(), memory);
    }

    #[tokio::test]
    async fn history_is_ordered_and_capped() {
        let store = SqliteClient::new_memory().await.unwrap();

        for i in 0..5 {
            store
                .append_message("carol", MessageRole::User, &format!("q{i}"))
                .await
                .unwrap();
            store
                .append_message("carol", MessageRole::Assistant, &format!("a{i}"))
                .await
                .unwrap();
        }

        let history = store.recent_history("carol", 4).await.unwrap();
        let texts: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();

        assert_eq!(texts, vec!["q3", "a3", "q4", "a4"]);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn history_is_scoped_per_user() {
        let store = SqliteClient::new_memory().await.unwrap();
        store
            .append_message("dave", MessageRole::User, "hello")
            .await
            .unwrap();

        assert!(store.recent_history("erin", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_user_removes_everything() {
        let store = SqliteClient::new_memory().await.unwrap();
        let memory = PatientMemory {
            symptoms: vec!["nausea".to_string()],
            duration: None,
            severity: None,
        };
        store.save_memory("frank", &memory).await.unwrap();
        store
            .append_message("frank", MessageRole::User, "I feel sick")
            .await
            .unwrap();

        store.clear_user("frank").await.unwrap();

        assert_eq!(
            store.load_memory("frank").await.unwrap(),
            PatientMemory::default()
        );
        assert!(store.recent_history("frank", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ward.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteClient::new_local(path).await.unwrap();
            let memory = PatientMemory {
                symptoms: vec!["cough".to_string()],
                duration: Some("today".to_string()),
                severity: None,
            };
            store.save_memory("grace", &memory).await.unwrap();
        }

        let store = SqliteClient::new_local(path).await.unwrap();
        let loaded = store.load_memory("grace").await.unwrap();
        assert_eq!(loaded.symptoms, vec!["cough"]);
    }
}
