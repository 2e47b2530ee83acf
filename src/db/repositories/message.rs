//! Contact message repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

const SELECT_MESSAGE: &str = "SELECT id, name, email, message, is_read, created_at FROM messages";

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &Message) -> Result<Message>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Message>>;
    /// Newest first
    async fn list(&self) -> Result<Vec<Message>>;
    /// Returns false when no row matched
    async fn set_read(&self, id: &str, read: bool) -> Result<bool>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub struct SqlxMessageRepository {
    pool: DynDatabasePool,
}

impl SqlxMessageRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn MessageRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl MessageRepository for SqlxMessageRepository {
    async fn create(&self, message: &Message) -> Result<Message> {
        let sql = "INSERT INTO messages (id, name, email, message, is_read, created_at) VALUES (?, ?, ?, ?, ?, ?)";
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query(sql)
                    .bind(&message.id)
                    .bind(&message.name)
                    .bind(&message.email)
                    .bind(&message.message)
                    .bind(message.read)
                    .bind(message.created_at)
                    .execute(pool)
                    .await
                    .context("Failed to create message")?;
            }
            Backend::Mysql(pool) => {
                sqlx::query(sql)
                    .bind(&message.id)
                    .bind(&message.name)
                    .bind(&message.email)
                    .bind(&message.message)
                    .bind(message.read)
                    .bind(message.created_at)
                    .execute(pool)
                    .await
                    .context("Failed to create message")?;
            }
        }
        Ok(message.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Message>> {
        let sql = format!("{} WHERE id = ?", SELECT_MESSAGE);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get message")?;
                Ok(row.map(|r| row_to_message_sqlite(&r)))
            }
            Backend::Mysql(pool) => {
                let row = sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get message")?;
                Ok(row.map(|r| row_to_message_mysql(&r)))
            }
        }
    }

    async fn list(&self) -> Result<Vec<Message>> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_MESSAGE);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                let rows = sqlx::query(&sql)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list messages")?;
                Ok(rows.iter().map(row_to_message_sqlite).collect())
            }
            Backend::Mysql(pool) => {
                let rows = sqlx::query(&sql)
                    .fetch_all(pool)
                    .await
                    .context("Failed to list messages")?;
                Ok(rows.iter().map(row_to_message_mysql).collect())
            }
        }
    }

    async fn set_read(&self, id: &str, read: bool) -> Result<bool> {
        let sql = "UPDATE messages SET is_read = ? WHERE id = ?";
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query(sql)
                .bind(read)
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to update message")?
                .rows_affected(),
            // MySQL reports zero affected rows when the value is unchanged
            Backend::Mysql(pool) => {
                let exists = sqlx::query("SELECT id FROM messages WHERE id = ?")
                    .bind(id)
                    .fetch_optional(pool)
                    .await
                    .context("Failed to get message")?
                    .is_some();
                if !exists {
                    return Ok(false);
                }
                sqlx::query(sql)
                    .bind(read)
                    .bind(id)
                    .execute(pool)
                    .await
                    .context("Failed to update message")?;
                1
            }
        };
        Ok(affected > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let affected = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query("DELETE FROM messages WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete message")?
                .rows_affected(),
            Backend::Mysql(pool) => sqlx::query("DELETE FROM messages WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await
                .context("Failed to delete message")?
                .rows_affected(),
        };
        Ok(affected > 0)
    }
}

fn row_to_message_sqlite(row: &sqlx::sqlite::SqliteRow) -> Message {
    Message {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        message: row.get("message"),
        read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}

fn row_to_message_mysql(row: &sqlx::mysql::MySqlRow) -> Message {
    Message {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        message: row.get("message"),
        read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}
