//! Contact message service

use crate::db::repositories::MessageRepository;
use crate::models::{ContactInput, Message};
use crate::services::content::{all_present, ContentError};
use crate::services::email::NotificationMailer;
use std::sync::Arc;

pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
    mailer: Arc<NotificationMailer>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>, mailer: Arc<NotificationMailer>) -> Self {
        Self { repo, mailer }
    }

    /// Inbox, newest first
    pub async fn list(&self) -> Result<Vec<Message>, ContentError> {
        Ok(self.repo.list().await?)
    }

    /// Store a contact submission, then notify the owner in the background
    pub async fn submit(&self, input: ContactInput) -> Result<Message, ContentError> {
        if !all_present(&[input.name.as_str(), input.email.as_str(), input.message.as_str()]) {
            return Err(ContentError::Validation(
                "Name, email and message are required".to_string(),
            ));
        }

        let message = self.repo.create(&Message::new(input)).await?;
        tracing::info!("New contact message {} from {}", message.id, message.email);

        if self.mailer.is_enabled() {
            let mailer = Arc::clone(&self.mailer);
            let stored = message.clone();
            tokio::spawn(async move {
                mailer.notify_new_message(&stored).await;
            });
        }

        Ok(message)
    }

    pub async fn mark_read(&self, id: &str) -> Result<Message, ContentError> {
        if !self.repo.set_read(id, true).await? {
            return Err(ContentError::NotFound("Message"));
        }
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Message"))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if !self.repo.delete(id).await? {
            return Err(ContentError::NotFound("Message"));
        }
        Ok(())
    }
}
