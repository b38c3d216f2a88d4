//! Contact and order intake

use auth::validation;
use common::{
    error::DatabaseError,
    notifications::{NotificationKind, NotificationLedger},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    models::{ContactMessage, ContactSubmission, NewContactMessage},
    repositories::ContactRepository,
};

const CONFIRMATION_MESSAGE: &str =
    "Your message has been received. Our team will contact you soon!";

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Stores contact submissions and confirms them to signed-in senders
#[derive(Clone)]
pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    notifications: NotificationLedger,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepository>, notifications: NotificationLedger) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Validate and store a submission
    pub async fn submit(
        &self,
        user_id: Option<Uuid>,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactError> {
        let message = validate(user_id, submission).map_err(ContactError::Validation)?;
        let stored = self.repository.create(&message).await?;

        info!(message_id = %stored.id, user_id = ?user_id, "Contact message received");

        if let Some(user_id) = user_id {
            self.notifications
                .notify(user_id, NotificationKind::Success, CONFIRMATION_MESSAGE)
                .await?;
        }

        Ok(stored)
    }
}

fn validate(
    user_id: Option<Uuid>,
    submission: ContactSubmission,
) -> Result<NewContactMessage, String> {
    if let Some(name) = &submission.name {
        if name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
    }

    let email = submission.email.trim().to_string();
    validation::validate_email(&email)?;

    let phone = submission.phone.trim().to_string();
    if phone.is_empty() {
        return Err("Phone number is required".to_string());
    }

    let country = validation::normalize_country(&submission.country);
    validation::validate_country(&country)?;

    Ok(NewContactMessage {
        user_id,
        name: submission.name.map(|name| name.trim().to_string()),
        email,
        phone,
        country,
        message: submission.message.filter(|m| !m.trim().is_empty()),
        book_id: submission.book_id.filter(|id| !id.trim().is_empty()),
    })
}
