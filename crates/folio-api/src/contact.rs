//! Contact form intake.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_shared::{utils::mask_email, AppError};
use serde::{Deserialize, Serialize};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub company: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Trims every field so the length rules apply to the visible text.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self
                .company
                .map(|company| company.trim().to_string())
                .filter(|company| !company.is_empty()),
            message: self.message.trim().to_string(),
        }
    }
}

impl ContactSubmission {
    fn from_form(form: ContactForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            name: form.name,
            email: form.email,
            company: form.company,
            message: form.message,
        }
    }
}

/// Destination for accepted contact submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), AppError>;
}

/// Appends each submission as one JSON line to a local inbox file.
pub struct FileInbox {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileInbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ContactSink for FileInbox {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), AppError> {
        let mut line = serde_json::to_string(submission)
            .map_err(|e| AppError::InternalError(format!("serialize submission: {}", e)))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Normalizes and validates the form, then hands the submission to `sink`.
pub async fn accept(
    form: ContactForm,
    sink: &dyn ContactSink,
) -> Result<ContactSubmission, ApiError> {
    let form = form.normalized();
    form.validate()
        .map_err(|errors| ApiError::ValidationError(describe(&errors)))?;

    let submission = ContactSubmission::from_form(form);
    sink.deliver(&submission).await?;

    info!(
        id = %submission.id,
        email = %mask_email(&submission.email),
        "Contact submission accepted"
    );
    Ok(submission)
}

// "email: email; message: length" style summary, fields sorted for stable output
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{}: {}", field, codes.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}
