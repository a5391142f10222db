pub mod contact;
pub mod post;

pub use contact::{ContactMessage, ContactPayload};
pub use post::{NewPost, Post, PostPayload};

use validator::ValidationError;

/// Rejects empty and whitespace-only text fields
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
