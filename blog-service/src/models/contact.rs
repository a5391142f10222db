use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row of the `contact_me` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "message is required"))]
    pub message: String,
}
