use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row of the `posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub cover_photo: Option<String>,
}

/// Editable post fields, accepted as JSON or as multipart text fields
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "content is required"))]
    pub content: String,
}

impl PostPayload {
    pub fn into_new_post(self, cover_photo: Option<String>) -> NewPost {
        NewPost {
            title: self.title,
            description: self.description,
            content: self.content,
            cover_photo,
        }
    }
}

/// Insert parameters for a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub content: String,
    pub cover_photo: Option<String>,
}
