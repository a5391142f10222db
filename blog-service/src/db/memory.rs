//! In-memory store used by the handler tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ContactRepository, PostRepository, Store};
use crate::models::{ContactMessage, NewPost, Post, PostPayload};

#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<BTreeMap<i32, Post>>,
    contacts: RwLock<Vec<ContactMessage>>,
    // one sequence per table, like SERIAL
    post_seq: RwLock<i32>,
    contact_seq: RwLock<i32>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like an unreachable database
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn post_count(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn contacts(&self) -> Vec<ContactMessage> {
        self.contacts.read().await.clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    async fn next_id(seq: &RwLock<i32>) -> i32 {
        let mut next = seq.write().await;
        *next += 1;
        *next
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Post, sqlx::Error> {
        self.check()?;
        let id = Self::next_id(&self.post_seq).await;
        let row = Post {
            id,
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            cover_photo: post.cover_photo.clone(),
        };
        self.posts.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error> {
        self.check()?;
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        self.check()?;
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn update_post(&self, id: i32, changes: &PostPayload) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut posts = self.posts.write().await;
        match posts.get_mut(&id) {
            Some(post) => {
                post.title = changes.title.clone();
                post.description = changes.description.clone();
                post.content = changes.content.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_post(&self, id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, sqlx::Error> {
        self.check()?;
        let contact = ContactMessage {
            id: Self::next_id(&self.contact_seq).await,
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        };
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_ids_are_sequenced_per_table() {
        let store = MemoryStore::new();
        let post = NewPost {
            title: "A".to_string(),
            description: "B".to_string(),
            content: "C".to_string(),
            cover_photo: None,
        };

        assert_eq!(store.insert_post(&post).await.unwrap().id, 1);
        assert_eq!(store.insert_contact("X", "y@z.com", "hi").await.unwrap().id, 1);
        assert_eq!(store.insert_post(&post).await.unwrap().id, 2);
        assert_eq!(store.insert_contact("X", "y@z.com", "hi").await.unwrap().id, 2);
    }
}
