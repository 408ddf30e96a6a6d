use crate::domain::error::DomainError;
use crate::domain::models::Friend;
use crate::domain::repository::{FriendRepository, UserRepository};
use crate::domain::user::User;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub struct FriendService {
    users: Arc<dyn UserRepository>,
    friends: Arc<dyn FriendRepository>,
}

impl FriendService {
    pub fn new(users: Arc<dyn UserRepository>, friends: Arc<dyn FriendRepository>) -> Self {
        Self { users, friends }
    }

    pub async fn search(&self, query: &str) -> Result<Option<User>> {
        self.users.search(query).await
    }

    /// Resolves the search query to a user and stores a snapshot of their
    /// identity under the owner's list. Returns the matched user.
    pub async fn add_friend(&self, owner_email: &str, query: &str) -> Result<User> {
        let Some(user) = self.users.search(query).await? else {
            return Err(DomainError::not_found("User not found").into());
        };
        self.friends
            .add(Friend {
                user_email: owner_email.to_string(),
                email: user.email.clone(),
                name: user.name.clone(),
                surname: user.surname.clone(),
            })
            .await?;
        info!(owner = owner_email, friend = %user.email, "Friend added");
        Ok(user)
    }

    /// Succeeds whether or not the pair existed.
    pub async fn remove_friend(&self, owner_email: &str, friend_email: &str) -> Result<()> {
        let removed = self.friends.remove(owner_email, friend_email).await?;
        if removed {
            info!(owner = owner_email, friend = friend_email, "Friend removed");
        }
        Ok(())
    }

    pub async fn friends_of(&self, owner_email: &str) -> Result<Vec<Friend>> {
        self.friends.find_by_owner(owner_email).await
    }
}
