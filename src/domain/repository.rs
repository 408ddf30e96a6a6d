use crate::domain::models::{Friend, LeaveRequest, LeaveStatus, Transaction};
use crate::domain::user::{User, UserPatch};
use anyhow::Result;
use async_trait::async_trait;

/// Storage contract for user accounts. `insert` assigns the next integer id
/// (one past the current maximum, 1 for an empty collection) and must flush
/// durably before returning.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Matches the email case-insensitively, or the name/surname by
    /// case-insensitive substring.
    async fn search(&self, query: &str) -> Result<Option<User>>;
    async fn update(&self, email: &str, patch: UserPatch) -> Result<Option<User>>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn record(&self, transaction: Transaction) -> Result<()>;
    async fn find_by_sender(&self, email: &str) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait FriendRepository: Send + Sync {
    async fn add(&self, friend: Friend) -> Result<()>;
    async fn find_by_owner(&self, email: &str) -> Result<Vec<Friend>>;
    /// Removes the (owner, friend) pair. Returns whether a record existed.
    async fn remove(&self, owner_email: &str, friend_email: &str) -> Result<bool>;
}

#[async_trait]
pub trait LeaveRequestRepository: Send + Sync {
    async fn insert(&self, request: LeaveRequest) -> Result<LeaveRequest>;
    async fn find_all(&self) -> Result<Vec<LeaveRequest>>;
    async fn find_by_id(&self, id: u32) -> Result<Option<LeaveRequest>>;
    async fn set_status(&self, id: u32, status: LeaveStatus) -> Result<Option<LeaveRequest>>;
}
