pub mod admins;
pub mod memory;
pub mod mongo;

use crate::domain::repository::{
    FriendRepository, LeaveRequestRepository, TransactionRepository, UserRepository,
};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// The five collections behind one backend, chosen once at startup. Handlers
/// and services only ever see the trait objects.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub friends: Arc<dyn FriendRepository>,
    pub leave_requests: Arc<dyn LeaveRequestRepository>,
}

impl Repositories {
    /// File variant: one snapshot file per collection under `data_dir`.
    pub fn json_backed(data_dir: &Path) -> Self {
        Self {
            users: Arc::new(memory::JsonUserRepository::open(data_dir.join("users.json"))),
            transactions: Arc::new(memory::JsonTransactionRepository::open(
                data_dir.join("transactions.json"),
            )),
            friends: Arc::new(memory::JsonFriendRepository::open(
                data_dir.join("friends.json"),
            )),
            leave_requests: Arc::new(memory::JsonLeaveRequestRepository::open(
                data_dir.join("leave-requests.json"),
            )),
        }
    }

    /// Memory-only variant used by the test harness.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::JsonUserRepository::new()),
            transactions: Arc::new(memory::JsonTransactionRepository::new()),
            friends: Arc::new(memory::JsonFriendRepository::new()),
            leave_requests: Arc::new(memory::JsonLeaveRequestRepository::new()),
        }
    }

    /// Document-store variant.
    pub async fn mongodb(uri: &str, db_name: &str) -> Result<Self> {
        let store = mongo::MongoStore::connect(uri, db_name).await?;
        Ok(Self {
            users: Arc::new(store.users()),
            transactions: Arc::new(store.transactions()),
            friends: Arc::new(store.friends()),
            leave_requests: Arc::new(store.leave_requests()),
        })
    }
}
