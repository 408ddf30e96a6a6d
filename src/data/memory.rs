use crate::domain::models::{Friend, LeaveRequest, LeaveStatus, Transaction};
use crate::domain::repository::{
    FriendRepository, LeaveRequestRepository, TransactionRepository, UserRepository,
};
use crate::domain::user::{User, UserPatch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// In-memory collection with whole-file JSON snapshotting. Every mutation
/// rewrites the backing file before the call returns, so a restart loses at
/// most the in-flight request. With no path the collection is memory-only.
pub struct JsonCollection<E> {
    items: Arc<RwLock<Vec<E>>>,
    path: Option<PathBuf>,
}

impl<E> Clone for JsonCollection<E> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            path: self.path.clone(),
        }
    }
}

impl<E: Serialize + DeserializeOwned + Clone + Send + Sync> JsonCollection<E> {
    pub fn in_memory() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            path: None,
        }
    }

    /// Loads the collection from `path` if the file exists. An unreadable or
    /// unparseable file is logged and treated as empty, matching the
    /// reset-on-error startup of the file variant.
    pub fn open(path: PathBuf) -> Self {
        let items = match load_snapshot(&path) {
            Ok(items) => {
                info!(path = %path.display(), count = items.len(), "Loaded collection snapshot");
                items
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "Error loading collection, starting empty");
                Vec::new()
            }
        };
        Self {
            items: Arc::new(RwLock::new(items)),
            path: Some(path),
        }
    }

    pub async fn with_read<T>(&self, f: impl FnOnce(&[E]) -> T) -> T {
        let items = self.items.read().await;
        f(&items)
    }

    /// Applies `f` under the write lock and flushes the full collection to
    /// disk before returning. The mutation is not observable until the
    /// snapshot is durable.
    pub async fn mutate<T>(&self, f: impl FnOnce(&mut Vec<E>) -> T) -> Result<T> {
        let mut items = self.items.write().await;
        let out = f(&mut items);
        if let Some(path) = &self.path {
            persist_snapshot(path, &items)?;
            debug!(path = %path.display(), count = items.len(), "Collection snapshot written");
        }
        Ok(out)
    }
}

fn load_snapshot<E: DeserializeOwned>(path: &Path) -> Result<Vec<E>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// Whole-file rewrite via a temp file and rename, so a crash mid-write never
/// corrupts the previously committed snapshot.
fn persist_snapshot<E: Serialize>(path: &Path, items: &[E]) -> Result<()> {
    let raw = serde_json::to_string_pretty(items)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw).with_context(|| format!("writing snapshot {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing snapshot {}", path.display()))?;
    Ok(())
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

#[derive(Clone)]
pub struct JsonUserRepository {
    collection: JsonCollection<User>,
}

impl JsonUserRepository {
    pub fn new() -> Self {
        Self {
            collection: JsonCollection::in_memory(),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        Self {
            collection: JsonCollection::open(path),
        }
    }
}

impl Default for JsonUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn insert(&self, mut user: User) -> Result<User> {
        self.collection
            .mutate(|users| {
                user.id = next_id(users.iter().map(|u| u.id));
                users.push(user.clone());
                user
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .collection
            .with_read(|users| users.iter().find(|u| u.email == email).cloned())
            .await)
    }

    async fn search(&self, query: &str) -> Result<Option<User>> {
        Ok(self
            .collection
            .with_read(|users| {
                users.iter().find(|u| u.matches_search(query)).cloned()
            })
            .await)
    }

    async fn update(&self, email: &str, patch: UserPatch) -> Result<Option<User>> {
        self.collection
            .mutate(|users| {
                let user = users.iter_mut().find(|u| u.email == email)?;
                user.apply_patch(patch);
                Some(user.clone())
            })
            .await
    }
}

#[derive(Clone)]
pub struct JsonTransactionRepository {
    collection: JsonCollection<Transaction>,
}

impl JsonTransactionRepository {
    pub fn new() -> Self {
        Self {
            collection: JsonCollection::in_memory(),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        Self {
            collection: JsonCollection::open(path),
        }
    }
}

impl Default for JsonTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionRepository for JsonTransactionRepository {
    async fn record(&self, transaction: Transaction) -> Result<()> {
        self.collection
            .mutate(|transactions| transactions.push(transaction))
            .await
    }

    async fn find_by_sender(&self, email: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .collection
            .with_read(|transactions| {
                transactions
                    .iter()
                    .filter(|tx| tx.sender_email == email)
                    .cloned()
                    .collect()
            })
            .await)
    }
}

#[derive(Clone)]
pub struct JsonFriendRepository {
    collection: JsonCollection<Friend>,
}

impl JsonFriendRepository {
    pub fn new() -> Self {
        Self {
            collection: JsonCollection::in_memory(),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        Self {
            collection: JsonCollection::open(path),
        }
    }
}

impl Default for JsonFriendRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FriendRepository for JsonFriendRepository {
    async fn add(&self, friend: Friend) -> Result<()> {
        self.collection.mutate(|friends| friends.push(friend)).await
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Friend>> {
        Ok(self
            .collection
            .with_read(|friends| {
                friends
                    .iter()
                    .filter(|f| f.user_email == email)
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn remove(&self, owner_email: &str, friend_email: &str) -> Result<bool> {
        self.collection
            .mutate(|friends| {
                let before = friends.len();
                friends.retain(|f| !(f.user_email == owner_email && f.email == friend_email));
                friends.len() < before
            })
            .await
    }
}

#[derive(Clone)]
pub struct JsonLeaveRequestRepository {
    collection: JsonCollection<LeaveRequest>,
}

impl JsonLeaveRequestRepository {
    pub fn new() -> Self {
        Self {
            collection: JsonCollection::in_memory(),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        Self {
            collection: JsonCollection::open(path),
        }
    }
}

impl Default for JsonLeaveRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaveRequestRepository for JsonLeaveRequestRepository {
    async fn insert(&self, mut request: LeaveRequest) -> Result<LeaveRequest> {
        self.collection
            .mutate(|requests| {
                request.id = next_id(requests.iter().map(|r| r.id));
                requests.push(request.clone());
                request
            })
            .await
    }

    async fn find_all(&self) -> Result<Vec<LeaveRequest>> {
        Ok(self.collection.with_read(|requests| requests.to_vec()).await)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<LeaveRequest>> {
        Ok(self
            .collection
            .with_read(|requests| requests.iter().find(|r| r.id == id).cloned())
            .await)
    }

    async fn set_status(&self, id: u32, status: LeaveStatus) -> Result<Option<LeaveRequest>> {
        self.collection
            .mutate(|requests| {
                let request = requests.iter_mut().find(|r| r.id == id)?;
                request.status = status;
                Some(request.clone())
            })
            .await
    }
}
