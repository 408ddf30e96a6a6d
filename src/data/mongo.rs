use crate::domain::models::{Friend, LeaveRequest, LeaveStatus, Transaction};
use crate::domain::repository::{
    FriendRepository, LeaveRequestRepository, TransactionRepository, UserRepository,
};
use crate::domain::user::{User, UserPatch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::{Client, Collection, Database};
use tracing::info;

/// Document-store variant of the entity store. Each mutation is a single
/// durable document write; the collections mirror the JSON snapshot files.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .with_context(|| format!("connecting to MongoDB at {uri}"))?;
        info!(database = db_name, "Connected to MongoDB");
        Ok(Self {
            db: client.database(db_name),
        })
    }

    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository {
            collection: self.db.collection("users"),
        }
    }

    pub fn transactions(&self) -> MongoTransactionRepository {
        MongoTransactionRepository {
            collection: self.db.collection("transactions"),
        }
    }

    pub fn friends(&self) -> MongoFriendRepository {
        MongoFriendRepository {
            collection: self.db.collection("friends"),
        }
    }

    pub fn leave_requests(&self) -> MongoLeaveRequestRepository {
        MongoLeaveRequestRepository {
            collection: self.db.collection("leave-requests"),
        }
    }
}

async fn next_id<E>(collection: &Collection<E>) -> Result<u32>
where
    E: serde::de::DeserializeOwned + serde::Serialize + Send + Sync,
    E: HasId,
{
    let newest = collection.find_one(doc! {}).sort(doc! { "id": -1 }).await?;
    Ok(newest.map(|e| e.id()).unwrap_or(0) + 1)
}

/// Entities that carry a store-assigned integer id.
pub trait HasId {
    fn id(&self) -> u32;
}

impl HasId for User {
    fn id(&self) -> u32 {
        self.id
    }
}

impl HasId for LeaveRequest {
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, mut user: User) -> Result<User> {
        user.id = next_id(&self.collection).await?;
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn search(&self, query: &str) -> Result<Option<User>> {
        // Scan in Rust so the predicate stays identical to the file backend
        let mut cursor = self.collection.find(doc! {}).await?;
        while let Some(user) = cursor.try_next().await? {
            if user.matches_search(query) {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn update(&self, email: &str, patch: UserPatch) -> Result<Option<User>> {
        let Some(mut user) = self.collection.find_one(doc! { "email": email }).await? else {
            return Ok(None);
        };
        user.apply_patch(patch);
        self.collection
            .replace_one(doc! { "email": email }, &user)
            .await?;
        Ok(Some(user))
    }
}

#[derive(Clone)]
pub struct MongoTransactionRepository {
    collection: Collection<Transaction>,
}

#[async_trait]
impl TransactionRepository for MongoTransactionRepository {
    async fn record(&self, transaction: Transaction) -> Result<()> {
        self.collection.insert_one(&transaction).await?;
        Ok(())
    }

    async fn find_by_sender(&self, email: &str) -> Result<Vec<Transaction>> {
        let cursor = self.collection.find(doc! { "senderEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[derive(Clone)]
pub struct MongoFriendRepository {
    collection: Collection<Friend>,
}

#[async_trait]
impl FriendRepository for MongoFriendRepository {
    async fn add(&self, friend: Friend) -> Result<()> {
        self.collection.insert_one(&friend).await?;
        Ok(())
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Friend>> {
        let cursor = self.collection.find(doc! { "userEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn remove(&self, owner_email: &str, friend_email: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_many(doc! { "userEmail": owner_email, "email": friend_email })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[derive(Clone)]
pub struct MongoLeaveRequestRepository {
    collection: Collection<LeaveRequest>,
}

#[async_trait]
impl LeaveRequestRepository for MongoLeaveRequestRepository {
    async fn insert(&self, mut request: LeaveRequest) -> Result<LeaveRequest> {
        request.id = next_id(&self.collection).await?;
        self.collection.insert_one(&request).await?;
        Ok(request)
    }

    async fn find_all(&self) -> Result<Vec<LeaveRequest>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<LeaveRequest>> {
        Ok(self.collection.find_one(doc! { "id": id as i64 }).await?)
    }

    async fn set_status(&self, id: u32, status: LeaveStatus) -> Result<Option<LeaveRequest>> {
        let status = to_bson(&status)?;
        let result = self
            .collection
            .update_one(doc! { "id": id as i64 }, doc! { "$set": { "status": status } })
            .await?;
        if result.matched_count == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}
