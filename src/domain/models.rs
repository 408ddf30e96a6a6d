use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recorded transfer intent. Immutable once stored; no funds move.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub local_amount: f64,
    /// Derived from the receiver country: "Gabon" gets XAF, everything else USD.
    pub local_currency: String,
    pub recipient: String,
    pub recipient_name: Option<String>,
    pub send_method: Option<String>,
    pub receive_method: Option<String>,
    pub sender_country: Option<String>,
    pub receiver_country: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub transfer_fee: Option<f64>,
    pub gas_fee: Option<f64>,
    pub sender_email: String,
}

/// Association record keyed by (userEmail, email). The name fields are a
/// snapshot of the matched user at add time, not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub user_email: String,
    pub email: String,
    pub name: String,
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for LeaveStatus {
    fn default() -> Self {
        LeaveStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: u32,
    pub employee_name: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub timestamp: DateTime<Utc>,
}

/// Seed record matched during admin login and fee-lookup token checks.
/// Loaded once at startup, never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub email: String,
    pub password: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct LeaveStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub base_fee: f64,
    pub percentage_fee: f64,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub amount: Option<f64>,
    #[serde(default)]
    pub recipient: String,
    pub recipient_name: Option<String>,
    pub send_method: Option<String>,
    pub receive_method: Option<String>,
    pub sender_country: Option<String>,
    pub receiver_country: Option<String>,
    pub transfer_fee: Option<f64>,
    pub gas_fee: Option<f64>,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub transaction_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
    pub status: Option<LeaveStatus>,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeaveRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFriendRequest {
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub friend_email: String,
    #[serde(default)]
    pub token: String,
}
