use crate::domain::error::DomainError;
use crate::domain::models::{LeaveRequest, LeaveStats, LeaveStatus, SubmitLeaveRequest};
use crate::domain::repository::LeaveRequestRepository;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct LeaveService {
    requests: Arc<dyn LeaveRequestRepository>,
}

impl LeaveService {
    pub fn new(requests: Arc<dyn LeaveRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn submit(&self, req: SubmitLeaveRequest) -> Result<LeaveRequest> {
        let request = LeaveRequest {
            id: 0, // assigned by the store
            employee_name: req.employee_name,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
            status: req.status.unwrap_or_default(),
            timestamp: Utc::now(),
        };
        let request = self.requests.insert(request).await?;
        info!(id = request.id, employee = %request.employee_name, "Leave request submitted");
        Ok(request)
    }

    pub async fn list(&self) -> Result<Vec<LeaveRequest>> {
        self.requests.find_all().await
    }

    pub async fn stats(&self) -> Result<LeaveStats> {
        let requests = self.requests.find_all().await?;
        Ok(LeaveStats {
            total: requests.len(),
            approved: count_status(&requests, LeaveStatus::Approved),
            pending: count_status(&requests, LeaveStatus::Pending),
            rejected: count_status(&requests, LeaveStatus::Rejected),
        })
    }

    /// The only legal transitions are pending to approved and pending to
    /// rejected. Any other target value is invalid input, and a request that
    /// already left pending is frozen.
    pub async fn set_status(&self, id: u32, target: &str) -> Result<LeaveRequest> {
        let status = match target {
            "approved" => LeaveStatus::Approved,
            "rejected" => LeaveStatus::Rejected,
            _ => return Err(DomainError::validation("Invalid status").into()),
        };

        let Some(existing) = self.requests.find_by_id(id).await? else {
            return Err(DomainError::not_found("Leave request not found").into());
        };
        if existing.status != LeaveStatus::Pending {
            return Err(DomainError::validation("Invalid status transition").into());
        }

        let updated = self
            .requests
            .set_status(id, status)
            .await?
            .ok_or_else(|| DomainError::not_found("Leave request not found"))?;
        info!(id = updated.id, status = ?updated.status, "Leave request updated");
        Ok(updated)
    }
}

fn count_status(requests: &[LeaveRequest], status: LeaveStatus) -> usize {
    requests.iter().filter(|r| r.status == status).count()
}
