use crate::domain::models::{FeeSchedule, Transaction, TransferReceipt, TransferRequest};
use crate::domain::repository::TransactionRepository;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const BASE_FEE: f64 = 1.0;
const PERCENTAGE_FEE: f64 = 0.005;

/// Receivers in Gabon are paid out in CFA francs, everyone else in dollars.
fn local_currency(receiver_country: Option<&str>) -> &'static str {
    match receiver_country {
        Some("Gabon") => "XAF",
        _ => "USD",
    }
}

pub struct TransferService {
    transactions: Arc<dyn TransactionRepository>,
}

impl TransferService {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    /// Records the transfer intent. No funds move and no balance is checked;
    /// the returned id is synthesized from the server clock.
    pub async fn record_transfer(&self, req: TransferRequest) -> Result<TransferReceipt> {
        let timestamp = Utc::now();
        let transaction = Transaction {
            local_amount: req.amount.unwrap_or(0.0),
            local_currency: local_currency(req.receiver_country.as_deref()).to_string(),
            recipient: req.recipient,
            recipient_name: req.recipient_name,
            send_method: req.send_method,
            receive_method: req.receive_method,
            sender_country: req.sender_country,
            receiver_country: req.receiver_country,
            timestamp,
            transfer_fee: req.transfer_fee,
            gas_fee: req.gas_fee,
            sender_email: req.sender_email,
        };
        self.transactions.record(transaction).await?;

        let receipt = TransferReceipt {
            transaction_id: format!("mock-transaction-id-{}", timestamp.timestamp_millis()),
        };
        info!(transaction_id = %receipt.transaction_id, "Transfer recorded");
        Ok(receipt)
    }

    pub async fn transactions_for(&self, email: &str) -> Result<Vec<Transaction>> {
        self.transactions.find_by_sender(email).await
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            base_fee: BASE_FEE,
            percentage_fee: PERCENTAGE_FEE,
        }
    }
}
