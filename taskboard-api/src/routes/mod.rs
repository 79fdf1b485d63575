/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `task`: Task CRUD endpoints
/// - `user`: User CRUD endpoints

pub mod health;
pub mod task;
pub mod user;

use serde::{Deserialize, Serialize};

/// Status payload returned by every mutating endpoint
///
/// The body repeats the HTTP status code alongside a short transaction
/// message, e.g. `{"status_code": 201, "transaction": "Successful"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// HTTP status code of the response
    pub status_code: u16,

    /// Outcome message
    pub transaction: String,
}

impl TransactionStatus {
    /// Creates a status payload
    pub fn new(status_code: u16, transaction: impl Into<String>) -> Self {
        Self {
            status_code,
            transaction: transaction.into(),
        }
    }
}
