//! Order persistence through an external store.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::OrderRecord;
use crate::error::{QuoteError, Result};

/// Failure reported by an order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Worth retrying (timeouts, connection drops).
    #[error("transient store failure: {0}")]
    Transient(String),

    /// The store refused the record; retrying will not help.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    /// Attempts it took, at least 1.
    pub attempts: u32,
}

/// Somewhere orders can be written.
pub trait OrderStore {
    /// Insert one order and return its id.
    fn insert_order(&mut self, record: &OrderRecord) -> std::result::Result<String, StoreError>;
}

/// How often to retry transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles after each failure.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Retry `max_attempts` times without waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
        }
    }
}

/// Write an order, retrying transient failures.
pub fn submit_order<S: OrderStore + ?Sized>(
    store: &mut S,
    record: &OrderRecord,
    policy: RetryPolicy,
) -> Result<OrderReceipt> {
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = policy.initial_backoff;
    let mut attempt = 1;

    loop {
        match store.insert_order(record) {
            Ok(order_id) => {
                tracing::info!("Order {} stored for user {}", order_id, record.user_id);
                return Ok(OrderReceipt {
                    order_id,
                    attempts: attempt,
                });
            }
            Err(StoreError::Transient(message)) if attempt < max_attempts => {
                tracing::warn!(
                    "Order store attempt {}/{} failed: {}",
                    attempt,
                    max_attempts,
                    message
                );
                if !backoff.is_zero() {
                    std::thread::sleep(backoff);
                    backoff *= 2;
                }
                attempt += 1;
            }
            Err(err) => {
                return Err(QuoteError::Store {
                    message: format!("{} (after {} attempt(s))", err, attempt),
                });
            }
        }
    }
}

/// Keeps orders in memory.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    records: Vec<OrderRecord>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored orders in insertion order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert_order(&mut self, record: &OrderRecord) -> std::result::Result<String, StoreError> {
        self.records.push(record.clone());
        Ok(format!("order-{:04}", self.records.len()))
    }
}

/// Appends one JSON record per line to a file.
#[derive(Debug, Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored order back.
    pub fn load(&self) -> Result<Vec<OrderRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(std::fs::File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(&line)?);
            }
        }
        Ok(records)
    }

    fn count_lines(&self) -> std::io::Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let reader = BufReader::new(std::fs::File::open(&self.path)?);
        Ok(reader
            .lines()
            .map_while(|l| l.ok())
            .filter(|l| !l.trim().is_empty())
            .count())
    }
}

impl OrderStore for JsonFileOrderStore {
    fn insert_order(&mut self, record: &OrderRecord) -> std::result::Result<String, StoreError> {
        let line =
            serde_json::to_string(record).map_err(|e| StoreError::Rejected(e.to_string()))?;
        let existing = self
            .count_lines()
            .map_err(|e| StoreError::Transient(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Transient(e.to_string()))?;
        writeln!(file, "{}", line).map_err(|e| StoreError::Transient(e.to_string()))?;

        Ok(format!("order-{:04}", existing + 1))
    }
}
