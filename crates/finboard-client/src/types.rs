//! Wire types of the transactions API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in
    Credit,
    /// Money out
    Debit,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "credit"),
            TransactionType::Debit => write!(f, "debit"),
        }
    }
}

/// Category embedded in a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A single ledger entry as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    /// Served as a JSON number
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_rel: Category,
    /// ISO-8601 date or date-time
    pub date: String,
    pub user_id: i64,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }
}

/// Offset/limit parameters for the list endpoint. Unset fields are omitted
/// so the backend applies its own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn limit(limit: u32) -> Self {
        Self { skip: None, limit: Some(limit) }
    }

    pub fn page(skip: u32, limit: u32) -> Self {
        Self { skip: Some(skip), limit: Some(limit) }
    }

    /// Query pairs in the order the backend documents them
    pub fn to_pairs(&self) -> Vec<(&'static str, u32)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit));
        }
        pairs
    }
}
