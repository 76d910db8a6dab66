//! Route modules for the API server
//!
//! - transactions: dashboard page and the per-view HTMX endpoints

pub mod transactions;
