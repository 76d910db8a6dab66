//! Contract probe: checks that a backend serves the API shape the dashboard relies on

use log::{info, warn};

use crate::client::ApiClient;
use crate::types::ListQuery;

/// What the probe expects from the backend
#[derive(Debug, Clone)]
pub struct ProbeExpectations {
    /// Item count of the unparameterised list, when known
    pub expected_total: Option<usize>,
    pub sample_id: i64,
    /// Description of the sample transaction, when known
    pub expected_description: Option<String>,
    pub skip: u32,
    pub limit: u32,
    pub origin: String,
}

impl Default for ProbeExpectations {
    fn default() -> Self {
        Self {
            expected_total: None,
            sample_id: 1,
            expected_description: None,
            skip: 5,
            limit: 10,
            origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckOutcome {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, passed: true, detail: detail.into() }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, passed: false, detail: detail.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl ProbeReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Run every check against the backend behind `client`. Checks are
/// independent; a failing one does not stop the rest.
pub async fn run_probe(client: &ApiClient, expect: &ProbeExpectations) -> ProbeReport {
    let outcomes = vec![
        check_health(client).await,
        check_list(client, expect).await,
        check_sample(client, expect).await,
        check_pagination(client, expect).await,
        check_cors(client, expect).await,
    ];

    for outcome in &outcomes {
        if outcome.passed {
            info!("[probe] PASS {}: {}", outcome.name, outcome.detail);
        } else {
            warn!("[probe] FAIL {}: {}", outcome.name, outcome.detail);
        }
    }

    ProbeReport { outcomes }
}

async fn check_health(client: &ApiClient) -> CheckOutcome {
    const NAME: &str = "health";
    match client.health().await {
        Ok(()) => CheckOutcome::pass(NAME, "health endpoint responded"),
        Err(e) => CheckOutcome::fail(NAME, e.to_string()),
    }
}

async fn check_list(client: &ApiClient, expect: &ProbeExpectations) -> CheckOutcome {
    const NAME: &str = "list";
    match client.list(ListQuery::default()).await {
        Ok(items) => match expect.expected_total {
            Some(total) if items.len() != total => {
                CheckOutcome::fail(NAME, format!("expected {} transactions, got {}", total, items.len()))
            }
            _ => CheckOutcome::pass(NAME, format!("{} transactions", items.len())),
        },
        Err(e) => CheckOutcome::fail(NAME, e.to_string()),
    }
}

async fn check_sample(client: &ApiClient, expect: &ProbeExpectations) -> CheckOutcome {
    const NAME: &str = "transaction-by-id";
    // category_rel is a required field of Transaction, so a decoded
    // transaction always carries it
    match client.get(expect.sample_id).await {
        Ok(tx) => match &expect.expected_description {
            Some(description) if &tx.description != description => CheckOutcome::fail(
                NAME,
                format!("expected description {:?}, got {:?}", description, tx.description),
            ),
            _ => CheckOutcome::pass(
                NAME,
                format!("#{} {:?} in category {:?}", tx.id, tx.description, tx.category_rel.name),
            ),
        },
        Err(e) => CheckOutcome::fail(NAME, e.to_string()),
    }
}

async fn check_pagination(client: &ApiClient, expect: &ProbeExpectations) -> CheckOutcome {
    const NAME: &str = "pagination";
    match client.list(ListQuery::page(expect.skip, expect.limit)).await {
        Ok(items) if items.len() == expect.limit as usize => CheckOutcome::pass(
            NAME,
            format!("skip={} limit={} returned {}", expect.skip, expect.limit, items.len()),
        ),
        Ok(items) => CheckOutcome::fail(
            NAME,
            format!("skip={} limit={} returned {}", expect.skip, expect.limit, items.len()),
        ),
        Err(e) => CheckOutcome::fail(NAME, e.to_string()),
    }
}

async fn check_cors(client: &ApiClient, expect: &ProbeExpectations) -> CheckOutcome {
    const NAME: &str = "cors";
    match client.cors_allow_origin(&expect.origin).await {
        Ok(Some(value)) if value == "*" => CheckOutcome::pass(NAME, "Access-Control-Allow-Origin: *"),
        Ok(Some(value)) => CheckOutcome::fail(NAME, format!("Access-Control-Allow-Origin: {}", value)),
        Ok(None) => CheckOutcome::fail(NAME, "Access-Control-Allow-Origin header missing"),
        Err(e) => CheckOutcome::fail(NAME, e.to_string()),
    }
}
