//! Candidate path groups

use serde::Deserialize;

/// Candidate paths for one logical resource
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RouteGroup {
    pub name: String,
    pub paths: Vec<String>,
}

impl RouteGroup {
    pub fn new(name: &str, paths: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Built-in groups: account balance and recent transactions
pub fn default_groups() -> Vec<RouteGroup> {
    vec![
        RouteGroup::new(
            "Balance",
            &[
                "/api/dashboard/balance",
                "/api/balance",
                "/api/dashboard/api/balance",
                "/balance",
                "/dashboard/balance",
            ],
        ),
        RouteGroup::new(
            "Transaction",
            &[
                "/api/dashboard/transactions/recent",
                "/api/transactions/recent",
                "/api/dashboard/api/transactions/recent",
                "/transactions/recent",
                "/dashboard/transactions/recent",
            ],
        ),
    ]
}
