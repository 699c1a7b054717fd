//! Route discovery
//!
//! Logs in once, then GETs every candidate path and records what came
//! back. Nothing here asserts; the output is for a human deciding which
//! path is the real endpoint.

use colored::Colorize;

use crate::client::{ApiResponse, ApiSession, Credentials};
use crate::common::{preview, Result};
use crate::kyc::LOGIN_PATH;

use super::routes::RouteGroup;

/// Characters of body shown for JSON hits
const PREVIEW_CHARS: usize = 100;

/// What one candidate path returned
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub path: String,
    pub status: u16,
    pub content_type: String,
    pub body_parses: bool,
    pub preview: String,
}

impl ProbeResult {
    pub fn from_response(path: &str, response: &ApiResponse) -> Self {
        Self {
            path: path.to_string(),
            status: response.status,
            content_type: response.content_type.clone(),
            body_parses: response.body_parses_as_json(),
            preview: preview(&response.body, PREVIEW_CHARS).to_string(),
        }
    }

    /// A JSON endpoint answers 200 with an `application/json` content type
    pub fn is_json(&self) -> bool {
        self.status == 200 && self.content_type.contains("application/json")
    }

    fn print(&self) {
        println!("{}", self.path.bold());
        println!("  Status: {}", self.status);
        println!("  Content-Type: {}", self.content_type);
        println!("  Is JSON: {}", self.is_json());
        println!("  Body parses as JSON: {}", self.body_parses);
        if self.is_json() {
            println!(
                "  {} {}",
                "✓".green(),
                "SUCCESS - Valid JSON endpoint found!".green()
            );
            println!("  Response: {}", self.preview.dimmed());
        }
        println!();
    }
}

/// Results for one route group
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub name: String,
    pub results: Vec<ProbeResult>,
}

impl GroupReport {
    /// Paths that behaved like JSON endpoints
    pub fn json_endpoints(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_json())
            .map(|r| r.path.as_str())
            .collect()
    }
}

/// Log in with `credentials`, then probe every group in order
pub async fn probe_routes(
    session: &ApiSession,
    credentials: &Credentials,
    groups: &[RouteGroup],
) -> Result<Vec<GroupReport>> {
    println!("Logging in...");
    let login = session.post_json(LOGIN_PATH, credentials).await?;
    if login.status != 200 {
        println!("{}", "Login failed".red());
    }
    login.expect_status("Probe login", 200)?;
    println!("{}\n", "Login successful".green());

    let mut reports = Vec::with_capacity(groups.len());
    for group in groups {
        reports.push(probe_group(session, group).await?);
    }

    print_summary(&reports);
    Ok(reports)
}

/// GET every path of one group
pub async fn probe_group(session: &ApiSession, group: &RouteGroup) -> Result<GroupReport> {
    println!("\n{}", format!("Testing {} Endpoints:", group.name).cyan());
    println!("{}", "-".repeat(40));

    let mut results = Vec::with_capacity(group.paths.len());
    for path in &group.paths {
        let response = session.get(path).await?;
        let result = ProbeResult::from_response(path, &response);
        tracing::debug!(path = %path, status = result.status, json = result.is_json(), "probed");
        result.print();
        results.push(result);
    }

    Ok(GroupReport {
        name: group.name.clone(),
        results,
    })
}

fn print_summary(reports: &[GroupReport]) {
    println!("{}", "Summary:".cyan());
    for report in reports {
        let found = report.json_endpoints();
        if found.is_empty() {
            println!("  {} {}: no JSON endpoint found", "✗".red(), report.name);
        } else {
            println!("  {} {}: {}", "✓".green(), report.name, found.join(", "));
        }
    }
}
