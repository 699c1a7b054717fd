//! End-to-end KYC approval/rejection workflow
//!
//! Runs a fixed sequence of calls as two actors and prints progress as it
//! goes. The first failing step ends the run; there are no retries.

use std::time::Duration;

use colored::Colorize;

use crate::client::Credentials;
use crate::common::{unix_timestamp, Error, Result};

use super::backend::KycBackend;
use super::types::{
    find_request, KycId, KycSubmission, TestUser, STATUS_APPROVED, STATUS_PENDING,
    STATUS_REJECTED,
};

const APPROVE_NOTES: &str = "Approved by test script";
const REJECT_NOTES: &str = "Rejected by test script";

/// Number of numbered steps in a complete run
pub const STEPS_TOTAL: usize = 8;

/// Knobs for one workflow run
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub admin: Credentials,
    /// Pause between an admin decision and re-reading the user's status
    pub settle_delay: Duration,
}

/// Outcome of a workflow run
#[derive(Debug)]
pub struct WorkflowReport {
    pub username: String,
    pub steps_run: usize,
    pub steps_total: usize,
    /// Last KYC request the admin acted on
    pub kyc_id: Option<KycId>,
    pub error: Option<String>,
}

impl WorkflowReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// Print the closing verdict
    pub fn print_summary(&self) {
        if self.passed() {
            println!(
                "\n{} {}",
                "✓".green().bold(),
                "All tests passed! The KYC workflow is working correctly."
                    .green()
                    .bold()
            );
        } else {
            println!(
                "\n{} {} ({}/{} steps run)",
                "✗".red().bold(),
                "Some tests failed. Check the output above for details."
                    .red()
                    .bold(),
                self.steps_run,
                self.steps_total
            );
        }
    }
}

/// Drives the workflow against a [`KycBackend`]
pub struct WorkflowTester<B: KycBackend> {
    backend: B,
    user: TestUser,
    options: WorkflowOptions,
    steps_run: usize,
    kyc_id: Option<KycId>,
}

impl<B: KycBackend> WorkflowTester<B> {
    /// Create a tester with a fresh, timestamp-derived test user
    pub fn new(backend: B, options: WorkflowOptions) -> Self {
        Self::with_user(backend, TestUser::from_timestamp(unix_timestamp()), options)
    }

    pub fn with_user(backend: B, user: TestUser, options: WorkflowOptions) -> Self {
        Self {
            backend,
            user,
            options,
            steps_run: 0,
            kyc_id: None,
        }
    }

    pub fn user(&self) -> &TestUser {
        &self.user
    }

    /// Run every step and report; errors never escape this call
    pub async fn run(mut self) -> WorkflowReport {
        println!("\n{}", "=".repeat(60));
        println!("{}", "KYC WORKFLOW TEST".blue().bold());
        println!("{}", "=".repeat(60));

        let outcome = self.run_steps().await;

        let error = match outcome {
            Ok(()) => {
                println!("\n{}", "=".repeat(60));
                println!("{}", "TEST COMPLETE".green().bold());
                println!("{}", "=".repeat(60));
                None
            }
            Err(e) => {
                tracing::warn!(step = self.steps_run, error = %e, "workflow failed");
                println!("   {} Step {}: {}", "✗".red(), self.steps_run, e);
                Some(e.to_string())
            }
        };

        WorkflowReport {
            username: self.user.username,
            steps_run: self.steps_run,
            steps_total: STEPS_TOTAL,
            kyc_id: self.kyc_id,
            error,
        }
    }

    async fn run_steps(&mut self) -> Result<()> {
        self.begin(1, "Creating and logging in test user...");
        self.backend.register(&self.user).await?;
        passed(&format!("User created: {}", self.user.username));
        self.backend.login_user(&self.user.credentials()).await?;
        passed("User logged in");

        self.begin(2, "Checking initial KYC status...");
        let initial = self.observe_status().await;
        note(&format!("Initial KYC status: {}", initial));

        self.begin(3, "Submitting KYC documents...");
        self.submit(false).await?;

        self.begin(4, "Checking KYC status after submission...");
        let submitted = self.observe_status().await;
        note(&format!("Status after submission: {}", submitted));

        self.begin(5, "Logging in as admin...");
        if let Err(e) = self.backend.login_admin(&self.options.admin).await {
            println!(
                "   {} Admin login failed - check admin credentials ({})",
                "✗".red(),
                self.options.admin.username
            );
            return Err(e);
        }
        passed("Admin logged in");

        self.begin(6, "Fetching KYC requests as admin...");
        let id = self.locate_request(None).await?;
        passed(&format!("Found test user's KYC (ID: {})", id));

        self.begin(7, "Testing APPROVAL flow...");
        self.backend.approve(&id, APPROVE_NOTES).await?;
        passed("KYC approved successfully");
        self.expect_status_after_settle(STATUS_APPROVED).await?;

        self.begin(8, "Testing REJECTION flow...");
        note("First, resubmitting KYC as user...");
        self.submit(true).await?;
        tokio::time::sleep(self.options.settle_delay).await;
        let id = self.locate_request(Some(STATUS_PENDING)).await?;
        self.backend.reject(&id, REJECT_NOTES).await?;
        passed("KYC rejected successfully");
        self.expect_status_after_settle(STATUS_REJECTED).await?;

        Ok(())
    }

    fn begin(&mut self, step: usize, title: &str) {
        self.steps_run = step;
        tracing::info!(step, "{}", title);
        println!("\n{} {}", format!("{}.", step).cyan(), title);
    }

    async fn submit(&self, resubmit: bool) -> Result<()> {
        let submission = KycSubmission::from_timestamp(unix_timestamp());
        self.backend.submit_kyc(&submission).await?;
        passed(if resubmit {
            "KYC documents resubmitted successfully"
        } else {
            "KYC documents submitted successfully"
        });
        Ok(())
    }

    /// Read the status for display only; a failed read never ends the run
    async fn observe_status(&self) -> String {
        match self.backend.kyc_status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "status read failed");
                format!("unavailable ({})", e)
            }
        }
    }

    /// Find the test user's request in the admin listing and remember its id
    async fn locate_request(&mut self, status: Option<&str>) -> Result<KycId> {
        let documents = self.backend.list_kyc().await?;
        tracing::debug!(count = documents.len(), "listed KYC requests");

        let found = find_request(&documents, &self.user.username, status)
            .ok_or_else(|| Error::kyc_not_found(&self.user.username, status))?;

        let id = found.id.clone().ok_or_else(|| Error::KycIdMissing {
            username: self.user.username.clone(),
        })?;

        self.kyc_id = Some(id.clone());
        Ok(id)
    }

    async fn expect_status_after_settle(&self, expected: &str) -> Result<()> {
        tokio::time::sleep(self.options.settle_delay).await;

        let status = self.backend.kyc_status().await?;
        note(&format!("User now sees status: {}", status));

        if status != expected {
            return Err(Error::TestAssertion(format!(
                "user status not updated: expected '{}', got '{}'",
                expected, status
            )));
        }

        passed(&format!(
            "User correctly sees {} status!",
            expected.to_uppercase()
        ));
        Ok(())
    }
}

fn passed(message: &str) {
    println!("   {} {}", "✓".green(), message);
}

fn note(message: &str) {
    println!("   {}", message.dimmed());
}
