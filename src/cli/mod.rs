//! CLI command handling
//!
//! Merges command-line overrides into the loaded configuration and
//! dispatches to the workflow tester or the route prober.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::client::ApiSession;
use crate::commands::{Commands, ServerArgs};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::kyc::{HttpKycBackend, WorkflowOptions, WorkflowReport, WorkflowTester};
use crate::probe::probe_routes;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Workflow {
            server,
            admin_user,
            admin_password,
            settle_ms,
            yes,
            fail_exit_code,
        } => {
            apply_server(&mut config, server);
            if let Some(user) = admin_user {
                config.admin.username = user;
            }
            if let Some(password) = admin_password {
                config.admin.password = password;
            }
            if let Some(ms) = settle_ms {
                config.timeouts.settle_ms = ms;
            }

            print_workflow_intro();
            if !yes {
                confirm("Press Enter to start the test (make sure backend is running)...")?;
            }

            let report = run_workflow(&config).await?;
            workflow_outcome(&report, fail_exit_code)
        }

        Commands::Probe {
            server,
            username,
            password,
        } => {
            apply_server(&mut config, server);
            if let Some(user) = username {
                config.probe.username = user;
            }
            if let Some(password) = password {
                config.probe.password = password;
            }

            let session = ApiSession::new(
                &config.server.base_url,
                config.timeouts.request_timeout(),
            )?;
            probe_routes(&session, &config.probe.credentials(), &config.probe.groups).await?;
            Ok(())
        }

        Commands::Routes => {
            for group in &config.probe.groups {
                println!("{}:", group.name.bold());
                for path in &group.paths {
                    println!("  {}", path);
                }
            }
            Ok(())
        }
    }
}

/// Run the workflow with fresh user and admin sessions
///
/// A failed run is still `Ok`: the report and its printed summary carry
/// the verdict.
pub async fn run_workflow(config: &Config) -> Result<WorkflowReport> {
    let timeout = config.timeouts.request_timeout();
    let backend = HttpKycBackend::new(
        ApiSession::new(&config.server.base_url, timeout)?,
        ApiSession::new(&config.server.base_url, timeout)?,
    );
    let options = WorkflowOptions {
        admin: config.admin.credentials(),
        settle_delay: config.timeouts.settle_delay(),
    };

    let tester = WorkflowTester::new(backend, options);
    tracing::info!(
        base_url = %config.server.base_url,
        username = %tester.user().username,
        "starting KYC workflow"
    );

    let report = tester.run().await;
    report.print_summary();
    Ok(report)
}

/// A failed run only becomes an error when the caller opted into a
/// non-zero exit status
fn workflow_outcome(report: &WorkflowReport, fail_exit_code: bool) -> Result<()> {
    if report.passed() || !fail_exit_code {
        return Ok(());
    }
    Err(Error::TestAssertion(format!(
        "KYC workflow failed at step {}/{}",
        report.steps_run, report.steps_total
    )))
}

fn apply_server(config: &mut Config, server: ServerArgs) {
    if let Some(url) = server.base_url {
        config.server.base_url = url;
    }
}

fn print_workflow_intro() {
    println!("\n{}", "KYC Workflow Test".blue().bold());
    println!("This will test the complete KYC workflow including:");
    println!("- User KYC submission");
    println!("- Admin approval/rejection");
    println!("- User status updates");
}

/// Block until the operator presses Enter
fn confirm(prompt: &str) -> Result<()> {
    print!("\n{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
