//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the end-to-end KYC approval/rejection workflow
    Workflow {
        #[command(flatten)]
        server: ServerArgs,

        /// Admin username (default from config, else "admin")
        #[arg(long)]
        admin_user: Option<String>,

        /// Admin password (default from config, else "admin123")
        #[arg(long)]
        admin_password: Option<String>,

        /// Milliseconds to wait after approve/reject before re-reading status
        #[arg(long)]
        settle_ms: Option<u64>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,

        /// Exit with a non-zero status when the workflow fails
        #[arg(long)]
        fail_exit_code: bool,
    },

    /// Probe candidate paths to find which serve JSON
    Probe {
        #[command(flatten)]
        server: ServerArgs,

        /// Account to log in with before probing
        #[arg(long)]
        username: Option<String>,

        /// Password for --username
        #[arg(long)]
        password: Option<String>,
    },

    /// List the candidate path groups without sending any request
    Routes,
}

/// Backend location override shared by the networked commands
#[derive(Args)]
pub struct ServerArgs {
    /// Base URL of the backend (default from config, else http://localhost:5000)
    #[arg(long)]
    pub base_url: Option<String>,
}
