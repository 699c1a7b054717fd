//! KYC workflow tester
//!
//! Exercises registration, document submission and the admin
//! approve/reject cycle end-to-end, checking that the user-facing status
//! follows each admin decision.

mod backend;
mod types;
mod workflow;

pub use backend::{
    approve_path, reject_path, HttpKycBackend, KycBackend, ADMIN_LIST_PATH, ADMIN_LOGIN_PATH,
    LOGIN_PATH, REGISTER_PATH, STATUS_PATH, SUBMIT_PATH,
};
pub use types::*;
pub use workflow::{WorkflowOptions, WorkflowReport, WorkflowTester, STEPS_TOTAL};
