//! KYC review API seen from the two actors
//!
//! [`KycBackend`] is the seam the workflow is written against;
//! [`HttpKycBackend`] is the real implementation over two independent
//! [`ApiSession`]s.

use async_trait::async_trait;

use crate::client::{ApiSession, Credentials};
use crate::common::Result;

use super::types::{
    KycDocument, KycId, KycListing, KycStatusResponse, KycSubmission, ReviewNotes, TestUser,
};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const STATUS_PATH: &str = "/api/kyc/status";
pub const SUBMIT_PATH: &str = "/api/kyc/submit";
pub const ADMIN_LOGIN_PATH: &str = "/api/admin/login";
pub const ADMIN_LIST_PATH: &str = "/api/admin/kyc/all";

pub fn approve_path(id: &KycId) -> String {
    format!("/api/admin/kyc/{}/approve", id)
}

pub fn reject_path(id: &KycId) -> String {
    format!("/api/admin/kyc/{}/reject", id)
}

/// Calls the workflow makes against the backend
///
/// Every method fails with `Error::UnexpectedStatus` when the backend
/// answers with anything but the documented success code.
#[async_trait]
pub trait KycBackend: Send + Sync {
    /// Register a new account (expects 201)
    async fn register(&self, user: &TestUser) -> Result<()>;

    /// Log the user actor in (expects 200)
    async fn login_user(&self, credentials: &Credentials) -> Result<()>;

    /// Current `kyc_status` as the user sees it
    async fn kyc_status(&self) -> Result<String>;

    /// Upload KYC documents as the user (expects 200)
    async fn submit_kyc(&self, submission: &KycSubmission) -> Result<()>;

    /// Log the admin actor in (expects 200)
    async fn login_admin(&self, credentials: &Credentials) -> Result<()>;

    /// All KYC requests visible to the admin; malformed entries are skipped
    async fn list_kyc(&self) -> Result<Vec<KycDocument>>;

    async fn approve(&self, id: &KycId, notes: &str) -> Result<()>;

    async fn reject(&self, id: &KycId, notes: &str) -> Result<()>;
}

/// [`KycBackend`] over HTTP, one cookie jar per actor
pub struct HttpKycBackend {
    user: ApiSession,
    admin: ApiSession,
}

impl HttpKycBackend {
    pub fn new(user: ApiSession, admin: ApiSession) -> Self {
        Self { user, admin }
    }
}

#[async_trait]
impl KycBackend for HttpKycBackend {
    async fn register(&self, user: &TestUser) -> Result<()> {
        self.user
            .post_json(REGISTER_PATH, user)
            .await?
            .expect_status("User registration", 201)?;
        Ok(())
    }

    async fn login_user(&self, credentials: &Credentials) -> Result<()> {
        self.user
            .post_json(LOGIN_PATH, credentials)
            .await?
            .expect_status("User login", 200)?;
        Ok(())
    }

    async fn kyc_status(&self) -> Result<String> {
        let response = self
            .user
            .get(STATUS_PATH)
            .await?
            .expect_status("KYC status", 200)?;
        Ok(response.json::<KycStatusResponse>()?.into_status())
    }

    async fn submit_kyc(&self, submission: &KycSubmission) -> Result<()> {
        self.user
            .post_multipart(SUBMIT_PATH, submission.to_form()?)
            .await?
            .expect_status("KYC submission", 200)?;
        Ok(())
    }

    async fn login_admin(&self, credentials: &Credentials) -> Result<()> {
        self.admin
            .post_json(ADMIN_LOGIN_PATH, credentials)
            .await?
            .expect_status("Admin login", 200)?;
        Ok(())
    }

    async fn list_kyc(&self) -> Result<Vec<KycDocument>> {
        let response = self
            .admin
            .get(ADMIN_LIST_PATH)
            .await?
            .expect_status("KYC listing", 200)?;
        Ok(response.json::<KycListing>()?.into_documents())
    }

    async fn approve(&self, id: &KycId, notes: &str) -> Result<()> {
        self.admin
            .post_json(&approve_path(id), &ReviewNotes { notes })
            .await?
            .expect_status("KYC approval", 200)?;
        Ok(())
    }

    async fn reject(&self, id: &KycId, notes: &str) -> Result<()> {
        self.admin
            .post_json(&reject_path(id), &ReviewNotes { notes })
            .await?
            .expect_status("KYC rejection", 200)?;
        Ok(())
    }
}
