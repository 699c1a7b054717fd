//! Wire types for the KYC review API
//!
//! Field names mirror the backend's JSON exactly; unknown fields are
//! ignored so the smoke test survives additive backend changes.

use std::fmt;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::client::Credentials;
use crate::common::Result;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
/// Reported when the status endpoint omits `kyc_status`
pub const STATUS_UNKNOWN: &str = "unknown";

/// Throwaway account registered for one run
#[derive(Debug, Clone, Serialize)]
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    /// Derive a collision-free user from a Unix timestamp
    pub fn from_timestamp(ts: u64) -> Self {
        Self {
            username: format!("testuser_kyc_{}", ts),
            email: format!("testkyc_{}@test.com", ts),
            password: "Test123!@#".to_string(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

/// Document upload sent to the submit endpoint
#[derive(Debug, Clone)]
pub struct KycSubmission {
    pub file_name: String,
    pub content: String,
    pub mime: String,
    pub grant_award_number: String,
}

impl KycSubmission {
    pub fn from_timestamp(ts: u64) -> Self {
        Self {
            file_name: "test_certificate.txt".to_string(),
            content: "Test AML Certificate Content".to_string(),
            mime: "text/plain".to_string(),
            grant_award_number: format!("GRANT-{}", ts),
        }
    }

    /// Multipart body: one file field and one text field
    pub fn to_form(&self) -> Result<Form> {
        let certificate = Part::text(self.content.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)?;
        Ok(Form::new()
            .part("aml_certificate", certificate)
            .text("grant_award_number", self.grant_award_number.clone()))
    }
}

/// Opaque KYC request id
///
/// The backend may send it as a string or a number. Integral floats
/// (`7.0`) render as integers so the approve/reject URL stays stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KycId(pub String);

impl KycId {
    /// Id from a JSON scalar; `None` for null, booleans and containers
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(KycId(s.clone())),
            Value::Number(n) => Some(KycId(number_id(n))),
            _ => None,
        }
    }
}

fn number_id(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Beyond 2^53 an f64 no longer holds every integer exactly
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

impl fmt::Display for KycId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for KycId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        KycId::from_json(&value).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!("invalid KYC id: {}", value))
        })
    }
}

/// Missing, null or non-scalar ids decode to `None` instead of failing the entry
fn lenient_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<KycId>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(KycId::from_json(&value))
}

/// Owner block nested in each listed request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KycOwner {
    #[serde(default)]
    pub username: Option<String>,
}

/// One entry of the admin listing
#[derive(Debug, Clone, Deserialize)]
pub struct KycDocument {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<KycId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<KycOwner>,
}

impl KycDocument {
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.username.as_deref())
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// Body of `GET /api/admin/kyc/all`
///
/// Entries stay raw until [`KycListing::into_documents`] so that one
/// malformed row cannot fail the whole listing.
#[derive(Debug, Deserialize)]
pub struct KycListing {
    #[serde(default)]
    pub kyc_documents: Option<Vec<Value>>,
}

impl KycListing {
    /// Decode every entry that fits [`KycDocument`], skipping the rest
    pub fn into_documents(self) -> Vec<KycDocument> {
        self.kyc_documents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed KYC entry");
                    None
                }
            })
            .collect()
    }
}

/// Body of `GET /api/kyc/status`
#[derive(Debug, Deserialize)]
pub struct KycStatusResponse {
    #[serde(default)]
    pub kyc_status: Option<String>,
}

impl KycStatusResponse {
    pub fn into_status(self) -> String {
        self.kyc_status.unwrap_or_else(|| STATUS_UNKNOWN.to_string())
    }
}

/// Body of the approve/reject calls
#[derive(Debug, Serialize)]
pub struct ReviewNotes<'a> {
    pub notes: &'a str,
}

/// First request owned by `username`, optionally restricted to a status
pub fn find_request<'a>(
    documents: &'a [KycDocument],
    username: &str,
    status: Option<&str>,
) -> Option<&'a KycDocument> {
    documents.iter().find(|doc| {
        doc.username() == Some(username) && status.map_or(true, |s| doc.status() == Some(s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(value: Value) -> Vec<KycDocument> {
        serde_json::from_value::<KycListing>(value)
            .unwrap()
            .into_documents()
    }

    fn id(s: &str) -> Option<KycId> {
        Some(KycId(s.to_string()))
    }

    #[test]
    fn test_user_from_timestamp() {
        let user = TestUser::from_timestamp(1_700_000_000);
        assert_eq!(user.username, "testuser_kyc_1700000000");
        assert_eq!(user.email, "testkyc_1700000000@test.com");
        assert_eq!(user.password, "Test123!@#");
        assert_eq!(user.credentials().username, user.username);
    }

    #[test]
    fn test_register_body_shape() {
        let body = serde_json::to_value(TestUser::from_timestamp(1)).unwrap();
        assert_eq!(
            body,
            json!({
                "username": "testuser_kyc_1",
                "email": "testkyc_1@test.com",
                "password": "Test123!@#"
            })
        );
    }

    #[test]
    fn test_submission_from_timestamp() {
        let s = KycSubmission::from_timestamp(42);
        assert_eq!(s.grant_award_number, "GRANT-42");
        assert_eq!(s.file_name, "test_certificate.txt");
        assert!(s.to_form().is_ok());
    }

    #[test]
    fn test_kyc_id_accepts_string_and_number() {
        let docs = listing(json!({"kyc_documents": [
            {"id": 17, "status": "pending", "user": {"username": "a"}},
            {"id": "9f1c-uuid", "status": "approved", "user": {"username": "b"}}
        ]}));
        assert_eq!(docs[0].id, id("17"));
        assert_eq!(docs[1].id.as_ref().unwrap().to_string(), "9f1c-uuid");
    }

    #[test]
    fn test_kyc_id_float_renders_as_integer_when_integral() {
        assert_eq!(KycId::from_json(&json!(7.0)), Some(KycId("7".to_string())));
        assert_eq!(KycId::from_json(&json!(-3.0)), Some(KycId("-3".to_string())));
        assert_eq!(KycId::from_json(&json!(7.5)), Some(KycId("7.5".to_string())));

        let parsed: KycId = serde_json::from_value(json!(12.0)).unwrap();
        assert_eq!(parsed.0, "12");
    }

    #[test]
    fn test_kyc_id_rejects_non_scalars() {
        assert_eq!(KycId::from_json(&json!(null)), None);
        assert_eq!(KycId::from_json(&json!(true)), None);
        assert_eq!(KycId::from_json(&json!({"x": 1})), None);
        assert!(serde_json::from_value::<KycId>(json!([1])).is_err());
    }

    #[test]
    fn test_listing_missing_array_is_empty() {
        assert!(listing(json!({})).is_empty());
        assert!(listing(json!({"kyc_documents": null})).is_empty());
    }

    #[test]
    fn test_malformed_entries_do_not_hide_good_ones() {
        let docs = listing(json!({"kyc_documents": [
            {"id": null, "status": "pending", "user": {"username": "legacy"}},
            "not an object",
            {"id": 3, "status": 5, "user": "flat-string"},
            {"id": 7, "status": "pending", "user": {"username": "me"}}
        ]}));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].username(), Some("legacy"));
        assert!(docs[0].id.is_none());

        let mine = find_request(&docs, "me", Some(STATUS_PENDING)).unwrap();
        assert_eq!(mine.id, id("7"));
    }

    #[test]
    fn test_find_request_by_username() {
        let docs = listing(json!({"kyc_documents": [
            {"id": 1, "status": "pending", "user": {"username": "other"}},
            {"id": 2, "status": "approved", "user": {"username": "me"}},
            {"id": 3, "status": "pending", "user": {"username": "me"}},
            {"id": 4, "status": "pending", "user": null},
            {"id": 5, "status": "pending"}
        ]}));

        let found = find_request(&docs, "me", None).unwrap();
        assert_eq!(found.id, id("2"));

        let pending = find_request(&docs, "me", Some(STATUS_PENDING)).unwrap();
        assert_eq!(pending.id, id("3"));

        assert!(find_request(&docs, "me", Some(STATUS_REJECTED)).is_none());
        assert!(find_request(&docs, "nobody", None).is_none());
    }

    #[test]
    fn test_status_response_defaults_to_unknown() {
        let r: KycStatusResponse = serde_json::from_value(json!({"other": 1})).unwrap();
        assert_eq!(r.into_status(), STATUS_UNKNOWN);

        let r: KycStatusResponse =
            serde_json::from_value(json!({"kyc_status": "pending"})).unwrap();
        assert_eq!(r.into_status(), "pending");
    }

    #[test]
    fn test_review_notes_body() {
        let notes = ReviewNotes {
            notes: "Approved by test script",
        };
        let body = serde_json::to_value(notes).unwrap();
        assert_eq!(body, json!({"notes": "Approved by test script"}));
    }
}
