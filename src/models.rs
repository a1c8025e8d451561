use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Link entry in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

/// Request to create a short link
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(url(message = "Must be a valid URL"))]
    pub target_url: String,
}

/// Response after creating a short link
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub key: String,
    pub short_url: String,
    pub secret_key: String,
    pub admin_url: String,
    pub target_url: String,
}

impl CreateLinkResponse {
    pub fn from_record(record: LinkRecord, base_url: &str) -> Self {
        CreateLinkResponse {
            short_url: format!("{}/{}", base_url, record.key),
            admin_url: format!("{}/admin/{}", base_url, record.secret_key),
            key: record.key,
            secret_key: record.secret_key,
            target_url: record.target_url,
        }
    }
}

/// Admin view of a link, looked up by secret key.
///
/// The secret key itself is only echoed back as part of the admin URL;
/// redirect lookups never see this shape.
#[derive(Debug, Serialize)]
pub struct LinkAdminResponse {
    pub key: String,
    pub short_url: String,
    pub admin_url: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl LinkAdminResponse {
    pub fn from_record(record: LinkRecord, base_url: &str) -> Self {
        LinkAdminResponse {
            short_url: format!("{}/{}", base_url, record.key),
            admin_url: format!("{}/admin/{}", base_url, record.secret_key),
            key: record.key,
            target_url: record.target_url,
            is_active: record.is_active,
            clicks: record.clicks,
            created_at: record.created_at,
            last_clicked_at: record.last_clicked_at,
        }
    }
}

/// Confirmation returned after deactivating a link
#[derive(Debug, Serialize)]
pub struct DeactivateResponse {
    pub detail: String,
    pub link: LinkAdminResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LinkRecord {
        LinkRecord {
            id: 1,
            key: "Vq3abc".to_string(),
            secret_key: "sk0000000000000000000000000000ab".to_string(),
            target_url: "https://example.com/page".to_string(),
            is_active: true,
            clicks: 42,
            created_at: Utc::now(),
            last_clicked_at: None,
        }
    }

    #[test]
    fn test_create_response_urls() {
        let response = CreateLinkResponse::from_record(record(), "http://localhost:3000");
        assert_eq!(response.short_url, "http://localhost:3000/Vq3abc");
        assert_eq!(
            response.admin_url,
            "http://localhost:3000/admin/sk0000000000000000000000000000ab"
        );
        assert_eq!(response.target_url, "https://example.com/page");
    }

    #[test]
    fn test_admin_response_carries_state() {
        let mut rec = record();
        rec.is_active = false;
        let response = LinkAdminResponse::from_record(rec, "http://localhost:3000");
        assert!(!response.is_active);
        assert_eq!(response.clicks, 42);
    }
}
