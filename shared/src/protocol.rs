//! Typed API protocol.
//!
//! Each REST endpoint is described by a request type implementing
//! [`ApiRequest`]: the response type, the HTTP method and the URL path live
//! next to the payload definition, so the HTTP client can stay fully generic.
//! All platform endpoints answer with the `{success, data, message}` envelope.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Banner, UserProfile, tenant::TenantContext, watermark::Watermark};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an
/// API endpoint. `path()` is a method rather than a constant because several
/// endpoints interpolate identifiers or query parameters.
pub trait ApiRequest: Serialize {
    /// The response type carried in the envelope's `data` field.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base, including query parameters.
    fn path(&self) -> String;
}

/// The platform's standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Auth
// =========================================================

/// POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Tenant scope of the login page the user came from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub user: UserProfile,
    pub token: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginData;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

/// GET /auth/profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/auth/profile".to_string()
    }
}

/// GET /auth/permission-status?since={watermark}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionStatusRequest {
    pub since: Watermark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionStatus {
    #[serde(default)]
    pub has_updates: bool,
}

impl ApiRequest for PermissionStatusRequest {
    type Response = PermissionStatus;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/auth/permission-status?since={}", self.since.to_query_value())
    }
}

// =========================================================
// Public tenant pages
// =========================================================

/// GET /public/tenancy/branding/{slug}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantBrandingRequest {
    #[serde(skip)]
    pub slug: String,
}

impl ApiRequest for TenantBrandingRequest {
    type Response = TenantContext;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/public/tenancy/branding/{}", self.slug)
    }
}

// =========================================================
// Customer banners
// =========================================================

/// GET /customer/banners?page={page}&limit={limit}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerListRequest {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerPage {
    #[serde(default)]
    pub items: Vec<Banner>,
    #[serde(default)]
    pub total: u32,
}

impl ApiRequest for BannerListRequest {
    type Response = BannerPage;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/customer/banners?page={}&limit={}", self.page, self.limit)
    }
}

/// POST /customer/banners/{id}/impression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerImpressionRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for BannerImpressionRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/customer/banners/{}/impression", self.id)
    }
}

/// POST /customer/banners/{id}/click
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerClickRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for BannerClickRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/customer/banners/{}/click", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn paths_interpolate_identifiers() {
        let branding = TenantBrandingRequest {
            slug: "acme".into(),
        };
        assert_eq!(branding.path(), "/public/tenancy/branding/acme");

        let banners = BannerListRequest { page: 2, limit: 10 };
        assert_eq!(banners.path(), "/customer/banners?page=2&limit=10");
    }

    #[test]
    fn permission_status_query_uses_url_safe_timestamp() {
        let req = PermissionStatusRequest {
            since: Watermark::new(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()),
        };
        assert_eq!(
            req.path(),
            "/auth/permission-status?since=2026-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn envelope_tolerates_missing_fields() {
        let env: Envelope<PermissionStatus> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());

        let env: Envelope<PermissionStatus> =
            serde_json::from_str(r#"{"success":true,"data":{"has_updates":true}}"#).unwrap();
        assert!(env.data.unwrap().has_updates);
    }
}
