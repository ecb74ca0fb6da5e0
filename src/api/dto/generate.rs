//! DTOs for link issuance and QR tracking.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/shorty-url/generate`.
///
/// Only presence is checked here. The destination rules (HTTPS, FQDN host,
/// length) are enforced by the link service so they apply to every caller.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default, alias = "longUrl", alias = "urlValue")]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub short_code: String,
    pub short_url: String,
    pub is_existing: bool,
}

/// Request body for `POST /api/shorty-url/stats/track-qr`.
///
/// `shortUrl` may be a full short URL or a bare code.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackQrRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Short URL is required"))]
    pub short_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackQrResponse {
    pub short_code: String,
    pub qr_generated_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_fails_validation() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_url_field_aliases() {
        for body in [
            r#"{"url": "https://example.com/a"}"#,
            r#"{"longUrl": "https://example.com/a"}"#,
            r#"{"urlValue": "https://example.com/a"}"#,
        ] {
            let request: GenerateRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.url, "https://example.com/a");
        }
    }

    #[test]
    fn test_generate_response_is_camel_case() {
        let body = serde_json::to_value(GenerateResponse {
            short_code: "AbC12".to_string(),
            short_url: "https://shorty.co/AbC12".to_string(),
            is_existing: false,
        })
        .unwrap();

        assert_eq!(body["shortCode"], "AbC12");
        assert_eq!(body["isExisting"], false);
    }

    #[test]
    fn test_track_qr_reads_camel_case() {
        let request: TrackQrRequest =
            serde_json::from_str(r#"{"shortUrl": "https://shorty.co/AbC12"}"#).unwrap();
        assert_eq!(request.short_url, "https://shorty.co/AbC12");
        assert!(request.validate().is_ok());
    }
}
