//! Onboarding submission collaborator.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(feature = "http")]
use crate::config::Config;
use crate::onboarding::payload::{ApiEnvelope, OnboardingRequest, OnboardingResponse};

/// Shown when the server did not supply a usable message.
pub const GENERIC_SUBMIT_ERROR: &str =
    "Unable to complete setup. Please check your connection and try again.";

/// Path of the onboarding completion endpoint.
pub const ONBOARDING_COMPLETE_PATH: &str = "/api/v1/onboarding/complete";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Server rejected request ({status})")]
    Server { status: u16, message: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The single message the wizard shows for a failed submission.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_SUBMIT_ERROR.to_string(),
        }
    }
}

/// Backend that accepts a finished onboarding.
#[async_trait]
pub trait OnboardingApi: Send + Sync {
    async fn submit(&self, request: &OnboardingRequest) -> Result<OnboardingResponse, ApiError>;
}

/// Maps a raw HTTP status and body from the completion endpoint to a result.
///
/// Non-2xx statuses become [`ApiError::Server`] carrying the envelope's
/// `message` when the body has one. A 2xx must carry `data`.
pub fn decode_submit_response(status: u16, body: &str) -> Result<OnboardingResponse, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(ApiError::Server { status, message });
    }

    serde_json::from_str::<ApiEnvelope<OnboardingResponse>>(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .data
        .ok_or_else(|| ApiError::Decode("response missing 'data'".into()))
}

/// REST client for the onboarding endpoint.
#[cfg(feature = "http")]
pub struct HttpOnboardingApi {
    client: reqwest::Client,
    base_url: String,
    access_token: secrecy::SecretString,
}

#[cfg(feature = "http")]
impl HttpOnboardingApi {
    pub fn new(base_url: impl Into<String>, access_token: secrecy::SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Client for the configured `ANES_API_BASE_URL`.
    pub fn from_config(config: &Config, access_token: secrecy::SecretString) -> Self {
        Self::new(config.api_base_url.as_str(), access_token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl OnboardingApi for HttpOnboardingApi {
    async fn submit(&self, request: &OnboardingRequest) -> Result<OnboardingResponse, ApiError> {
        use secrecy::ExposeSecret;

        let response = self
            .client
            .post(format!("{}{ONBOARDING_COMPLETE_PATH}", self.base_url))
            .bearer_auth(self.access_token.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_submit_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Age must be at least 13".to_string()),
        };
        assert_eq!(err.user_message(), "Age must be at least 13");
    }

    #[test]
    fn test_user_message_falls_back() {
        let blank = ApiError::Server {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), GENERIC_SUBMIT_ERROR);
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message(),
            GENERIC_SUBMIT_ERROR
        );
        assert_eq!(
            ApiError::Decode("eof".into()).user_message(),
            GENERIC_SUBMIT_ERROR
        );
    }

    const PLAN_BODY: &str = r#"{
        "data": {
            "bmi": 24.7,
            "bmr": 1650.0,
            "tdee": 2557.5,
            "calorieTarget": 2057.5,
            "planSummary": {
                "programName": "Lean Start",
                "durationWeeks": 12,
                "daysPerWeek": 4,
                "focusAreas": ["Full Body"]
            }
        },
        "message": "Onboarding complete",
        "error": null
    }"#;

    #[test]
    fn test_decode_success_unwraps_data() {
        let response = decode_submit_response(200, PLAN_BODY).unwrap();
        assert_eq!(response.calorie_target, 2057.5);
        assert_eq!(response.plan_summary.program_name, "Lean Start");
        assert_eq!(response.plan_summary.focus_areas, ["Full Body"]);
    }

    #[test]
    fn test_decode_success_without_data() {
        let body = r#"{"data": null, "message": "ok", "error": null}"#;
        assert!(matches!(
            decode_submit_response(201, body),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(
            decode_submit_response(200, "<html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejection_keeps_server_message() {
        let body = r#"{"data": null, "message": "Age must be at least 13", "error": "VALIDATION"}"#;
        let err = decode_submit_response(422, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 422,
                message: Some("Age must be at least 13".to_string()),
            }
        );
        assert_eq!(err.user_message(), "Age must be at least 13");
    }

    #[test]
    fn test_decode_failure_with_non_json_body() {
        let err = decode_submit_response(500, "Internal Server Error").unwrap_err();
        assert_eq!(err, ApiError::Server { status: 500, message: None });
        assert_eq!(err.user_message(), GENERIC_SUBMIT_ERROR);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_client_from_config() {
        let config = Config {
            api_base_url: "https://api.anes.app/".to_string(),
            ..Config::default()
        };
        let api = HttpOnboardingApi::from_config(&config, secrecy::SecretString::new("token".to_string().into()));
        assert_eq!(api.base_url(), "https://api.anes.app");
    }
}
