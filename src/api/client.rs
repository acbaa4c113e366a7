//! HTTP client for the recommendation service.
//!
//! Thin async wrapper over the service's JSON endpoints: health probe,
//! ingredient autocomplete, dietary options, and the recommend call.
//! Suggestion fetches are fire-and-forget enhancements, so there is no
//! retry logic here; a failed call is reported once and dropped.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::{ApiError, Result};
use super::types::{
    DietaryOptions, DietaryOptionsResponse, HealthStatus, RecommendRequest, RecommendResponse,
    SuggestionResponse,
};

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the recommendation service.
///
/// Cheap to clone; background tasks each take their own copy.
#[derive(Debug, Clone)]
pub struct RecommenderClient {
    /// The HTTP client.
    client: Client,
    /// Base URL of the service, without a trailing slash.
    base_url: String,
}

impl RecommenderClient {
    /// Create a new client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL has no http(s) scheme, or
    /// `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the service health.
    ///
    /// Calls `GET /health`; the caller decides what to do when the
    /// recommender model is not loaded.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url).await
    }

    /// Fetch ingredient name suggestions for a partial query.
    ///
    /// Calls `GET /ingredient-suggestions?q=<query>&limit=<limit>` and
    /// returns the suggestion list (possibly empty).
    #[instrument(skip(self), fields(query = %query))]
    pub async fn ingredient_suggestions(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        let url = format!(
            "{}/ingredient-suggestions?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );

        let response: SuggestionResponse = self.get_json(&url).await?;
        debug!("Got {} suggestions", response.suggestions.len());
        Ok(response.suggestions)
    }

    /// Fetch the dietary filter options the service supports.
    #[instrument(skip(self))]
    pub async fn dietary_options(&self) -> Result<DietaryOptions> {
        let url = format!("{}/dietary-options", self.base_url);
        let response: DietaryOptionsResponse = self.get_json(&url).await?;
        Ok(response.options)
    }

    /// Request product recommendations for a recipe.
    ///
    /// Calls `POST /recommend`. A non-2xx status with an `error` body is
    /// mapped to `ApiError::Rejected` so the message can be shown as-is.
    #[instrument(skip(self, request), fields(ingredients = request.ingredients.len()))]
    pub async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let url = format!("{}/recommend", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The server puts a human-readable message in the error field
            // even for 4xx/5xx responses.
            if let Ok(parsed) = serde_json::from_str::<RecommendResponse>(&body) {
                if let Some(message) = parsed.error {
                    return Err(ApiError::Rejected(message));
                }
            }
            return Err(ApiError::from_status(status));
        }

        let parsed: RecommendResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        if let Some(message) = parsed.error {
            return Err(ApiError::Rejected(message));
        }

        debug!("Got {} recommendations", parsed.recommendations.len());
        Ok(parsed)
    }

    /// Perform a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::decode_response(response.status(), &response.text().await?)
    }

    /// Check the status and parse a JSON body.
    fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Distinguish "server unreachable" from other transport errors.
    fn map_send_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_connect() {
            ApiError::ConnectionFailed(self.base_url.clone())
        } else {
            ApiError::Network(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_scheme() {
        let result = RecommenderClient::new("localhost:5000");
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = RecommenderClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_decode_response_success() {
        let body = r#"{"status": "healthy", "recommender_loaded": true}"#;
        let health: HealthStatus =
            RecommenderClient::decode_response(StatusCode::OK, body).unwrap();
        assert!(health.recommender_loaded);
    }

    #[test]
    fn test_decode_response_http_error() {
        let result: Result<HealthStatus> =
            RecommenderClient::decode_response(StatusCode::BAD_GATEWAY, "oops");
        assert!(matches!(result, Err(ApiError::HttpStatus(502))));
    }

    #[test]
    fn test_decode_response_malformed_body() {
        let result: Result<HealthStatus> =
            RecommenderClient::decode_response(StatusCode::OK, "<html>not json</html>");
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }

    #[test]
    fn test_suggestion_url_encodes_query() {
        // The query lands in a URL parameter, so spaces must be escaped.
        let encoded = urlencoding::encode("olive oil");
        assert_eq!(encoded, "olive%20oil");
    }
}
