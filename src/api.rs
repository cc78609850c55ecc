//! # Remote API Client
//!
//! Thin client for the two backend endpoints the editor consumes. Calls are
//! fire-and-forget from the core's perspective: no retries, no timeouts, no
//! cancellation. Failures surface once as a single error.

use crate::error::NewHomeError;
use crate::flyer::payload::{PayloadPart, into_multipart};

/// Fixed download name for generated flyers.
pub const PDF_FILENAME: &str = "NewHomeGenerator.pdf";

/// Client for a running newhome backend.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Client for a server base URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// POST `/api/login` with form-encoded credentials.
    ///
    /// Any non-success status is treated as invalid credentials; transport
    /// errors are not distinguished from auth failures.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), NewHomeError> {
        let response = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|_| NewHomeError::InvalidCredentials)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(NewHomeError::InvalidCredentials)
        }
    }

    /// POST the assembled payload to `/api/pdf` and return the PDF bytes.
    pub async fn generate_pdf(&self, parts: Vec<PayloadPart>) -> Result<Vec<u8>, NewHomeError> {
        let response = self
            .http
            .post(format!("{}/api/pdf", self.base_url))
            .multipart(into_multipart(parts))
            .send()
            .await
            .map_err(|e| NewHomeError::Pdf(e.to_string()))?;
        if !response.status().is_success() {
            return Err(NewHomeError::Pdf(format!(
                "server responded with {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| NewHomeError::Pdf(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8080///");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
