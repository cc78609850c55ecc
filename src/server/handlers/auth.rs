//! Login API handler.

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};

use super::super::state::AppState;

/// Form body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response from the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
}

/// POST /api/login - Validate a username/password pair.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let creds = state.credentials();
    if form.username == creds.username && form.password == creds.password {
        println!("[server] login ok for {}", form.username);
        Ok(Json(LoginResponse { ok: true }))
    } else {
        println!("[server] login rejected for {}", form.username);
        Err((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()))
    }
}
