use std::path::PathBuf;
use std::sync::Arc;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Optional credentials file, one JSON object with `username` and
    /// `password`. Missing file means the built-in default pair.
    pub credentials_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: "0.0.0.0:5000".to_string(),
            credentials_path: None,
        }
    }
}

#[derive(Debug, serde::Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            username: "newhome".to_string(),
            password: "newhome".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }

    /// Credentials are re-read on every login attempt so the file can be
    /// rotated without a restart.
    pub fn credentials(&self) -> Credentials {
        let Some(path) = &self.config.credentials_path else {
            return Credentials::default();
        };
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(creds) => creds,
                Err(err) => {
                    eprintln!("[server] bad credentials file {}: {err}", path.display());
                    Credentials::default()
                }
            },
            Err(_) => Credentials::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_credentials_without_file() {
        let state = AppState::new(ServerConfig::default());
        assert_eq!(state.credentials(), Credentials::default());
    }

    #[test]
    fn test_credentials_read_from_file() {
        let dir = std::env::temp_dir().join(format!("newhome-creds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("credentials.json");
        std::fs::write(&path, r#"{"username":"ana","password":"s3cret"}"#).expect("write");
        let state = AppState::new(ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            credentials_path: Some(path),
        });
        let creds = state.credentials();
        assert_eq!(creds.username, "ana");
        assert_eq!(creds.password, "s3cret");
        std::fs::remove_dir_all(&dir).ok();
    }
}
