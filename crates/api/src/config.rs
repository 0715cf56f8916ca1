use std::fmt;

/// Server configuration loaded from environment variables.
///
/// Built once in `main` and shared through [`crate::state::AppState`].
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 10 MiB).
    pub max_body_bytes: usize,
    /// Shared secret expected in the `x-api-key` header. Empty disables the
    /// keyed endpoints.
    pub api_key: String,
    /// HTTP Basic credentials for the admin endpoints.
    pub admin: AdminCredentials,
}

/// Username and password accepted by the Basic-auth extractor.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Empty disables the admin endpoints.
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `8000`                       |
    /// | `CORS_ORIGINS`         | `https://www.mapcamera.com`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `MAX_BODY_BYTES`       | `10485760`                   |
    /// | `INGEST_API_KEY`       | empty                        |
    /// | `ADMIN_USER`           | `admin`                      |
    /// | `ADMIN_PASS`           | empty                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "https://www.mapcamera.com".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let api_key = std::env::var("INGEST_API_KEY").unwrap_or_default();

        let admin = AdminCredentials {
            username: std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASS").unwrap_or_default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            api_key,
            admin,
        }
    }
}

// Secrets are reported as set/unset only.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("admin_user", &self.admin.username)
            .field("admin_pass_set", &!self.admin.password.is_empty())
            .finish()
    }
}
