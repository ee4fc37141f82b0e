use cohort_utils::version_info::RuntimeEnv;
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use tracing::info;

/// Page size used by list routes when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Cookie holding the dashboard session JWT.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "cohort_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "staging")]
    Staging,
    #[serde(rename = "prod")]
    Prod,
}

impl From<&Env> for RuntimeEnv {
    fn from(env: &Env) -> Self {
        match env {
            Env::Local => RuntimeEnv::Local,
            Env::Test => RuntimeEnv::Test,
            Env::Staging => RuntimeEnv::Staging,
            Env::Prod => RuntimeEnv::Prod,
        }
    }
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Test => write!(f, "test"),
            Env::Staging => write!(f, "staging"),
            Env::Prod => write!(f, "prod"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    server_addr: String,
    port: u16,
    upstream_url: String,
    // Verifies dashboard session tokens
    jwt_secret: String,
    // Signs the bearer tokens sent to the upstream backend
    upstream_jwt_secret: String,
    session_cookie_name: String,
    default_page_size: u32,
}

// Raw environment variables; everything optional until `from_raw` decides.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    server_addr: Option<String>,
    port: Option<u16>,
    upstream_url: Option<String>,
    jwt_secret: Option<String>,
    upstream_jwt_secret: Option<String>,
    session_cookie_name: Option<String>,
    default_page_size: Option<u32>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// This function is available for both unit tests and integration tests.
    /// It should not be used in production code.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            server_addr: "127.0.0.1".to_owned(),
            port: 8080,
            upstream_url: "http://127.0.0.1:9000".to_owned(),
            jwt_secret: "test-jwt-secret-key-for-local-development".to_owned(),
            upstream_jwt_secret: "test-upstream-secret-for-local-development".to_owned(),
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_owned(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Test configuration running as `env`.
    pub fn new_for_test_with_env(env: Env) -> Self {
        Self {
            env,
            ..Self::new_for_test()
        }
    }

    /// Test configuration pointing at `upstream_url`, e.g. a mock server.
    pub fn new_for_test_with_upstream(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            ..Self::new_for_test()
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn upstream_jwt_secret(&self) -> &str {
        &self.upstream_jwt_secret
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            server_addr,
            port,
            upstream_url,
            jwt_secret,
            upstream_jwt_secret,
            session_cookie_name,
            default_page_size,
        } = raw_config;

        let relaxed = matches!(env, Env::Local | Env::Test);

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_owned()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local) => {
                info!("PORT not set, defaulting to 8080 for local environment");
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        let upstream_url = match upstream_url {
            Some(url) => url.trim_end_matches('/').to_owned(),
            None if relaxed => {
                info!("UPSTREAM_URL not set, defaulting to http://127.0.0.1:9000");
                "http://127.0.0.1:9000".to_owned()
            }
            None => anyhow::bail!("UPSTREAM_URL must be set for {} environment", env),
        };

        let jwt_secret = match jwt_secret {
            Some(secret) => secret,
            None if relaxed => {
                info!("JWT_SECRET not set, using default for {} environment", env);
                "default-jwt-secret-for-local-development-only".to_owned()
            }
            None => anyhow::bail!("JWT_SECRET must be set for {} environment", env),
        };

        let upstream_jwt_secret = match upstream_jwt_secret {
            Some(secret) => secret,
            None if relaxed => {
                info!(
                    "UPSTREAM_JWT_SECRET not set, using default for {} environment",
                    env
                );
                "default-upstream-secret-for-local-development-only".to_owned()
            }
            None => anyhow::bail!("UPSTREAM_JWT_SECRET must be set for {} environment", env),
        };

        let session_cookie_name =
            session_cookie_name.unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_owned());

        let default_page_size = default_page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&default_page_size) {
            anyhow::bail!(
                "DEFAULT_PAGE_SIZE must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                default_page_size
            );
        }

        Ok(Config {
            env,
            server_addr,
            port,
            upstream_url,
            jwt_secret,
            upstream_jwt_secret,
            session_cookie_name,
            default_page_size,
        })
    }
}
