use serde::Deserialize;

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Settings for talking to the dashboard data routes.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Session token forwarded as `Authorization: Bearer`.
    pub session_token: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
struct RawBusinessConfig {
    cohort_api_url: Option<String>,
    cohort_session_token: Option<String>,
    cohort_page_size: Option<u32>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            session_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Reads `COHORT_API_URL`, `COHORT_SESSION_TOKEN` and `COHORT_PAGE_SIZE`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_iter(std::env::vars())
    }

    pub fn from_iter<I, S>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawBusinessConfig = serde_env::from_iter(vars)?;
        let mut config = Self::default();
        if let Some(url) = raw.cohort_api_url {
            config.api_base_url = url;
        }
        config.session_token = raw.cohort_session_token.filter(|t| !t.is_empty());
        if let Some(size) = raw.cohort_page_size {
            anyhow::ensure!(size > 0, "COHORT_PAGE_SIZE must be positive");
            config.page_size = size;
        }
        Ok(config)
    }

    /// Base of the data routes, e.g. `https://host/api`.
    pub fn api_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        format!("{base}/api")
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let base = if cfg!(feature = "env_test") {
            "https://cohort-test.example.com"
        } else if cfg!(feature = "env_staging") {
            "https://cohort-staging.example.com"
        } else {
            "http://127.0.0.1:8080"
        };
        Self::new(base)
    }
}
