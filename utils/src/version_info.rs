//! Build metadata and environment labels.
//!
//! Labels take the form `{env}:{info}`:
//! - Prod: `stable:{version}`
//! - Staging: `staging:{commit}`
//! - Test/Local: `main:{commit}`
//!
//! The dashboard picks its label from compile-time features, the service from
//! its runtime `ENV`.

/// Deployment environment as seen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Local,
    Test,
    Staging,
    Prod,
}

/// RFC 3339 build timestamp.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Short git commit hash, or `unknown` outside a checkout.
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

pub fn build_branch() -> &'static str {
    env!("BUILD_BRANCH")
}

pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns `(env_name, info)` selected by the `env_*` build features.
pub fn env_version_info() -> (&'static str, &'static str) {
    if cfg!(feature = "env_staging") {
        ("staging", build_commit())
    } else if cfg!(feature = "env_test") {
        ("main", build_commit())
    } else {
        ("stable", build_version())
    }
}

pub fn format_env_version() -> String {
    let (env_name, info) = env_version_info();
    format!("{env_name}:{info}")
}

/// Version label for an environment chosen at runtime.
pub fn format_version_for_runtime_env(env: RuntimeEnv) -> String {
    match env {
        RuntimeEnv::Staging => format!("staging:{}", build_commit()),
        RuntimeEnv::Test | RuntimeEnv::Local => format!("main:{}", build_commit()),
        RuntimeEnv::Prod => format!("stable:{}", build_version()),
    }
}

/// Date part (`YYYY-MM-DD`) of the build timestamp.
pub fn build_day() -> &'static str {
    let date = build_date();
    if date.len() >= 10 && date.is_ascii() {
        &date[..10]
    } else {
        date
    }
}
