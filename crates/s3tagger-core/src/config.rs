//! s3tagger configuration.
//!
//! Provides [`TaggerConfig`]. Values are loaded from environment variables
//! via [`TaggerConfig::from_env`]; the CLI layers its flags on top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{TaggerError, TaggerResult};
use crate::types::AwsRegion;

/// What to do when a bucket-level failure occurs mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop processing every remaining bucket.
    #[default]
    Abort,
    /// Skip the failing bucket and move on.
    Continue,
}

impl FromStr for ErrorPolicy {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "stop" => Ok(Self::Abort),
            "continue" | "skip" => Ok(Self::Continue),
            other => Err(TaggerError::Config(format!(
                "unknown error policy {other:?} (expected \"abort\" or \"continue\")"
            ))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Abort => "abort",
            Self::Continue => "continue",
        })
    }
}

/// s3tagger configuration.
///
/// # Examples
///
/// ```
/// use s3tagger_core::{ErrorPolicy, TaggerConfig};
///
/// let config = TaggerConfig::default();
/// assert_eq!(config.region.as_str(), "us-east-1");
/// assert_eq!(config.on_region_not_found, ErrorPolicy::Abort);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TaggerConfig {
    /// Target region; only buckets in this region are read.
    #[builder(default)]
    pub region: AwsRegion,

    /// Custom S3 endpoint (LocalStack or another S3-compatible service).
    #[builder(default, setter(strip_option))]
    pub endpoint_url: Option<String>,

    /// Whether to use path-style bucket addressing.
    #[builder(default = false)]
    pub force_path_style: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Read path: what to do when a listed bucket's region lookup reports
    /// that the bucket does not exist.
    #[builder(default)]
    pub on_region_not_found: ErrorPolicy,

    /// Write path: what to do when fetching or replacing a bucket's tags fails.
    #[builder(default)]
    pub on_write_error: ErrorPolicy,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            region: AwsRegion::default(),
            endpoint_url: None,
            force_path_style: false,
            log_level: String::from("info"),
            on_region_not_found: ErrorPolicy::Abort,
            on_write_error: ErrorPolicy::Abort,
        }
    }
}

impl TaggerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AWS_REGION` (else `DEFAULT_REGION`) | `us-east-1` |
    /// | `S3_ENDPOINT_URL` | *(unset)* |
    /// | `S3_FORCE_PATH_STYLE` | `false` |
    /// | `LOG_LEVEL` | `info` |
    /// | `TAGGER_ON_REGION_NOT_FOUND` | `abort` |
    /// | `TAGGER_ON_WRITE_ERROR` | `abort` |
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError::Config`] if a policy variable holds anything
    /// other than `abort` or `continue`.
    pub fn from_env() -> TaggerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TaggerResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("DEFAULT_REGION")) {
            config.region = AwsRegion::new(v);
        }
        if let Some(v) = lookup("S3_ENDPOINT_URL") {
            if !v.is_empty() {
                config.endpoint_url = Some(v);
            }
        }
        if let Some(v) = lookup("S3_FORCE_PATH_STYLE") {
            config.force_path_style = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("TAGGER_ON_REGION_NOT_FOUND") {
            config.on_region_not_found = parse_policy("TAGGER_ON_REGION_NOT_FOUND", &v)?;
        }
        if let Some(v) = lookup("TAGGER_ON_WRITE_ERROR") {
            config.on_write_error = parse_policy("TAGGER_ON_WRITE_ERROR", &v)?;
        }

        Ok(config)
    }
}

fn parse_policy(var: &str, value: &str) -> TaggerResult<ErrorPolicy> {
    value.parse::<ErrorPolicy>().map_err(|_| {
        TaggerError::Config(format!(
            "{var}: unknown error policy {value:?} (expected \"abort\" or \"continue\")"
        ))
    })
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
