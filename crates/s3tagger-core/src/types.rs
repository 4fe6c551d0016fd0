//! Common AWS type definitions.

use std::fmt;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region, also the home of buckets without a location constraint.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Resolve a bucket location constraint into the region it denotes.
    ///
    /// S3 reports buckets in `us-east-1` with an empty or absent constraint,
    /// and very old `eu-west-1` buckets with the legacy value `EU`.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3tagger_core::AwsRegion;
    ///
    /// assert_eq!(AwsRegion::from_location_constraint(None).as_str(), "us-east-1");
    /// assert_eq!(AwsRegion::from_location_constraint(Some("EU")).as_str(), "eu-west-1");
    /// assert_eq!(AwsRegion::from_location_constraint(Some("ap-south-1")).as_str(), "ap-south-1");
    /// ```
    #[must_use]
    pub fn from_location_constraint(constraint: Option<&str>) -> Self {
        match constraint.map(str::trim) {
            None | Some("") => Self::default(),
            Some("EU") => Self::new("eu-west-1"),
            Some(other) => Self::new(other),
        }
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AwsRegion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
