use std::fmt::Display;
use std::str::FromStr;

use super::DomainErr;

/// An `s3://bucket/key` location. The key may be a prefix ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Uri {
    bucket: String,
    key: String,
}

impl S3Uri {
    /// the bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// the object key, without a leading `/`
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for S3Uri {
    type Err = DomainErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainErr::InvalidS3Uri(s.to_string());
        let rest = s.strip_prefix("s3://").ok_or_else(invalid)?;
        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl Display for S3Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// `dir` with a trailing `/` so file names can be appended to it
pub fn as_directory(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}
