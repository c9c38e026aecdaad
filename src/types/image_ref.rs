// ABOUTME: Container image reference validation.
// ABOUTME: Accepts nginx, nginx:tag, registry/image:tag@digest and keeps the text as written.

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),

    #[error("invalid image reference format: {0}")]
    InvalidFormat(String),
}

/// A validated image reference.
///
/// Images are assumed to be present on the target already, so the reference is
/// handed to the backend exactly as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric()
                && c != '/'
                && c != ':'
                && c != '.'
                && c != '-'
                && c != '_'
                && c != '@'
            {
                return Err(ParseImageRefError::InvalidChar(c));
            }
        }

        let malformed = || ParseImageRefError::InvalidFormat(input.to_string());

        let without_digest = match input.split_once('@') {
            Some((_, "")) => return Err(malformed()),
            Some((before, _)) => before,
            None => input,
        };

        // A colon followed by a slash belongs to a registry port, not a tag.
        let repository = match without_digest.rsplit_once(':') {
            Some((_, "")) => return Err(malformed()),
            Some((before, after)) if !after.contains('/') => before,
            _ => without_digest,
        };

        if repository.is_empty() || repository.split('/').any(str::is_empty) {
            return Err(malformed());
        }

        Ok(Self(input.to_string()))
    }

    /// The reference exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ImageRef::parse(&s).map_err(de::Error::custom)
    }
}
