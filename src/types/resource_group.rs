// ABOUTME: Azure resource group name validation.
// ABOUTME: Alphanumerics plus ._-() up to 90 characters, no trailing period.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceGroupNameError {
    #[error("resource group name cannot be empty")]
    Empty,

    #[error("resource group name exceeds maximum length of 90 characters")]
    TooLong,

    #[error("resource group name cannot end with a period")]
    EndsWithPeriod,

    #[error("invalid character in resource group name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceGroupName(String);

impl ResourceGroupName {
    pub fn new(value: &str) -> Result<Self, ResourceGroupNameError> {
        if value.trim().is_empty() {
            return Err(ResourceGroupNameError::Empty);
        }

        if value.len() > 90 {
            return Err(ResourceGroupNameError::TooLong);
        }

        if value.ends_with('.') {
            return Err(ResourceGroupNameError::EndsWithPeriod);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && !matches!(c, '.' | '_' | '-' | '(' | ')') {
                return Err(ResourceGroupNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
