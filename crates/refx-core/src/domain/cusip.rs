use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const CUSIP_LEN: usize = 9;

/// Normalized 9-character CUSIP identifier.
///
/// Source feeds disagree on padding: the NSX and NYSE symbol lists drop
/// leading zeros while the NSCC flat file space-pads its columns. `parse`
/// trims and left-pads with `'0'` so the same security compares equal no
/// matter which feed it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cusip(String);

impl Cusip {
    /// Parse and normalize a CUSIP to its 9-character form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCusip);
        }

        let len = trimmed.chars().count();
        if len > CUSIP_LEN {
            return Err(ValidationError::CusipTooLong {
                value: trimmed.to_string(),
            });
        }

        let mut normalized = String::with_capacity(CUSIP_LEN);
        for _ in len..CUSIP_LEN {
            normalized.push('0');
        }
        normalized.push_str(trimmed);
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cusip {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Cusip {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Cusip {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Cusip> for String {
    fn from(value: Cusip) -> Self {
        value.0
    }
}
