use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A validated GST registration number.
///
/// Format: 2-digit state code, 5 uppercase letters, 4 digits, 1 uppercase
/// letter, 1 entity character in [1-9A-Z], the literal 'Z', 1 alphanumeric
/// check character. 15 characters total, e.g. `29ABCDE1234F1Z5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gstin(String);

impl Gstin {
    /// Parse and validate, normalizing to uppercase.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim().to_uppercase();
        let chars: Vec<char> = value.chars().collect();

        if chars.len() != 15 {
            return Err(AppError::validation(format!(
                "GSTIN must be 15 characters, got {} in '{}'",
                chars.len(),
                value
            )));
        }

        let ok = chars[0..2].iter().all(|c| c.is_ascii_digit())
            && chars[2..7].iter().all(|c| c.is_ascii_uppercase())
            && chars[7..11].iter().all(|c| c.is_ascii_digit())
            && chars[11].is_ascii_uppercase()
            && (chars[12].is_ascii_uppercase() || ('1'..='9').contains(&chars[12]))
            && chars[13] == 'Z'
            && (chars[14].is_ascii_uppercase() || chars[14].is_ascii_digit());

        if !ok {
            return Err(AppError::validation(format!(
                "'{}' is not a valid GSTIN",
                value
            )));
        }

        Ok(Gstin(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-digit state code prefix.
    pub fn state_code(&self) -> &str {
        &self.0[0..2]
    }
}

impl std::fmt::Display for Gstin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
