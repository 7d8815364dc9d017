//! Opaque identifiers for catalog entities
//!
//! ID Format:
//! - Book IDs: `b-{7-char-hash}` (e.g., `b-7f2b4c1`)
//! - Member IDs: `m-{7-char-hash}` (e.g., `m-9d3e5f2`)
//! - Loan IDs: `l-{7-char-hash}` (e.g., `l-4a8c0e3`)
//!
//! The hash is derived from the current timestamp and a process-wide
//! counter, so identifiers generated back-to-back within one transition
//! batch can never collide.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid book ID format: expected 'b-{{7-char-hash}}', got '{0}'")]
    InvalidBookId(String),

    #[error("Invalid member ID format: expected 'm-{{7-char-hash}}', got '{0}'")]
    InvalidMemberId(String),

    #[error("Invalid loan ID format: expected 'l-{{7-char-hash}}', got '{0}'")]
    InvalidLoanId(String),
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a 7-character hash from the clock and a monotonic counter
fn generate_hash() -> String {
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let input = format!("{}:{}", nanos, seq);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            hash: String,
        }

        impl $name {
            /// Generates a fresh identifier, unique within this process
            pub fn generate() -> Self {
                Self {
                    hash: generate_hash(),
                }
            }

            /// Returns the hash portion of the ID
            pub fn hash(&self) -> &str {
                &self.hash
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.hash)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let hash = s
                    .strip_prefix(concat!($prefix, "-"))
                    .ok_or_else(|| IdError::$variant(s.to_string()))?;

                if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(IdError::$variant(s.to_string()));
                }

                Ok(Self {
                    hash: hash.to_string(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

entity_id!(
    /// Book identifier in the format `b-{7-char-hash}`
    BookId,
    "b",
    InvalidBookId
);

entity_id!(
    /// Member identifier in the format `m-{7-char-hash}`
    MemberId,
    "m",
    InvalidMemberId
);

entity_id!(
    /// Loan identifier in the format `l-{7-char-hash}`
    LoanId,
    "l",
    InvalidLoanId
);
