//! Bearer token rotation
//!
//! The service holds several bearer tokens and switches to the next one
//! whenever the current token is rate limited.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ConfigError;

/// Which key is in use, reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStatus {
    /// 1-based index of the active token
    pub current_api_key: usize,
    pub total_api_keys: usize,
}

/// Fixed set of bearer tokens with a shared cursor
#[derive(Debug)]
pub struct KeyRing {
    tokens: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRing {
    /// Create a ring; at least one token is required
    pub fn new(tokens: Vec<String>) -> Result<Self, ConfigError> {
        if tokens.is_empty() {
            return Err(ConfigError::NoBearerTokens);
        }

        Ok(Self {
            tokens,
            cursor: AtomicUsize::new(0),
        })
    }

    fn index(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Token under the cursor
    pub fn current(&self) -> &str {
        &self.tokens[self.index()]
    }

    /// 0-based index and token under the cursor, read together
    pub fn checkout(&self) -> (usize, &str) {
        let index = self.index();
        (index, &self.tokens[index])
    }

    /// 1-based number of the active token
    pub fn current_number(&self) -> usize {
        self.index() + 1
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Move past the token at `used`, wrapping around. Returns the 1-based
    /// number of the active token afterwards.
    ///
    /// When the cursor has already left `used`, another request rotated for
    /// the same limit and the cursor stays where it is.
    pub fn rotate_from(&self, used: usize) -> usize {
        let next = (used + 1) % self.tokens.len();
        match self
            .cursor
            .compare_exchange(used, next, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => next + 1,
            Err(current) => current + 1,
        }
    }

    pub fn status(&self) -> KeyStatus {
        KeyStatus {
            current_api_key: self.current_number(),
            total_api_keys: self.tokens.len(),
        }
    }
}
