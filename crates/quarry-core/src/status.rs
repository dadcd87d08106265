// SPDX-FileCopyrightText: 2026 Quarry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The success/failure result signal carried next to a response on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuarryError;

/// Result signal: a numeric code (0 is success) plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    code: i32,
    message: String,
}

impl Status {
    /// A successful status with the conventional "OK" message.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: "OK".to_string(),
        }
    }

    /// A failed status with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: message.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.code == 0
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl From<&QuarryError> for Status {
    fn from(err: &QuarryError) -> Self {
        Self::failure(err.to_string())
    }
}

impl From<QuarryError> for Status {
    fn from(err: QuarryError) -> Self {
        Self::from(&err)
    }
}

impl<T> From<&Result<T, QuarryError>> for Status {
    fn from(result: &Result<T, QuarryError>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(err) => Self::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_ok() {
        let status = Status::success();
        assert!(status.ok());
        assert_eq!(status.code(), 0);
        assert_eq!(status.message(), "OK");
    }

    #[test]
    fn error_maps_to_failure_with_display_message() {
        let err = QuarryError::DuplicateItem {
            registry: "config".into(),
            item: "filesystem".into(),
        };
        let status = Status::from(&err);
        assert!(!status.ok());
        assert_eq!(status.code(), 1);
        assert!(status.message().contains("Duplicate"));
    }

    #[test]
    fn result_maps_to_status() {
        let ok: Result<(), QuarryError> = Ok(());
        assert!(Status::from(&ok).ok());

        let err: Result<(), QuarryError> = Err(QuarryError::NotImplemented);
        assert_eq!(
            Status::from(&err).message(),
            "plugin does not implement call"
        );
    }

    #[test]
    fn status_serializes_as_code_and_message() {
        let json = serde_json::to_value(Status::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"code": 1, "message": "nope"}));
    }
}
