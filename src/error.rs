//! Unified error types for the signer
//!
//! All errors flow through this module for consistent handling
//! and user-facing reporting. There are no automatic retries: every
//! failure is either an input mismatch the caller must correct or a
//! hardware/network condition the operator must resolve out-of-band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::device::DeviceError;

/// Main error type for all signer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl SignerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn unsupported_address_format(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedAddressFormat, msg)
    }

    pub fn address_not_on_device(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AddressNotOnDevice, msg)
    }

    pub fn unsupported_script_kind(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedScriptKind, msg)
    }

    pub fn insufficient_funds(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientFunds, msg)
    }

    pub fn device_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeviceUnavailable, msg)
    }

    pub fn device_rejected(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeviceRejected, msg)
    }

    pub fn nothing_to_sign(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NothingToSign, msg)
    }

    pub fn mainnet_disabled(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MainnetDisabled, msg)
    }

    pub fn network_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for SignerError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    UnsupportedAddressFormat,
    NothingToSign,
    MainnetDisabled,

    // Resolution errors
    AddressNotOnDevice,

    // Transaction errors
    UnsupportedScriptKind,
    InsufficientFunds,

    // Device errors
    DeviceUnavailable,
    DeviceRejected,

    // Network errors
    NetworkError,
    Timeout,

    // Parse errors
    ParseError,
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for signer operations
pub type SignerResult<T> = Result<T, SignerError>;

// Conversions from common error types

impl From<serde_json::Error> for SignerError {
    fn from(e: serde_json::Error) -> Self {
        SignerError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for SignerError {
    fn from(e: hex::FromHexError) -> Self {
        SignerError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<reqwest::Error> for SignerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SignerError::new(ErrorCode::Timeout, "Request timed out")
        } else if e.is_connect() {
            SignerError::new(ErrorCode::NetworkError, "Connection failed")
        } else {
            SignerError::new(ErrorCode::NetworkError, e.to_string())
        }
    }
}

impl From<DeviceError> for SignerError {
    fn from(e: DeviceError) -> Self {
        match e {
            DeviceError::NoDeviceFound => {
                SignerError::device_unavailable("no signing device found")
            }
            DeviceError::Rejected(_) => SignerError::device_rejected(e.to_string()),
            DeviceError::Transport(_) | DeviceError::Protocol(_) => {
                SignerError::device_unavailable(e.to_string())
            }
        }
    }
}
