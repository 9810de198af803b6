//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code for logs and for the rendered
//! error panels.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: risk API errors
//! - CRED_xxx: credential store errors
//! - EXTRACT_xxx: page extraction errors
//! - PROC_xxx: record processing errors
//! - CFG_xxx: configuration errors
//!
//! Fatal vs recoverable dispatch goes through [`ErrorCode::class`], never
//! through message matching.

use std::fmt;

use crate::models::types::RemoteResponse;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// HTTP status that produced the error, if any
    pub status: Option<u16>,
    /// Payload the caller may render in place of real data
    pub fallback: Option<RemoteResponse>,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            fallback: None,
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(code, message)
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Fatal or recoverable
    pub fn class(&self) -> ErrorClass {
        self.code.class()
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.class(), ErrorClass::Fatal(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Why a fatal error stops the whole analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// The account tier does not grant access to the risk data
    NeedsEntitlement,
}

/// Dispatch class of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Must reach the top-level caller untouched
    Fatal(FatalReason),
    /// May be converted into a per-check or report-wide error result
    Recoverable,
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Risk API Errors
    // ============================================
    /// HTTP 401/403: upgraded membership required
    ApiNeedVip,
    /// Other non-2xx status
    ApiStatus,
    /// Connection or transport failure
    ApiTransport,
    /// Request timed out
    ApiTimeout,
    /// Response body is not the expected JSON shape
    ApiInvalidBody,

    // ============================================
    // Credential Errors
    // ============================================
    /// Credential store could not be read
    CredentialUnavailable,

    // ============================================
    // Extraction Errors
    // ============================================
    /// Selector evaluation failed on the page
    ExtractSelectorFailed,
    /// Page URL could not be parsed
    ExtractInvalidUrl,
    /// No extraction schema for the site
    ExtractUnsupportedSite,

    // ============================================
    // Processing Errors
    // ============================================
    /// A remote row does not match the record shape
    ProcessorInvalidRecord,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiNeedVip => "API_NEED_VIP",
            Self::ApiStatus => "API_STATUS",
            Self::ApiTransport => "API_TRANSPORT",
            Self::ApiTimeout => "API_TIMEOUT",
            Self::ApiInvalidBody => "API_INVALID_BODY",

            Self::CredentialUnavailable => "CRED_UNAVAILABLE",

            Self::ExtractSelectorFailed => "EXTRACT_SELECTOR_FAILED",
            Self::ExtractInvalidUrl => "EXTRACT_INVALID_URL",
            Self::ExtractUnsupportedSite => "EXTRACT_UNSUPPORTED_SITE",

            Self::ProcessorInvalidRecord => "PROC_INVALID_RECORD",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Only the entitlement gate is fatal
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ApiNeedVip => ErrorClass::Fatal(FatalReason::NeedsEntitlement),
            _ => ErrorClass::Recoverable,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Entitlement gate hit (HTTP 401/403), carries an empty fallback payload
    pub fn need_vip(status: u16) -> Self {
        Self {
            status: Some(status),
            fallback: Some(RemoteResponse::empty()),
            ..Self::new(
                ErrorCode::ApiNeedVip,
                "NeedVip: membership required to access risk data",
            )
        }
    }

    /// Non-success HTTP status
    pub fn api_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorCode::ApiStatus, format!("Risk API returned HTTP {}", status))
        }
    }

    /// Malformed response body
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInvalidBody, msg)
    }

    /// Credential store failure
    pub fn credentials_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CredentialUnavailable, msg)
    }

    /// Remote row could not be decoded
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessorInvalidRecord, msg)
    }

    /// Selector evaluation failure
    pub fn selector_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExtractSelectorFailed, msg)
    }

    /// No schema for the page's host
    pub fn unsupported_site(url: &str) -> Self {
        Self::new(
            ErrorCode::ExtractUnsupportedSite,
            format!("No extraction schema for {}", url),
        )
    }

    /// Invalid configuration
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ApiTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::ApiTransport, "Connection failed")
        } else if err.is_decode() {
            Self::new(ErrorCode::ApiInvalidBody, err.to_string())
        } else {
            Self::new(ErrorCode::ApiTransport, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiInvalidBody, "JSON parse error", err)
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::with_source(ErrorCode::ExtractInvalidUrl, "Invalid page URL", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::api_status(502);
        assert_eq!(err.code, ErrorCode::ApiStatus);
        assert_eq!(err.code_str(), "API_STATUS");
        assert_eq!(err.status, Some(502));
    }

    #[test]
    fn test_need_vip_is_fatal() {
        let err = AppError::need_vip(403);
        assert!(err.is_fatal());
        assert_eq!(
            err.class(),
            ErrorClass::Fatal(FatalReason::NeedsEntitlement)
        );
        assert_eq!(err.status, Some(403));
        assert!(err.fallback.as_ref().is_some_and(|f| f.data.is_empty()));
    }

    #[test]
    fn test_other_codes_are_recoverable() {
        for code in [
            ErrorCode::ApiStatus,
            ErrorCode::ApiTransport,
            ErrorCode::ApiTimeout,
            ErrorCode::ApiInvalidBody,
            ErrorCode::CredentialUnavailable,
            ErrorCode::ProcessorInvalidRecord,
        ] {
            assert_eq!(code.class(), ErrorClass::Recoverable);
        }
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::invalid_record("missing chain_name");
        assert_eq!(err.to_string(), "[PROC_INVALID_RECORD] missing chain_name");
    }
}
