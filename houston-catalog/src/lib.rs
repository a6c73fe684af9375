//! Predefined HTTP error catalog for Houston.
//!
//! Each [`HttpError`] variant describes one standard client (4xx) or server
//! (5xx) error kind and converts into the [`CatalogEntry`] shape consumed by
//! [`Houston::from_catalog`].
//!
//! # Example
//!
//! ```ignore
//! use houston::{CatalogOptions, Houston};
//! use houston_catalog::{HoustonCatalogExt, HttpError};
//!
//! let houston = Houston::default();
//! let record = houston.raise(HttpError::NotFound, CatalogOptions::new().message("no such user"));
//! assert_eq!(record.name(), Some("NOT_FOUND"));
//! ```

use houston::{CatalogEntry, CatalogOptions, ErrorRecord, Houston};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard HTTP error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum HttpError {
    // =========================================================================
    // Client Errors (4xx)
    // =========================================================================
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeout,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    PayloadTooLarge,
    UriTooLong,
    UnsupportedMediaType,
    RangeNotSatisfiable,
    ExpectationFailed,
    ImATeapot,
    MisdirectedRequest,
    UnprocessableEntity,
    Locked,
    FailedDependency,
    TooEarly,
    UpgradeRequired,
    PreconditionRequired,
    TooManyRequests,
    RequestHeaderFieldsTooLarge,
    UnavailableForLegalReasons,

    // =========================================================================
    // Server Errors (5xx)
    // =========================================================================
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    HttpVersionNotSupported,
    VariantAlsoNegotiates,
    InsufficientStorage,
    LoopDetected,
    NotExtended,
    NetworkAuthenticationRequired,
}

impl HttpError {
    /// Returns the HTTP status code.
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::PaymentRequired => 402,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotAcceptable => 406,
            Self::ProxyAuthenticationRequired => 407,
            Self::RequestTimeout => 408,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::LengthRequired => 411,
            Self::PreconditionFailed => 412,
            Self::PayloadTooLarge => 413,
            Self::UriTooLong => 414,
            Self::UnsupportedMediaType => 415,
            Self::RangeNotSatisfiable => 416,
            Self::ExpectationFailed => 417,
            Self::ImATeapot => 418,
            Self::MisdirectedRequest => 421,
            Self::UnprocessableEntity => 422,
            Self::Locked => 423,
            Self::FailedDependency => 424,
            Self::TooEarly => 425,
            Self::UpgradeRequired => 426,
            Self::PreconditionRequired => 428,
            Self::TooManyRequests => 429,
            Self::RequestHeaderFieldsTooLarge => 431,
            Self::UnavailableForLegalReasons => 451,

            Self::InternalServerError => 500,
            Self::NotImplemented => 501,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::HttpVersionNotSupported => 505,
            Self::VariantAlsoNegotiates => 506,
            Self::InsufficientStorage => 507,
            Self::LoopDetected => 508,
            Self::NotExtended => 510,
            Self::NetworkAuthenticationRequired => 511,
        }
    }

    /// Returns the reason phrase, used as the record's `category`.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::PaymentRequired => "Payment Required",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::NotAcceptable => "Not Acceptable",
            Self::ProxyAuthenticationRequired => "Proxy Authentication Required",
            Self::RequestTimeout => "Request Timeout",
            Self::Conflict => "Conflict",
            Self::Gone => "Gone",
            Self::LengthRequired => "Length Required",
            Self::PreconditionFailed => "Precondition Failed",
            Self::PayloadTooLarge => "Payload Too Large",
            Self::UriTooLong => "URI Too Long",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::RangeNotSatisfiable => "Range Not Satisfiable",
            Self::ExpectationFailed => "Expectation Failed",
            Self::ImATeapot => "I'm a teapot",
            Self::MisdirectedRequest => "Misdirected Request",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::Locked => "Locked",
            Self::FailedDependency => "Failed Dependency",
            Self::TooEarly => "Too Early",
            Self::UpgradeRequired => "Upgrade Required",
            Self::PreconditionRequired => "Precondition Required",
            Self::TooManyRequests => "Too Many Requests",
            Self::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            Self::UnavailableForLegalReasons => "Unavailable For Legal Reasons",

            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented => "Not Implemented",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::GatewayTimeout => "Gateway Timeout",
            Self::HttpVersionNotSupported => "HTTP Version Not Supported",
            Self::VariantAlsoNegotiates => "Variant Also Negotiates",
            Self::InsufficientStorage => "Insufficient Storage",
            Self::LoopDetected => "Loop Detected",
            Self::NotExtended => "Not Extended",
            Self::NetworkAuthenticationRequired => "Network Authentication Required",
        }
    }

    /// Returns the symbolic name, e.g. `NOT_FOUND`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::PaymentRequired => "PAYMENT_REQUIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::NotAcceptable => "NOT_ACCEPTABLE",
            Self::ProxyAuthenticationRequired => "PROXY_AUTHENTICATION_REQUIRED",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::Conflict => "CONFLICT",
            Self::Gone => "GONE",
            Self::LengthRequired => "LENGTH_REQUIRED",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UriTooLong => "URI_TOO_LONG",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::RangeNotSatisfiable => "RANGE_NOT_SATISFIABLE",
            Self::ExpectationFailed => "EXPECTATION_FAILED",
            Self::ImATeapot => "IM_A_TEAPOT",
            Self::MisdirectedRequest => "MISDIRECTED_REQUEST",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::Locked => "LOCKED",
            Self::FailedDependency => "FAILED_DEPENDENCY",
            Self::TooEarly => "TOO_EARLY",
            Self::UpgradeRequired => "UPGRADE_REQUIRED",
            Self::PreconditionRequired => "PRECONDITION_REQUIRED",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::RequestHeaderFieldsTooLarge => "REQUEST_HEADER_FIELDS_TOO_LARGE",
            Self::UnavailableForLegalReasons => "UNAVAILABLE_FOR_LEGAL_REASONS",

            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::BadGateway => "BAD_GATEWAY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::GatewayTimeout => "GATEWAY_TIMEOUT",
            Self::HttpVersionNotSupported => "HTTP_VERSION_NOT_SUPPORTED",
            Self::VariantAlsoNegotiates => "VARIANT_ALSO_NEGOTIATES",
            Self::InsufficientStorage => "INSUFFICIENT_STORAGE",
            Self::LoopDetected => "LOOP_DETECTED",
            Self::NotExtended => "NOT_EXTENDED",
            Self::NetworkAuthenticationRequired => "NETWORK_AUTHENTICATION_REQUIRED",
        }
    }

    /// Returns whether the caller or the server is at fault.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self.code_number() {
            400..=499 => ErrorClass::Client,
            _ => ErrorClass::Server,
        }
    }

    /// Returns the catalog entry handed to [`Houston::from_catalog`].
    #[must_use]
    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry::new(self.code_number(), self.reason()).with_name(self.name())
    }

    /// Look up a kind by status code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.code_number() == code)
    }

    /// Look up a kind by symbolic name, e.g. `TOO_MANY_REQUESTS`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.name() == name)
    }

    /// Returns every catalog entry, ordered by status code.
    #[must_use]
    pub const fn all() -> &'static [HttpError] {
        &[
            // Client
            Self::BadRequest,
            Self::Unauthorized,
            Self::PaymentRequired,
            Self::Forbidden,
            Self::NotFound,
            Self::MethodNotAllowed,
            Self::NotAcceptable,
            Self::ProxyAuthenticationRequired,
            Self::RequestTimeout,
            Self::Conflict,
            Self::Gone,
            Self::LengthRequired,
            Self::PreconditionFailed,
            Self::PayloadTooLarge,
            Self::UriTooLong,
            Self::UnsupportedMediaType,
            Self::RangeNotSatisfiable,
            Self::ExpectationFailed,
            Self::ImATeapot,
            Self::MisdirectedRequest,
            Self::UnprocessableEntity,
            Self::Locked,
            Self::FailedDependency,
            Self::TooEarly,
            Self::UpgradeRequired,
            Self::PreconditionRequired,
            Self::TooManyRequests,
            Self::RequestHeaderFieldsTooLarge,
            Self::UnavailableForLegalReasons,
            // Server
            Self::InternalServerError,
            Self::NotImplemented,
            Self::BadGateway,
            Self::ServiceUnavailable,
            Self::GatewayTimeout,
            Self::HttpVersionNotSupported,
            Self::VariantAlsoNegotiates,
            Self::InsufficientStorage,
            Self::LoopDetected,
            Self::NotExtended,
            Self::NetworkAuthenticationRequired,
        ]
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code_number(), self.reason())
    }
}

impl From<HttpError> for CatalogEntry {
    fn from(error: HttpError) -> Self {
        error.entry()
    }
}

/// Which side of an exchange an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    /// 4xx: the request was at fault.
    Client,
    /// 5xx: the server failed a valid request.
    Server,
}

impl ErrorClass {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Server => "Server",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build records straight from catalog kinds.
pub trait HoustonCatalogExt {
    fn raise(&self, error: HttpError, options: CatalogOptions) -> ErrorRecord;
}

impl HoustonCatalogExt for Houston {
    fn raise(&self, error: HttpError, options: CatalogOptions) -> ErrorRecord {
        self.from_catalog(&error.entry(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use houston::{ErrorChannel, NoopSink};
    use std::sync::Arc;

    #[test]
    fn test_code_numbers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for error in HttpError::all() {
            assert!(
                seen.insert(error.code_number()),
                "Duplicate status code {} for {:?}",
                error.code_number(),
                error
            );
        }
    }

    #[test]
    fn test_all_is_sorted_by_code() {
        let codes: Vec<u16> = HttpError::all().iter().map(HttpError::code_number).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_classes_follow_code_ranges() {
        for error in HttpError::all() {
            let code = error.code_number();
            match error.class() {
                ErrorClass::Client => assert!((400..500).contains(&code), "{error:?}"),
                ErrorClass::Server => assert!((500..600).contains(&code), "{error:?}"),
            }
        }
    }

    #[test]
    fn test_names_match_serde_representation() {
        for error in HttpError::all() {
            let json = serde_json::to_string(error).expect("serialization failed");
            assert_eq!(json, format!("\"{}\"", error.name()));
        }
    }

    #[test]
    fn test_entry_shape() {
        let entry = HttpError::NotFound.entry();
        assert_eq!(entry.code, Some(404));
        assert_eq!(entry.string.as_deref(), Some("Not Found"));
        assert_eq!(entry.name.as_deref(), Some("NOT_FOUND"));
        assert_eq!(CatalogEntry::from(HttpError::NotFound), entry);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(HttpError::from_code(429), Some(HttpError::TooManyRequests));
        assert_eq!(HttpError::from_code(200), None);
        assert_eq!(
            HttpError::from_name("GATEWAY_TIMEOUT"),
            Some(HttpError::GatewayTimeout)
        );
        assert_eq!(HttpError::from_name("gateway_timeout"), None);
    }

    #[test]
    fn test_display_implementations() {
        assert_eq!(HttpError::ImATeapot.to_string(), "418 I'm a teapot");
        assert_eq!(ErrorClass::Server.to_string(), "Server");
    }

    #[test]
    fn test_raise_builds_catalog_record() {
        let houston = Houston::with_sink(ErrorChannel::new(), Arc::new(NoopSink));
        let record = houston.raise(
            HttpError::ServiceUnavailable,
            CatalogOptions::new().message("maintenance window"),
        );

        assert_eq!(record.code_number(), Some(503));
        assert_eq!(record.category(), Some("Service Unavailable"));
        assert_eq!(record.name(), Some("SERVICE_UNAVAILABLE"));
        assert_eq!(record.message(), Some("maintenance window"));
    }

    /// Contract test: guards against accidental removal of catalog kinds.
    #[test]
    fn test_total_entry_count() {
        assert_eq!(HttpError::all().len(), 40);
    }

    mod proptest_lookup {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn from_code_round_trips(code in 0u16..1000) {
                if let Some(error) = HttpError::from_code(code) {
                    prop_assert_eq!(error.code_number(), code);
                    prop_assert_eq!(HttpError::from_name(error.name()), Some(error));
                } else {
                    prop_assert!(HttpError::all().iter().all(|e| e.code_number() != code));
                }
            }
        }
    }
}
