//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    GroupNotFound,
    CycleNotFound,
    FundNotFound,
    ChargeNotFound,
    StrategyNotFound,
    CalendarNotFound,

    // Request/state errors
    InvalidRequest,
    InvalidStateTransition,
    NotSupported,

    // Infrastructure errors
    DatabaseError,
    SerializationError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::GroupNotFound => "GROUP_NOT_FOUND",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::FundNotFound => "FUND_NOT_FOUND",
            ErrorCode::ChargeNotFound => "CHARGE_NOT_FOUND",
            ErrorCode::StrategyNotFound => "STRATEGY_NOT_FOUND",
            ErrorCode::CalendarNotFound => "CALENDAR_NOT_FOUND",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::NotSupported => "NOT_SUPPORTED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// A single rejected request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    pub parameter: String,
    pub message: String,
}

impl ParamError {
    pub fn new(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parameter, self.message)
    }
}

/// Standard domain error with a category code, a dotted machine-readable
/// message code, and the accumulated parameter errors when validation failed.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message_code: String,
    pub message: String,
    pub param_errors: Vec<ParamError>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(
        code: ErrorCode,
        message_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message_code: message_code.into(),
            message: message.into(),
            param_errors: Vec::new(),
        }
    }

    /// Creates an aggregated validation error.
    pub fn validation(errors: Vec<ParamError>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message_code: "validation.msg.validation.errors.exist".to_string(),
            message: "Validation errors exist".to_string(),
            param_errors: errors,
        }
    }

    /// Creates an invalid request error with a dotted reason code.
    pub fn invalid_request(message_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message_code, message)
    }

    /// Creates an invalid state transition error with a dotted reason code.
    pub fn invalid_state(message_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidStateTransition, message_code, message)
    }

    /// Creates an error for an operation this build does not carry out.
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotSupported,
            "error.msg.operation.not.supported",
            message,
        )
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, "error.msg.database", message)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for err in &self.param_errors {
            write!(f, "; {}", err)?;
        }
        Ok(())
    }
}

impl Error for DomainError {}
