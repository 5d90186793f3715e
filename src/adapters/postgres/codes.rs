//! Conversions between stored integer codes and domain enums.
//!
//! Statuses and coded values persist as the platform's integer codes, so the
//! round trip goes through the domain `from_code` constructors. A code the
//! domain rejects means corrupt data, reported as a database error.

use crate::domain::foundation::DomainError;

pub(super) fn decode<T>(
    column: &str,
    code: i32,
    from_code: impl Fn(i32) -> Result<T, DomainError>,
) -> Result<T, DomainError> {
    from_code(code).map_err(|_| {
        DomainError::database(format!(
            "Stored code {} is not valid for column {}",
            code, column
        ))
    })
}

pub(super) fn db_err(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, err))
}
