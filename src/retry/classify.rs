//! Classify authorization API errors into retry policy error kinds.

use crate::client::ApiError;
use crate::retry::policy::ErrorKind;

/// Code the service returns when the assignment is already in place.
pub const CODE_ROLE_ASSIGNMENT_EXISTS: &str = "RoleAssignmentExists";
/// Code returned while the principal has not propagated to the
/// authorization service yet.
pub const CODE_PRINCIPAL_NOT_FOUND: &str = "PrincipalNotFound";
/// Code for an authorization denial (alongside a bare HTTP 403).
pub const CODE_AUTHORIZATION_FAILED: &str = "AuthorizationFailed";

/// Classify an authorization API error for retry decisions.
///
/// Pure function over the error's normalized code field; the error itself is
/// never consumed or wrapped, so the original stays available for reporting.
pub fn classify(e: &ApiError) -> ErrorKind {
    match e.code() {
        Some(CODE_ROLE_ASSIGNMENT_EXISTS) => ErrorKind::AlreadyExists,
        Some(CODE_PRINCIPAL_NOT_FOUND) => ErrorKind::PrincipalNotFound,
        Some(CODE_AUTHORIZATION_FAILED) => ErrorKind::Forbidden,
        _ if e.status() == 403 => ErrorKind::Forbidden,
        _ => ErrorKind::Other,
    }
}
