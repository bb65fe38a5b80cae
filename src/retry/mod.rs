//! Retry and backoff policy for role assignment.
//!
//! This module encapsulates error classification (already-exists, principal
//! propagation, authorization denials) and exponential backoff decisions so
//! the assignment loop stays a thin driver over a pure, independently
//! testable policy.

mod classify;
mod policy;

pub use classify::{
    classify, CODE_AUTHORIZATION_FAILED, CODE_PRINCIPAL_NOT_FOUND, CODE_ROLE_ASSIGNMENT_EXISTS,
};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
