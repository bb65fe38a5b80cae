//! Authorization client boundary: role assignment operations and their
//! wire-level error shape.
//!
//! The concrete client (Azure SDK, REST, whatever the host agent wires in)
//! lives behind the [`RoleAssignments`] trait so the retry layer can be
//! exercised against a mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal type stamped on every create request. This crate assigns roles
/// to workload service identities only.
pub const SERVICE_PRINCIPAL: &str = "ServicePrincipal";

/// Properties of a role assignment create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentProperties {
    pub principal_id: String,
    pub role_definition_id: String,
    pub principal_type: String,
}

/// Body of a role assignment create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentCreateParameters {
    pub properties: RoleAssignmentProperties,
}

impl RoleAssignmentCreateParameters {
    /// Parameters granting `role_definition_id` to a service principal.
    /// The principal type is fixed, not caller input.
    pub fn service_principal(principal_id: &str, role_definition_id: &str) -> Self {
        Self {
            properties: RoleAssignmentProperties {
                principal_id: principal_id.to_string(),
                role_definition_id: role_definition_id.to_string(),
                principal_type: SERVICE_PRINCIPAL.to_string(),
            },
        }
    }
}

/// A role assignment as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Option<RoleAssignmentProperties>,
}

/// Error returned by the authorization service.
///
/// The service reports failures as an HTTP status plus a machine-readable
/// error code token in the body. Both are parsed into fields exactly once,
/// here, so classification works on the normalized code instead of scanning
/// display text. The raw status/code/message stay attached for reporting.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: u16,
    code: Option<String>,
    message: String,
}

impl ApiError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// An error the service returned without a code token (e.g. a bare 403
    /// from a gateway).
    pub fn without_code(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Normalized machine-readable error code, if the response carried one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    // Mirrors the service's textual error form so operators see the same
    // shape the SDK would print.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RESPONSE {}", self.status)?;
        if let Some(code) = &self.code {
            write!(f, "\nERROR CODE: {}", code)?;
        }
        if !self.message.is_empty() {
            write!(f, "\n{}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Role assignment operations against the authorization service.
///
/// Only `create` participates in the retry path; `delete` and
/// `list_for_scope` exist on the same collaborator for the host agent's
/// uninstall and inspection surfaces.
#[async_trait]
pub trait RoleAssignments: Send + Sync {
    async fn create(
        &self,
        scope: &str,
        assignment_name: &str,
        parameters: &RoleAssignmentCreateParameters,
    ) -> Result<RoleAssignment, ApiError>;

    async fn delete(&self, scope: &str, assignment_name: &str) -> Result<(), ApiError>;

    async fn list_for_scope(&self, scope: &str) -> Result<Vec<RoleAssignment>, ApiError>;
}
