//! Scripted mock of the authorization client for assignment-loop tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rolegrant::client::{
    ApiError, RoleAssignment, RoleAssignmentCreateParameters, RoleAssignments,
};
use rolegrant::retry::{CODE_PRINCIPAL_NOT_FOUND, CODE_ROLE_ASSIGNMENT_EXISTS};

pub type CreateResult = Result<RoleAssignment, ApiError>;

/// One create call as the mock saw it.
#[derive(Debug, Clone)]
pub struct SeenCreate {
    pub scope: String,
    pub assignment_name: String,
    pub parameters: RoleAssignmentCreateParameters,
    pub at: tokio::time::Instant,
}

/// Plays back one scripted result per create call; the last entry repeats
/// once the script runs out. Clones share state, so a test keeps one clone
/// to inspect after the assigner consumed the other.
#[derive(Clone)]
pub struct MockRoleAssignments {
    script: Arc<Vec<CreateResult>>,
    calls: Arc<AtomicU32>,
    seen: Arc<Mutex<Vec<SeenCreate>>>,
}

impl MockRoleAssignments {
    pub fn scripted(script: Vec<CreateResult>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self {
            script: Arc::new(script),
            calls: Arc::new(AtomicU32::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(result: CreateResult) -> Self {
        Self::scripted(vec![result])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenCreate> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleAssignments for MockRoleAssignments {
    async fn create(
        &self,
        scope: &str,
        assignment_name: &str,
        parameters: &RoleAssignmentCreateParameters,
    ) -> CreateResult {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.seen.lock().unwrap().push(SeenCreate {
            scope: scope.to_string(),
            assignment_name: assignment_name.to_string(),
            parameters: parameters.clone(),
            at: tokio::time::Instant::now(),
        });
        self.script[n.min(self.script.len() - 1)].clone()
    }

    async fn delete(&self, _scope: &str, _assignment_name: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_for_scope(&self, _scope: &str) -> Result<Vec<RoleAssignment>, ApiError> {
        Ok(Vec::new())
    }
}

pub fn principal_not_found() -> ApiError {
    ApiError::new(
        400,
        CODE_PRINCIPAL_NOT_FOUND,
        "Principal 1111-2222 does not exist in the directory",
    )
}

pub fn role_assignment_exists() -> ApiError {
    ApiError::new(409, CODE_ROLE_ASSIGNMENT_EXISTS, "The role assignment already exists")
}

pub fn forbidden() -> ApiError {
    ApiError::without_code(
        403,
        "the client does not have permission to perform action \
         'Microsoft.Authorization/roleAssignments/write'",
    )
}
