//! Role assignment with propagation-aware retry.
//!
//! Creating a role assignment right after creating its principal routinely
//! fails with `PrincipalNotFound` until the identity replicates to the
//! authorization service. The loop here absorbs exactly that condition with
//! exponential backoff and fails fast on everything else.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::client::{ApiError, RoleAssignmentCreateParameters, RoleAssignments};
use crate::retry::{classify, ErrorKind, RetryDecision, RetryPolicy};

/// Error returned by [`RoleAssigner::assign_role`].
#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    /// The service rejected the assignment and retrying cannot help
    /// (authorization denial or an unclassified error).
    #[error("assigning role '{role}' at {scope} failed on attempt {attempt}: {source}")]
    Rejected {
        role: String,
        scope: String,
        attempt: u32,
        #[source]
        source: ApiError,
    },

    /// Every allowed attempt saw the principal as unknown.
    #[error(
        "failed to assign role '{role}' after {attempts} attempts: principal {principal_id} \
         is still not visible to the authorization service (Azure AD replication delay): {source}"
    )]
    PrincipalNotVisible {
        role: String,
        principal_id: String,
        attempts: u32,
        #[source]
        source: ApiError,
    },

    /// Cancellation was requested before or between attempts. Match on the
    /// variant itself; there is no underlying cause to string-compare.
    #[error("role assignment canceled")]
    Canceled,

    /// The attempt loop ended without reaching a decision.
    #[error("role assignment retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Drives role assignment create calls against an injected client.
///
/// Holds no mutable state; concurrent `assign_role` calls on clones are
/// independent.
#[derive(Debug, Clone)]
pub struct RoleAssigner<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: RoleAssignments> RoleAssigner<C> {
    pub fn new(client: C) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    pub fn with_policy(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Grant `role_definition_id` to `principal_id` at `scope`.
    ///
    /// Returns `Ok(())` once the assignment is in place, including when it
    /// already existed. `role_name` only labels diagnostics.
    pub async fn assign_role(
        &self,
        cancel: &CancellationToken,
        principal_id: &str,
        role_definition_id: &str,
        scope: &str,
        role_name: &str,
    ) -> Result<(), AssignError> {
        // One GUID for all attempts: a retry after a partially applied
        // create must collide into RoleAssignmentExists, not mint a
        // duplicate assignment.
        let assignment_name = Uuid::new_v4().to_string();
        let parameters =
            RoleAssignmentCreateParameters::service_principal(principal_id, role_definition_id);

        for attempt in 1..=self.policy.max_attempts {
            if cancel.is_cancelled() {
                return Err(AssignError::Canceled);
            }

            let err = match self
                .client
                .create(scope, &assignment_name, &parameters)
                .await
            {
                Ok(_) => {
                    tracing::info!(role = role_name, scope, attempt, "role assigned");
                    return Ok(());
                }
                Err(e) => e,
            };

            let kind = classify(&err);
            match self.policy.decide(attempt, kind) {
                RetryDecision::Satisfied => {
                    tracing::info!(role = role_name, scope, "role assignment already exists");
                    return Ok(());
                }
                RetryDecision::Fail if kind == ErrorKind::PrincipalNotFound => {
                    return Err(AssignError::PrincipalNotVisible {
                        role: role_name.to_string(),
                        principal_id: principal_id.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
                RetryDecision::Fail => {
                    return Err(AssignError::Rejected {
                        role: role_name.to_string(),
                        scope: scope.to_string(),
                        attempt,
                        source: err,
                    });
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        role = role_name,
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "principal not visible yet, retrying"
                    );
                    if !sleep_with_cancel(cancel, delay).await {
                        return Err(AssignError::Canceled);
                    }
                }
            }
        }

        Err(AssignError::RetriesExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}

/// Race a timer against cancellation; true if the full delay elapsed.
async fn sleep_with_cancel(cancel: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = cancel.cancelled() => false,
    }
}
