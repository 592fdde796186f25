//! Save/delete actions and the invoker trait that performs them.

use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{JobId, UserId};

/// Parameters for bookmarking a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveJobParams {
    pub user_id: UserId,
    pub job_id: JobId,
}

/// Parameters for deleting a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobParams {
    pub job_id: JobId,
}

/// Response body of a mutating job action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Turn a non-success body into an error.
    pub fn into_result(self) -> Result<(), ActionError> {
        if self.success {
            Ok(())
        } else {
            Err(ActionError::Rejected {
                message: self.message,
            })
        }
    }
}

/// The two mutating actions a card can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Save,
    Delete,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Save => write!(f, "save"),
            ActionKind::Delete => write!(f, "delete"),
        }
    }
}

/// Why a job action did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("sign in to save jobs")]
    NotSignedIn,
    #[error("a {0} is already in progress")]
    InFlight(ActionKind),
}

/// Future returned by [`JobActions`] methods.
///
/// Not `Send`: invokers run on the single-threaded UI loop.
pub type ActionFuture<'a> = LocalBoxFuture<'a, Result<ActionResponse, ActionError>>;

/// Capability that performs job mutations against the backend.
///
/// Transport faults are reported as `Err(ActionError::Transport)`; a server
/// refusal arrives as `Ok` with `success == false`.
pub trait JobActions {
    /// Bookmark a job for a user.
    fn save_job(&self, params: SaveJobParams) -> ActionFuture<'_>;

    /// Delete a job posting.
    fn delete_job(&self, params: DeleteJobParams) -> ActionFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_message_is_optional_on_the_wire() {
        let response: ActionResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(response, ActionResponse::ok());
        assert_eq!(
            serde_json::to_string(&ActionResponse::ok()).unwrap(),
            r#"{"success":true}"#
        );
    }

    #[test]
    fn failed_response_becomes_rejected_error() {
        let err = ActionResponse::failed("job closed").into_result().unwrap_err();
        assert_eq!(
            err,
            ActionError::Rejected {
                message: Some("job closed".into())
            }
        );
        assert_eq!(err.to_string(), "request rejected: job closed");
    }

    #[test]
    fn rejected_without_message_has_readable_text() {
        let err = ActionError::Rejected { message: None };
        assert_eq!(err.to_string(), "request rejected: no reason given");
    }
}
