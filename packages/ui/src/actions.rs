//! Job actions backed by the fullstack server functions.

use board_core::{
    ActionError, ActionFuture, ActionKind, ActionOutcome, CardState, CardStore, DeleteJobParams,
    JobActions, JobId, SaveJobParams,
};
use dioxus::prelude::*;

/// Invoker that calls the `api` server functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerJobActions;

fn transport(e: ServerFnError) -> ActionError {
    ActionError::Transport(e.to_string())
}

impl JobActions for ServerJobActions {
    fn save_job(&self, params: SaveJobParams) -> ActionFuture<'_> {
        Box::pin(async move { api::save_job(params).await.map_err(transport) })
    }

    fn delete_job(&self, params: DeleteJobParams) -> ActionFuture<'_> {
        Box::pin(async move { api::delete_job(params).await.map_err(transport) })
    }
}

/// Card state held in a component signal.
#[derive(Clone, Copy, PartialEq)]
pub struct CardSignal(pub Signal<CardState>);

impl CardStore for CardSignal {
    fn update<R>(&self, f: impl FnOnce(&mut CardState) -> R) -> R {
        let mut signal = self.0;
        signal.with_mut(f)
    }
}

/// Write the outcome of a card action to the log.
pub(crate) fn log_outcome(kind: ActionKind, job_id: JobId, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Applied => tracing::debug!("Job {} {} succeeded", job_id, kind),
        ActionOutcome::Failed(ActionError::InFlight(_)) => {
            tracing::debug!("Ignoring repeated {} of job {}", kind, job_id)
        }
        ActionOutcome::Failed(err) => {
            tracing::warn!("Failed to {} job {}: {}", kind, job_id, err)
        }
        ActionOutcome::Ignored => {
            tracing::debug!("Job {} {} finished after its card was removed", job_id, kind)
        }
    }
}
