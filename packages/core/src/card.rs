//! Job card state machine.
//!
//! A card caches the saved status of one job for the current user. The
//! parent list owns the authoritative value and re-supplies it after every
//! refresh; [`CardState::reconcile`] overwrites the cache each time it does.
//! Save and delete each have their own loading flag and at most one request
//! of each kind may be outstanding.

use serde::{Deserialize, Serialize};

use crate::{
    ActionError, ActionKind, ActionResponse, CurrentUser, DeleteJobParams, JobActions, JobId,
    SaveJobParams,
};

/// How far the local saved flag is from server truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedPhase {
    /// Local value was last set by the parent.
    #[default]
    Confirmed,
    /// A save succeeded locally and the parent has not re-supplied its value.
    Pending,
    /// The parent re-supplied a value that contradicted a pending save.
    Reverted,
}

/// Which actions are in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Saving,
    Deleting,
    SavingAndDeleting,
}

/// Icon variant for the save control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIcon {
    Outline,
    Filled,
}

/// Result of completing an action on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action succeeded; the parent should refresh.
    Applied,
    /// The action did not take effect.
    Failed(ActionError),
    /// The card was torn down before the response arrived.
    Ignored,
}

impl ActionOutcome {
    /// Whether the parent list should re-fetch.
    pub fn should_refresh(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

/// Local state of one job card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    saved: bool,
    saving: bool,
    deleting: bool,
    phase: SavedPhase,
    last_error: Option<ActionError>,
    mounted: bool,
}

impl CardState {
    /// Create the state for a freshly mounted card.
    pub fn new(saved_init: bool) -> Self {
        Self {
            saved: saved_init,
            saving: false,
            deleting: false,
            phase: SavedPhase::Confirmed,
            last_error: None,
            mounted: true,
        }
    }

    /// Overwrite the local saved flag with the parent-supplied value.
    ///
    /// Any unconfirmed optimistic value is discarded. Loading flags are left
    /// alone since their requests are still outstanding.
    pub fn reconcile(&mut self, saved_init: bool) {
        if !self.mounted {
            return;
        }
        self.phase = match self.phase {
            SavedPhase::Pending if saved_init != self.saved => SavedPhase::Reverted,
            _ => SavedPhase::Confirmed,
        };
        self.saved = saved_init;
    }

    /// Start a save request. Returns the parameters to send.
    pub fn begin_save(
        &mut self,
        user: Option<&CurrentUser>,
        job_id: JobId,
    ) -> Result<SaveJobParams, ActionError> {
        if self.saving {
            return Err(ActionError::InFlight(ActionKind::Save));
        }
        let Some(user) = user else {
            self.last_error = Some(ActionError::NotSignedIn);
            return Err(ActionError::NotSignedIn);
        };
        self.saving = true;
        self.last_error = None;
        Ok(SaveJobParams {
            user_id: user.id.clone(),
            job_id,
        })
    }

    /// Complete a save request with the invoker's result.
    pub fn finish_save(&mut self, result: Result<ActionResponse, ActionError>) -> ActionOutcome {
        if !self.mounted {
            return ActionOutcome::Ignored;
        }
        self.saving = false;
        match result.and_then(ActionResponse::into_result) {
            Ok(()) => {
                self.saved = true;
                self.phase = SavedPhase::Pending;
                ActionOutcome::Applied
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Start a delete request. Returns the parameters to send.
    pub fn begin_delete(&mut self, job_id: JobId) -> Result<DeleteJobParams, ActionError> {
        if self.deleting {
            return Err(ActionError::InFlight(ActionKind::Delete));
        }
        self.deleting = true;
        self.last_error = None;
        Ok(DeleteJobParams { job_id })
    }

    /// Complete a delete request with the invoker's result.
    pub fn finish_delete(&mut self, result: Result<ActionResponse, ActionError>) -> ActionOutcome {
        if !self.mounted {
            return ActionOutcome::Ignored;
        }
        self.deleting = false;
        match result.and_then(ActionResponse::into_result) {
            Ok(()) => ActionOutcome::Applied,
            Err(err) => {
                self.last_error = Some(err.clone());
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Mark the card as unmounted. Later completions change nothing.
    pub fn teardown(&mut self) {
        self.mounted = false;
    }

    /// Clear the displayed error.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn phase(&self) -> SavedPhase {
        self.phase
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// True while either action is in flight.
    pub fn is_loading(&self) -> bool {
        self.saving || self.deleting
    }

    pub fn last_error(&self) -> Option<&ActionError> {
        self.last_error.as_ref()
    }

    pub fn activity(&self) -> Activity {
        match (self.saving, self.deleting) {
            (false, false) => Activity::Idle,
            (true, false) => Activity::Saving,
            (false, true) => Activity::Deleting,
            (true, true) => Activity::SavingAndDeleting,
        }
    }

    pub fn save_icon(&self) -> SaveIcon {
        if self.saved {
            SaveIcon::Filled
        } else {
            SaveIcon::Outline
        }
    }
}

/// Values the card view renders, derived from state and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Show the loading bar.
    pub loading: bool,
    /// Render the save control (viewer mode).
    pub show_save: bool,
    pub save_disabled: bool,
    /// Render the delete control (owner mode).
    pub show_delete: bool,
    pub delete_disabled: bool,
    pub save_icon: SaveIcon,
    pub phase: SavedPhase,
    pub error: Option<String>,
}

impl CardView {
    pub fn derive(state: &CardState, is_my_job: bool) -> Self {
        Self {
            loading: state.is_loading(),
            show_save: !is_my_job,
            save_disabled: state.is_saving(),
            show_delete: is_my_job,
            delete_disabled: state.is_deleting(),
            save_icon: state.save_icon(),
            phase: state.phase(),
            error: state.last_error().map(ToString::to_string),
        }
    }
}

/// Shared cell holding a card's state across an await point.
///
/// Implementations must not hold a borrow across the closure call.
pub trait CardStore {
    fn update<R>(&self, f: impl FnOnce(&mut CardState) -> R) -> R;
}

impl CardStore for std::cell::RefCell<CardState> {
    fn update<R>(&self, f: impl FnOnce(&mut CardState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Run a save through `actions` and record the result in `store`.
pub async fn request_save<S, A>(
    store: &S,
    actions: &A,
    user: Option<&CurrentUser>,
    job_id: JobId,
) -> ActionOutcome
where
    S: CardStore,
    A: JobActions + ?Sized,
{
    let params = match store.update(|card| card.begin_save(user, job_id)) {
        Ok(params) => params,
        Err(err) => return ActionOutcome::Failed(err),
    };
    let result = actions.save_job(params).await;
    store.update(|card| card.finish_save(result))
}

/// Run a delete through `actions` and record the result in `store`.
pub async fn request_delete<S, A>(store: &S, actions: &A, job_id: JobId) -> ActionOutcome
where
    S: CardStore,
    A: JobActions + ?Sized,
{
    let params = match store.update(|card| card.begin_delete(job_id)) {
        Ok(params) => params,
        Err(err) => return ActionOutcome::Failed(err),
    };
    let result = actions.delete_job(params).await;
    store.update(|card| card.finish_delete(result))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use futures_util::FutureExt;
    use futures_util::future::{self, LocalBoxFuture};

    use super::*;
    use crate::ActionFuture;

    fn user() -> CurrentUser {
        CurrentUser::new("user_1", "Ada")
    }

    /// Invoker that replays scripted results and counts calls.
    #[derive(Default)]
    struct ScriptedActions {
        results: RefCell<VecDeque<Result<ActionResponse, ActionError>>>,
        saves: Cell<usize>,
        deletes: Cell<usize>,
    }

    impl ScriptedActions {
        fn with(results: Vec<Result<ActionResponse, ActionError>>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                ..Default::default()
            }
        }

        fn next(&self) -> Result<ActionResponse, ActionError> {
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ActionResponse::ok()))
        }
    }

    impl JobActions for ScriptedActions {
        fn save_job(&self, _params: SaveJobParams) -> ActionFuture<'_> {
            self.saves.set(self.saves.get() + 1);
            let result = self.next();
            async move { result }.boxed_local()
        }

        fn delete_job(&self, _params: DeleteJobParams) -> ActionFuture<'_> {
            self.deletes.set(self.deletes.get() + 1);
            let result = self.next();
            async move { result }.boxed_local()
        }
    }

    /// Invoker whose save only resolves after the test has inspected state.
    struct GatedActions {
        gate: RefCell<Option<LocalBoxFuture<'static, ()>>>,
    }

    impl JobActions for GatedActions {
        fn save_job(&self, _params: SaveJobParams) -> ActionFuture<'_> {
            let gate = self.gate.borrow_mut().take();
            async move {
                if let Some(gate) = gate {
                    gate.await;
                }
                Ok(ActionResponse::ok())
            }
            .boxed_local()
        }

        fn delete_job(&self, _params: DeleteJobParams) -> ActionFuture<'_> {
            future::ready(Ok(ActionResponse::ok())).boxed_local()
        }
    }

    #[test]
    fn mount_matches_saved_init() {
        for saved_init in [false, true] {
            let card = CardState::new(saved_init);
            assert_eq!(card.saved(), saved_init);
            assert_eq!(card.phase(), SavedPhase::Confirmed);
            assert_eq!(card.activity(), Activity::Idle);
            assert!(!card.is_loading());
        }
    }

    #[test]
    fn reconcile_overwrites_local_value() {
        let mut card = CardState::new(false);
        card.reconcile(true);
        assert!(card.saved());
        assert_eq!(card.save_icon(), SaveIcon::Filled);

        card.reconcile(false);
        assert!(!card.saved());
        assert_eq!(card.save_icon(), SaveIcon::Outline);
    }

    #[test]
    fn successful_save_marks_saved_pending() {
        let mut card = CardState::new(false);
        let params = card.begin_save(Some(&user()), JobId::new()).unwrap();
        assert_eq!(params.user_id, user().id);
        assert!(card.is_saving());
        assert!(card.is_loading());

        let outcome = card.finish_save(Ok(ActionResponse::ok()));
        assert!(outcome.should_refresh());
        assert!(card.saved());
        assert_eq!(card.phase(), SavedPhase::Pending);
        assert!(!card.is_loading());
    }

    #[test]
    fn rejected_save_keeps_saved_and_records_error() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        let outcome = card.finish_save(Ok(ActionResponse::failed("duplicate")));

        assert!(!outcome.should_refresh());
        assert!(!card.saved());
        assert!(!card.is_saving());
        assert!(matches!(
            card.last_error(),
            Some(ActionError::Rejected { message: Some(m) }) if m == "duplicate"
        ));
    }

    #[test]
    fn transport_fault_keeps_saved() {
        let mut card = CardState::new(true);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        let outcome = card.finish_save(Err(ActionError::Transport("offline".into())));

        assert_eq!(
            outcome,
            ActionOutcome::Failed(ActionError::Transport("offline".into()))
        );
        assert!(card.saved());
        assert!(!card.is_loading());
    }

    #[test]
    fn second_save_is_refused_while_in_flight() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        let err = card.begin_save(Some(&user()), JobId::new()).unwrap_err();
        assert_eq!(err, ActionError::InFlight(ActionKind::Save));
        assert!(card.last_error().is_none());
    }

    #[test]
    fn save_without_user_is_refused() {
        let mut card = CardState::new(false);
        let err = card.begin_save(None, JobId::new()).unwrap_err();
        assert_eq!(err, ActionError::NotSignedIn);
        assert!(!card.is_saving());
        assert_eq!(card.last_error(), Some(&ActionError::NotSignedIn));
    }

    #[test]
    fn new_request_clears_previous_error() {
        let mut card = CardState::new(false);
        card.begin_delete(JobId::new()).unwrap();
        card.finish_delete(Err(ActionError::Transport("boom".into())));
        assert!(card.last_error().is_some());

        card.begin_save(Some(&user()), JobId::new()).unwrap();
        assert!(card.last_error().is_none());
    }

    #[test]
    fn delete_and_save_flags_are_independent() {
        let mut card = CardState::new(false);
        card.begin_delete(JobId::new()).unwrap();
        assert_eq!(card.activity(), Activity::Deleting);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        assert_eq!(card.activity(), Activity::SavingAndDeleting);
        assert_eq!(
            card.begin_delete(JobId::new()).unwrap_err(),
            ActionError::InFlight(ActionKind::Delete)
        );

        card.finish_delete(Ok(ActionResponse::ok()));
        assert_eq!(card.activity(), Activity::Saving);
        assert!(card.is_loading());
    }

    #[test]
    fn failed_delete_leaves_saved_untouched() {
        let mut card = CardState::new(true);
        card.begin_delete(JobId::new()).unwrap();
        let outcome = card.finish_delete(Ok(ActionResponse::failed("not yours")));
        assert!(!outcome.should_refresh());
        assert!(card.saved());
        assert!(!card.is_deleting());
        assert!(card.last_error().is_some());
    }

    #[test]
    fn pending_save_is_confirmed_by_matching_parent_value() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        card.finish_save(Ok(ActionResponse::ok()));
        card.reconcile(true);
        assert_eq!(card.phase(), SavedPhase::Confirmed);
        assert!(card.saved());
    }

    #[test]
    fn pending_save_is_reverted_by_contradicting_parent_value() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        card.finish_save(Ok(ActionResponse::ok()));
        card.reconcile(false);
        assert_eq!(card.phase(), SavedPhase::Reverted);
        assert!(!card.saved());

        card.reconcile(false);
        assert_eq!(card.phase(), SavedPhase::Confirmed);
    }

    #[test]
    fn completion_after_teardown_is_ignored() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();
        card.teardown();

        let outcome = card.finish_save(Ok(ActionResponse::ok()));
        assert_eq!(outcome, ActionOutcome::Ignored);
        assert!(!outcome.should_refresh());
        assert!(!card.saved());

        card.reconcile(true);
        assert!(!card.saved());
    }

    #[test]
    fn view_shows_exactly_one_action_control() {
        let card = CardState::new(false);

        let owner = CardView::derive(&card, true);
        assert!(owner.show_delete);
        assert!(!owner.show_save);

        let viewer = CardView::derive(&card, false);
        assert!(viewer.show_save);
        assert!(!viewer.show_delete);
    }

    #[test]
    fn view_disables_control_while_in_flight() {
        let mut card = CardState::new(false);
        card.begin_save(Some(&user()), JobId::new()).unwrap();

        let view = CardView::derive(&card, false);
        assert!(view.loading);
        assert!(view.save_disabled);
        assert!(!view.delete_disabled);

        card.finish_save(Ok(ActionResponse::failed("nope")));
        let view = CardView::derive(&card, false);
        assert!(!view.loading);
        assert!(!view.save_disabled);
        assert_eq!(view.save_icon, SaveIcon::Outline);
        assert_eq!(view.error.as_deref(), Some("request rejected: nope"));
    }

    #[test]
    fn view_delete_loading_clears_after_success() {
        let mut card = CardState::new(false);
        card.begin_delete(JobId::new()).unwrap();
        assert!(CardView::derive(&card, true).delete_disabled);

        card.finish_delete(Ok(ActionResponse::ok()));
        let view = CardView::derive(&card, true);
        assert!(!view.loading);
        assert!(!view.delete_disabled);
    }

    #[tokio::test]
    async fn request_save_refreshes_exactly_once_on_success() {
        let store = RefCell::new(CardState::new(false));
        let actions = ScriptedActions::with(vec![Ok(ActionResponse::ok())]);
        let mut refreshes = 0;

        let outcome = request_save(&store, &actions, Some(&user()), JobId::new()).await;
        if outcome.should_refresh() {
            refreshes += 1;
        }

        assert_eq!(refreshes, 1);
        assert_eq!(actions.saves.get(), 1);
        assert!(store.borrow().saved());
        assert!(!store.borrow().is_loading());
    }

    #[tokio::test]
    async fn request_save_failure_does_not_refresh() {
        let store = RefCell::new(CardState::new(false));
        let actions = ScriptedActions::with(vec![
            Ok(ActionResponse::failed("nope")),
            Err(ActionError::Transport("timeout".into())),
        ]);

        for _ in 0..2 {
            let outcome = request_save(&store, &actions, Some(&user()), JobId::new()).await;
            assert!(!outcome.should_refresh());
            assert!(!store.borrow().saved());
            assert!(!store.borrow().is_loading());
        }
        assert_eq!(actions.saves.get(), 2);
    }

    #[tokio::test]
    async fn request_save_without_user_never_invokes() {
        let store = RefCell::new(CardState::new(false));
        let actions = ScriptedActions::default();

        let outcome = request_save(&store, &actions, None, JobId::new()).await;
        assert_eq!(outcome, ActionOutcome::Failed(ActionError::NotSignedIn));
        assert_eq!(actions.saves.get(), 0);
    }

    #[tokio::test]
    async fn request_delete_refreshes_on_success() {
        let store = RefCell::new(CardState::new(false));
        let actions = ScriptedActions::default();

        let outcome = request_delete(&store, &actions, JobId::new()).await;
        assert!(outcome.should_refresh());
        assert_eq!(actions.deletes.get(), 1);
        assert!(!store.borrow().is_deleting());
    }

    #[tokio::test]
    async fn loading_is_visible_until_save_resolves() {
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let store = RefCell::new(CardState::new(false));
        let actions = GatedActions {
            gate: RefCell::new(Some(release_rx.map(|_| ()).boxed_local())),
        };
        let job_id = JobId::new();
        let owner = user();

        let first = request_save(&store, &actions, Some(&owner), job_id);
        let observe = async {
            tokio::task::yield_now().await;
            assert!(store.borrow().is_saving());
            // A racing second request is refused without reaching the invoker.
            let second = request_save(&store, &actions, Some(&owner), job_id).await;
            assert_eq!(
                second,
                ActionOutcome::Failed(ActionError::InFlight(ActionKind::Save))
            );
            let _ = release_tx.send(());
        };

        let (outcome, ()) = future::join(first, observe).await;
        assert!(outcome.should_refresh());
        assert!(!store.borrow().is_loading());
        assert!(store.borrow().saved());
    }
}
