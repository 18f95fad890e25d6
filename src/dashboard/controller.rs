//! Reminder Lifecycle Controller
//!
//! Runs fetch, create and delete against the reminder service, keeps the
//! in-memory reminder snapshot, and rings the fulfillment cue for reminders
//! that come due.
//!
//! State sits behind a `std::sync::Mutex` that is never held across an
//! `.await`. Fetches are numbered when issued; a response is applied only
//! if no later-issued fetch has been applied already.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::confirm::DeleteConfirmation;
use super::form::ReminderForm;
use super::state::DashboardState;
use crate::api::{ApiError, ReminderApi, ReminderDraft};
use crate::error::{ClientError, ClientResult};
use crate::model::{ReminderId, SessionToken};
use crate::notify::{FulfillmentTracker, Sound, SoundPlayer};
use crate::ops::{InFlight, InFlightGuard, Operation};
use crate::session::SessionStore;

struct Inner {
    state: DashboardState,
    tracker: FulfillmentTracker,
    confirm: DeleteConfirmation,
    /// Sequence number handed to the most recently issued fetch
    issued: u64,
    /// Highest sequence number whose outcome was applied
    applied: u64,
}

/// Dashboard controller shared by the CLI, the watcher and tests
pub struct ReminderController {
    api: Arc<dyn ReminderApi>,
    session: SessionStore,
    player: Arc<dyn SoundPlayer>,
    in_flight: InFlight,
    inner: Mutex<Inner>,
}

impl ReminderController {
    /// Build a controller and pick up the stored identity
    pub fn new(
        api: Arc<dyn ReminderApi>,
        session: SessionStore,
        player: Arc<dyn SoundPlayer>,
        window: Duration,
    ) -> Self {
        let controller = Self {
            api,
            session,
            player,
            in_flight: InFlight::new(),
            inner: Mutex::new(Inner {
                state: DashboardState::default(),
                tracker: FulfillmentTracker::new(window),
                confirm: DeleteConfirmation::new(),
                issued: 0,
                applied: 0,
            }),
        };
        if let Err(e) = controller.sync_identity() {
            tracing::warn!(error = %e, "Could not read stored session");
        }
        controller
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current dashboard state
    pub fn state(&self) -> DashboardState {
        let inner = self.lock();
        let mut state = inner.state.clone();
        state.pending_delete = inner.confirm.pending();
        state
    }

    /// Ids already cued for the current identity
    pub fn is_fulfilled(&self, id: ReminderId) -> bool {
        self.lock().tracker.contains(id)
    }

    /// Re-read the stored profile. A changed identity resets the
    /// fulfilled-notification set.
    pub fn sync_identity(&self) -> ClientResult<Option<String>> {
        let name = self.session.user()?.map(|u| u.name);
        let mut inner = self.lock();
        if inner.tracker.observe_identity(name.as_deref()) {
            tracing::debug!(user = ?name, "Identity changed, notification set reset");
        }
        inner.state.user_name = name.clone();
        Ok(name)
    }

    /// Fetch the full reminder list and replace the snapshot
    pub async fn refresh(&self) -> ClientResult<()> {
        self.sync_identity()?;
        self.lock().state.clear_messages();
        self.fetch().await
    }

    async fn fetch(&self) -> ClientResult<()> {
        let op = Operation::FetchReminders;
        let Some(token) = self.token(op)? else {
            return Err(ClientError::MissingSession(op));
        };

        let seq = {
            let mut inner = self.lock();
            inner.issued += 1;
            inner.state.loading = true;
            inner.issued
        };

        let outcome = self.api.list_reminders(&token).await;

        let (rung, result) = {
            let mut inner = self.lock();
            if seq <= inner.applied {
                tracing::debug!(seq, applied = inner.applied, "Discarding stale fetch");
                return Ok(());
            }
            inner.applied = seq;
            inner.state.loading = seq < inner.issued;

            let result = match outcome {
                Ok(reminders) => {
                    tracing::info!(count = reminders.len(), "Reminders fetched");
                    inner.state.reminders = reminders;
                    Ok(())
                }
                Err(e) => {
                    log_api_error(op, &e);
                    let err = ClientError::api(op, e);
                    inner.state.error = Some(err.user_message());
                    Err(err)
                }
            };

            // A failed fetch keeps the previous snapshot, which is still scanned
            let rung = if inner.state.loading {
                Vec::new()
            } else {
                let Inner { state, tracker, .. } = &mut *inner;
                tracker.scan(&state.reminders, Utc::now())
            };
            (rung, result)
        };

        self.ring(&rung);
        result
    }

    /// Run the notification check against the current snapshot at `now`.
    /// Returns the ids that were cued. Does nothing while loading.
    pub fn scan_at(&self, now: DateTime<Utc>) -> Vec<ReminderId> {
        let rung = {
            let mut inner = self.lock();
            if inner.state.loading {
                return Vec::new();
            }
            let Inner { state, tracker, .. } = &mut *inner;
            tracker.scan(&state.reminders, now)
        };
        self.ring(&rung);
        rung
    }

    fn ring(&self, rung: &[ReminderId]) {
        for id in rung {
            tracing::info!(reminder_id = id, "Reminder due");
            self.player.play(Sound::Fulfillment);
        }
    }

    /// Edit the uncommitted create form
    pub fn edit_draft(&self, edit: impl FnOnce(&mut ReminderForm)) {
        edit(&mut self.lock().state.draft);
    }

    /// Validate and submit the draft held in state
    pub async fn submit_draft(&self) -> ClientResult<()> {
        let draft = {
            let mut inner = self.lock();
            match inner.state.draft.to_draft() {
                Ok(draft) => draft,
                Err(e) => {
                    inner.state.clear_messages();
                    inner.state.error = Some(e.user_message());
                    return Err(e);
                }
            }
        };
        self.create_reminder(&draft).await
    }

    /// Create a reminder, then re-fetch and play the fulfillment cue
    pub async fn create_reminder(&self, draft: &ReminderDraft) -> ClientResult<()> {
        let op = Operation::CreateReminder;
        let _guard = self.begin(op)?;

        let Some(token) = self.token(op)? else {
            return Err(ClientError::MissingSession(op));
        };

        if let Err(e) = self.api.create_reminder(&token, draft).await {
            return Err(self.fail(op, e));
        }

        tracing::info!(title = %draft.title(), remind_at = %draft.remind_at(), "Reminder created");
        {
            let mut inner = self.lock();
            inner.state.draft.clear();
            inner.state.success = op.success_message().map(str::to_string);
        }
        self.player.play(Sound::Fulfillment);
        self.refetch_after(op).await;
        Ok(())
    }

    /// Select a reminder for deletion and open the dialog
    pub fn request_delete(&self, id: ReminderId) {
        self.lock().confirm.request(id);
    }

    /// Dismiss the dialog without deleting anything
    pub fn cancel_delete(&self) -> Option<ReminderId> {
        self.lock().confirm.cancel()
    }

    /// Delete the selected reminder. Without a selection this is a no-op
    /// and returns `Ok(None)`.
    pub async fn confirm_delete(&self) -> ClientResult<Option<ReminderId>> {
        let op = Operation::DeleteReminder;
        let _guard = self.begin(op)?;

        let Some(id) = self.lock().confirm.take() else {
            return Ok(None);
        };

        let Some(token) = self.token(op)? else {
            return Err(ClientError::MissingSession(op));
        };

        if let Err(e) = self.api.delete_reminder(&token, id).await {
            return Err(self.fail(op, e));
        }

        tracing::info!(reminder_id = id, "Reminder deleted");
        self.lock().state.success = op.success_message().map(str::to_string);
        self.player.play(Sound::Regret);
        self.refetch_after(op).await;
        Ok(Some(id))
    }

    /// Forget the session and everything shown for it. In-flight fetches
    /// are left to finish and their results are dropped.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        let mut inner = self.lock();
        inner.issued += 1;
        inner.applied = inner.issued;
        inner.tracker.observe_identity(None);
        inner.confirm.cancel();
        inner.state = DashboardState::default();
        tracing::info!("Logged out");
        Ok(())
    }

    fn begin(&self, op: Operation) -> ClientResult<InFlightGuard> {
        let guard = self
            .in_flight
            .try_begin(op)
            .ok_or(ClientError::Busy(op))?;
        self.lock().state.clear_messages();
        Ok(guard)
    }

    /// Stored token, or the operation's missing-session error recorded in state
    fn token(&self, op: Operation) -> ClientResult<Option<SessionToken>> {
        let token = self.session.token()?;
        if token.is_none() {
            let mut inner = self.lock();
            inner.state.loading = false;
            inner.state.error = Some(op.missing_session_message().to_string());
            tracing::debug!(operation = %op, "No session token");
        }
        Ok(token)
    }

    fn fail(&self, op: Operation, e: ApiError) -> ClientError {
        log_api_error(op, &e);
        let err = ClientError::api(op, e);
        self.lock().state.error = Some(err.user_message());
        err
    }

    async fn refetch_after(&self, op: Operation) {
        if let Err(e) = self.fetch().await {
            tracing::warn!(operation = %op, error = %e, "Re-fetch after success failed");
        }
    }
}

fn log_api_error(op: Operation, e: &ApiError) {
    match e {
        ApiError::Malformed(detail) => {
            tracing::warn!(operation = %op, detail = %detail, "Malformed response")
        }
        ApiError::Rejected { status, message } => {
            tracing::warn!(operation = %op, status, message = ?message, "Request rejected")
        }
        ApiError::Transport(detail) => {
            tracing::warn!(operation = %op, detail = %detail, "Request failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{format_timestamp, Reminder, Session, User};
    use crate::notify::DEFAULT_WINDOW;
    use crate::testing::{FakeReminderApi, RecordingPlayer};
    use chrono::Duration as ChronoDuration;
    use tokio::sync::Notify;

    struct Harness {
        api: Arc<FakeReminderApi>,
        session: SessionStore,
        player: Arc<RecordingPlayer>,
        controller: Arc<ReminderController>,
    }

    fn harness_with(user: Option<&str>) -> Harness {
        harness_windowed(user, DEFAULT_WINDOW)
    }

    fn harness_windowed(user: Option<&str>, window: Duration) -> Harness {
        let api = Arc::new(FakeReminderApi::new());
        let session = SessionStore::in_memory();
        if let Some(name) = user {
            session
                .save(&Session::new(SessionToken::new("tok"), Some(User::new(name))))
                .unwrap();
        }
        let player = Arc::new(RecordingPlayer::new());
        let controller = Arc::new(ReminderController::new(
            api.clone(),
            session.clone(),
            player.clone(),
            window,
        ));
        Harness {
            api,
            session,
            player,
            controller,
        }
    }

    fn harness() -> Harness {
        harness_with(Some("Ada"))
    }

    fn reminder(id: ReminderId, offset: ChronoDuration) -> Reminder {
        Reminder {
            id,
            title: format!("r{}", id),
            description: "d".to_string(),
            remind_at: format_timestamp(Utc::now() + offset),
        }
    }

    fn draft(offset: ChronoDuration) -> ReminderDraft {
        ReminderDraft::new("Tea", "Steep", format_timestamp(Utc::now() + offset)).unwrap()
    }

    #[tokio::test]
    async fn test_missing_session_blocks_every_operation() {
        let h = harness_with(None);

        let err = h.controller.refresh().await.unwrap_err();
        assert!(matches!(err, ClientError::MissingSession(Operation::FetchReminders)));
        let state = h.controller.state();
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("You must be logged in to view / add reminders.")
        );

        h.controller
            .create_reminder(&draft(ChronoDuration::hours(1)))
            .await
            .unwrap_err();
        assert_eq!(
            h.controller.state().error.as_deref(),
            Some("Please register or login first.")
        );

        h.controller.request_delete(1);
        h.controller.confirm_delete().await.unwrap_err();
        assert_eq!(
            h.controller.state().error.as_deref(),
            Some("You must be logged in to delete reminders.")
        );

        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_replaces_snapshot() {
        let h = harness();
        h.api.set_reminders(vec![
            reminder(1, ChronoDuration::hours(1)),
            reminder(2, ChronoDuration::hours(2)),
        ]);
        h.controller.refresh().await.unwrap();
        assert_eq!(h.controller.state().reminders.len(), 2);

        h.api.set_reminders(vec![reminder(3, ChronoDuration::hours(3))]);
        h.controller.refresh().await.unwrap();
        let state = h.controller.state();
        assert_eq!(state.reminders, h.api.reminders());
        assert_eq!(state.user_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_list_and_shows_message() {
        let h = harness();
        h.api.set_reminders(vec![reminder(1, ChronoDuration::hours(1))]);
        h.controller.refresh().await.unwrap();

        h.api.fail_next_list(ApiError::Rejected {
            status: 401,
            message: Some("Invalid token".to_string()),
        });
        h.controller.refresh().await.unwrap_err();
        let state = h.controller.state();
        assert_eq!(state.error.as_deref(), Some("Invalid token"));
        assert_eq!(state.reminders.len(), 1);

        h.api.fail_next_list(ApiError::Malformed("not an array".to_string()));
        h.controller.refresh().await.unwrap_err();
        assert_eq!(
            h.controller.state().error.as_deref(),
            Some("Failed to fetch reminders.")
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_still_scans_previous_snapshot() {
        let h = harness_windowed(Some("Ada"), Duration::from_secs(1));
        h.api.set_reminders(vec![reminder(1, ChronoDuration::milliseconds(1600))]);
        h.controller.refresh().await.unwrap();
        assert!(h.player.played().is_empty());

        tokio::time::sleep(Duration::from_secs(1)).await;
        h.api.fail_next_list(ApiError::Transport("connection refused".to_string()));
        h.controller.refresh().await.unwrap_err();

        let state = h.controller.state();
        assert!(!state.loading);
        assert_eq!(state.reminders.len(), 1);
        assert_eq!(h.player.count(Sound::Fulfillment), 1);
        assert!(h.controller.is_fulfilled(1));
    }

    #[tokio::test]
    async fn test_create_plays_cue_then_due_reminder_rings_once() {
        let h = harness();

        h.controller
            .create_reminder(&draft(ChronoDuration::seconds(30)))
            .await
            .unwrap();

        let state = h.controller.state();
        assert_eq!(state.success.as_deref(), Some("Reminder created successfully!"));
        assert_eq!(state.reminders.len(), 1);
        let id = state.reminders[0].id;

        // Creation cue plus the due cue from the re-fetch scan
        assert_eq!(h.player.count(Sound::Fulfillment), 2);
        assert!(h.controller.is_fulfilled(id));

        h.controller.refresh().await.unwrap();
        assert!(h.controller.scan_at(Utc::now()).is_empty());
        assert_eq!(h.player.count(Sound::Fulfillment), 2);
    }

    #[tokio::test]
    async fn test_create_failure_surfaces_server_message() {
        let h = harness();
        h.controller.edit_draft(|form| {
            form.title = "Tea".to_string();
            form.description = "Steep".to_string();
            form.remind_at = "2030-01-01T00:00:00.000Z".to_string();
        });
        h.api.fail_next_create(ApiError::Rejected {
            status: 400,
            message: Some("remind_at is invalid".to_string()),
        });

        h.controller.submit_draft().await.unwrap_err();
        let state = h.controller.state();
        assert_eq!(state.error.as_deref(), Some("remind_at is invalid"));
        // Draft survives a failed submit
        assert_eq!(state.draft.title, "Tea");
        assert!(h.player.played().is_empty());

        h.controller.submit_draft().await.unwrap();
        assert!(h.controller.state().draft.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_draft() {
        let h = harness();
        h.controller.edit_draft(|form| form.title = "Tea".to_string());
        let err = h.controller.submit_draft().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidForm { field: "description", .. }));
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let h = harness();
        h.api.set_reminders(vec![reminder(1, ChronoDuration::hours(1))]);
        h.controller.refresh().await.unwrap();

        // Confirm without a selection
        assert_eq!(h.controller.confirm_delete().await.unwrap(), None);

        // Select, then dismiss
        h.controller.request_delete(1);
        assert!(h.controller.state().is_dialog_open());
        assert_eq!(h.controller.cancel_delete(), Some(1));
        assert!(!h.controller.state().is_dialog_open());

        assert_eq!(h.api.delete_calls(), 0);
        assert_eq!(h.controller.state().reminders.len(), 1);

        // Select, then confirm
        h.controller.request_delete(1);
        assert_eq!(h.controller.confirm_delete().await.unwrap(), Some(1));
        assert_eq!(h.api.delete_calls(), 1);
        let state = h.controller.state();
        assert!(state.reminders.is_empty());
        assert_eq!(state.success.as_deref(), Some("Reminder deleted successfully!"));
        assert_eq!(h.player.count(Sound::Regret), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_list() {
        let h = harness();
        h.api.set_reminders(vec![reminder(1, ChronoDuration::hours(1))]);
        h.controller.refresh().await.unwrap();
        h.api.fail_next_delete(ApiError::Transport("connection reset".to_string()));

        h.controller.request_delete(1);
        h.controller.confirm_delete().await.unwrap_err();
        let state = h.controller.state();
        assert_eq!(state.error.as_deref(), Some("Failed to delete reminder"));
        assert_eq!(state.reminders.len(), 1);
        assert_eq!(h.player.count(Sound::Regret), 0);
    }

    #[tokio::test]
    async fn test_second_create_while_in_flight_is_busy() {
        let h = harness();
        let gate = Arc::new(Notify::new());
        h.api.gate_create(gate.clone());

        let controller = h.controller.clone();
        let first = tokio::spawn(async move {
            controller
                .create_reminder(&draft(ChronoDuration::hours(1)))
                .await
        });

        while h.api.create_calls() == 0 {
            tokio::task::yield_now().await;
        }

        let err = h
            .controller
            .create_reminder(&draft(ChronoDuration::hours(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Busy(Operation::CreateReminder)));

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(h.api.create_calls(), 1);

        // Flag is released once the first call finished
        h.controller
            .create_reminder(&draft(ChronoDuration::hours(3)))
            .await
            .unwrap();
        assert_eq!(h.api.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let h = harness();
        let slow = Arc::new(Notify::new());
        let fast = Arc::new(Notify::new());
        h.api
            .script_list(slow.clone(), Ok(vec![reminder(1, ChronoDuration::hours(1))]));
        h.api
            .script_list(fast.clone(), Ok(vec![reminder(2, ChronoDuration::hours(2))]));

        let controller = h.controller.clone();
        let older = tokio::spawn(async move { controller.refresh().await });
        while h.api.list_calls() < 1 {
            tokio::task::yield_now().await;
        }
        let controller = h.controller.clone();
        let newer = tokio::spawn(async move { controller.refresh().await });
        while h.api.list_calls() < 2 {
            tokio::task::yield_now().await;
        }

        // Newer resolves first, older afterwards
        fast.notify_one();
        newer.await.unwrap().unwrap();
        slow.notify_one();
        older.await.unwrap().unwrap();

        let state = h.controller.state();
        assert_eq!(state.reminders.len(), 1);
        assert_eq!(state.reminders[0].id, 2);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_logout_drops_in_flight_fetch() {
        let h = harness();
        let gate = Arc::new(Notify::new());
        h.api
            .script_list(gate.clone(), Ok(vec![reminder(1, ChronoDuration::seconds(5))]));

        let controller = h.controller.clone();
        let pending = tokio::spawn(async move { controller.refresh().await });
        while h.api.list_calls() < 1 {
            tokio::task::yield_now().await;
        }

        h.controller.logout().unwrap();
        gate.notify_one();
        pending.await.unwrap().unwrap();

        let state = h.controller.state();
        assert!(state.reminders.is_empty());
        assert!(state.user_name.is_none());
        assert!(h.session.load().unwrap().is_none());
        assert!(h.player.played().is_empty());
    }

    #[tokio::test]
    async fn test_identity_change_rings_again() {
        let h = harness();
        h.api.set_reminders(vec![reminder(7, ChronoDuration::seconds(20))]);

        h.controller.refresh().await.unwrap();
        h.controller.refresh().await.unwrap();
        assert_eq!(h.player.count(Sound::Fulfillment), 1);

        h.session
            .save(&Session::new(SessionToken::new("tok2"), Some(User::new("Grace"))))
            .unwrap();
        h.controller.refresh().await.unwrap();
        assert_eq!(h.player.count(Sound::Fulfillment), 2);
        assert_eq!(h.controller.state().user_name.as_deref(), Some("Grace"));
    }

    #[tokio::test]
    async fn test_scan_respects_window() {
        let h = harness();
        h.api.set_reminders(vec![
            reminder(1, ChronoDuration::minutes(10)),
            reminder(2, ChronoDuration::seconds(-61)),
        ]);
        h.controller.refresh().await.unwrap();
        assert!(h.player.played().is_empty());

        // Ten minutes later the first one is due
        let later = Utc::now() + ChronoDuration::minutes(10);
        assert_eq!(h.controller.scan_at(later), vec![1]);
        assert!(h.controller.scan_at(later).is_empty());
    }
}
