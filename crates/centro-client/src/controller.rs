//! Session controller event loop.
//!
//! One tokio task owns the whole session: state, the current call
//! handle, history, and every timer. All mutation happens on the loop in
//! response to a device event, a user command, or a timer deadline, so
//! no locks are needed and the duration clock cannot outlive its call.
//! Observers get a [`SessionSnapshot`] on a watch channel after every
//! change.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use centro_core::config::ClientConfig;
use centro_core::error::AppError;
use centro_twilio::token::AccessTokenClaims;

use crate::device::{CallHandle, DeviceEvent, VoiceDevice};
use crate::history::{CallHistory, CallRecord, CallStatus};
use crate::session::{SessionFailure, SessionNotice, SessionSnapshot, SessionState};
use crate::token_source::TokenSource;

const COMMAND_BUFFER: usize = 32;

/// User-driven operations on the session.
#[derive(Debug)]
enum Command {
    PlaceCall { to: String },
    HangUp,
    ToggleMute,
    Shutdown,
}

/// Spawns session loops.
pub struct CallController;

impl CallController {
    /// Starts a session over the given device and token source.
    ///
    /// The loop initializes itself (token fetch, then registration) and
    /// then serves commands and device events until the handle is shut
    /// down or dropped.
    pub fn spawn(
        device: Arc<dyn VoiceDevice>,
        events: mpsc::Receiver<DeviceEvent>,
        token_source: Arc<dyn TokenSource>,
        config: ClientConfig,
    ) -> ControllerHandle {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, snapshot) = watch::channel(SessionSnapshot::initial());

        let session = SessionLoop {
            device,
            token_source,
            config,
            publisher,
            state: SessionState::Uninitialized,
            handle: None,
            history: CallHistory::new(),
            identity: None,
            muted: false,
            duration_secs: 0,
            notice: None,
            error: None,
            answer_at: None,
            tick_at: None,
            settle_at: None,
            refresh_at: None,
        };
        let task = tokio::spawn(session.run(events, command_rx));

        ControllerHandle {
            commands,
            snapshot,
            task,
        }
    }
}

/// Handle for talking to a running session loop.
#[derive(Debug)]
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl ControllerHandle {
    /// Starts an outbound call. Ignored unless the session is registered
    /// with a free call slot.
    pub async fn place_call(&self, to: impl Into<String>) -> Result<(), AppError> {
        self.send(Command::PlaceCall { to: to.into() }).await
    }

    /// Hangs up the current call, answered or still ringing.
    pub async fn hang_up(&self) -> Result<(), AppError> {
        self.send(Command::HangUp).await
    }

    /// Flips the mute state of the current call.
    pub async fn toggle_mute(&self) -> Result<(), AppError> {
        self.send(Command::ToggleMute).await
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// A watch receiver that yields a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    /// Stops the loop and tears the device down.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.task.await;
    }

    async fn send(&self, command: Command) -> Result<(), AppError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::internal("Session loop has stopped"))
    }
}

/// All session state, owned by one task.
struct SessionLoop {
    device: Arc<dyn VoiceDevice>,
    token_source: Arc<dyn TokenSource>,
    config: ClientConfig,
    publisher: watch::Sender<SessionSnapshot>,

    state: SessionState,
    /// Handle of the call occupying the slot. Present exactly when the
    /// state is call-pending or in-call.
    handle: Option<Arc<dyn CallHandle>>,
    history: CallHistory,
    identity: Option<String>,
    muted: bool,
    duration_secs: u64,
    notice: Option<SessionNotice>,
    error: Option<String>,

    /// Auto-answer deadline for a ringing inbound call.
    answer_at: Option<Instant>,
    /// Next duration-clock tick while a call is live.
    tick_at: Option<Instant>,
    /// When the call-ended state returns to ready.
    settle_at: Option<Instant>,
    /// When a fresh token is requested.
    refresh_at: Option<Instant>,
}

impl SessionLoop {
    async fn run(
        mut self,
        mut events: mpsc::Receiver<DeviceEvent>,
        mut commands: mpsc::Receiver<Command>,
    ) {
        self.initialize().await;

        loop {
            tokio::select! {
                maybe_command = commands.recv() => match maybe_command {
                    Some(command) => {
                        if self.handle_command(command).await {
                            break;
                        }
                    }
                    // Handle dropped: tear down like an explicit shutdown.
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event).await,
                _ = sleep_until_opt(self.answer_at), if self.answer_at.is_some() => {
                    self.answer_pending_call().await;
                }
                _ = sleep_until_opt(self.tick_at), if self.tick_at.is_some() => {
                    self.advance_duration();
                }
                _ = sleep_until_opt(self.settle_at), if self.settle_at.is_some() => {
                    self.settle_to_ready();
                }
                _ = sleep_until_opt(self.refresh_at), if self.refresh_at.is_some() => {
                    self.refresh_token().await;
                }
            }
        }

        if let Err(err) = self.device.destroy().await {
            tracing::warn!(error = %err, "device teardown failed");
        }
        tracing::debug!("session loop stopped");
    }

    /// Fetch a token and kick off registration. Readiness arrives later
    /// as a `Registered` event.
    async fn initialize(&mut self) {
        self.transition(SessionState::Registering);

        let fetched = match self.token_source.fetch(&self.config.identity).await {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::error!(error = %err, "token fetch failed");
                self.error = Some(err.message);
                self.transition(SessionState::Failed {
                    failure: SessionFailure::TokenFetch,
                });
                return;
            }
        };

        self.identity = Some(fetched.identity.clone());
        self.schedule_refresh(&fetched.token);

        if let Err(err) = self.device.register(&fetched.token).await {
            tracing::error!(error = %err, "device setup failed");
            self.error = Some(err.message);
            self.transition(SessionState::Failed {
                failure: SessionFailure::DeviceInit,
            });
        }
    }

    /// Returns true when the loop should stop.
    async fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::PlaceCall { to } => self.place_call(to).await,
            Command::HangUp => self.hang_up().await,
            Command::ToggleMute => self.toggle_mute().await,
            Command::Shutdown => return true,
        }
        false
    }

    async fn handle_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Registered => {
                self.error = None;
                if matches!(self.state, SessionState::Registering) {
                    self.transition(SessionState::Ready);
                } else {
                    self.publish();
                }
            }
            DeviceEvent::RegistrationFailed { message } => {
                tracing::error!(message = %message, "registration failed");
                self.error = Some(message);
                self.transition(SessionState::Failed {
                    failure: SessionFailure::Registration,
                });
            }
            DeviceEvent::Incoming { call } => self.incoming_call(call).await,
            DeviceEvent::CallAccepted { call_sid } => self.call_accepted(&call_sid),
            DeviceEvent::CallDisconnected { call_sid }
            | DeviceEvent::CallCanceled { call_sid }
            | DeviceEvent::CallRejected { call_sid } => self.call_terminated(&call_sid),
            DeviceEvent::Error { message } => {
                tracing::error!(message = %message, "device error");
                self.error = Some(message.clone());
                self.notify(SessionNotice::DeviceError { message });
            }
        }
    }

    async fn place_call(&mut self, to: String) {
        if !self.state.is_idle() || to.is_empty() {
            tracing::warn!(%to, state = ?self.state.presence(), "ignoring dial request");
            return;
        }

        match self.device.connect(&to).await {
            Ok(handle) => {
                tracing::info!(%to, sid = handle.sid(), "outbound call started");
                self.settle_at = None;
                self.handle = Some(handle);
                self.transition(SessionState::CallPending {
                    call: CallRecord::outbound(to),
                });
            }
            Err(err) => {
                tracing::error!(error = %err, %to, "outbound call failed");
                self.notify(SessionNotice::DialFailed);
            }
        }
    }

    async fn hang_up(&mut self) {
        if let Some(handle) = &self.handle {
            if let Err(err) = handle.disconnect().await {
                tracing::error!(error = %err, "hang-up failed");
            }
        }
    }

    async fn toggle_mute(&mut self) {
        let Some(handle) = &self.handle else {
            return;
        };
        let muted = !self.muted;
        match handle.set_muted(muted).await {
            Ok(()) => {
                self.muted = muted;
                self.publish();
            }
            Err(err) => tracing::error!(error = %err, "mute toggle failed"),
        }
    }

    async fn incoming_call(&mut self, call: Arc<dyn CallHandle>) {
        if !self.state.is_idle() {
            tracing::info!(sid = call.sid(), "rejecting incoming call, slot occupied");
            if let Err(err) = call.reject().await {
                tracing::warn!(error = %err, "busy rejection failed");
            }
            return;
        }

        let params = call.parameters();
        tracing::info!(
            sid = call.sid(),
            from = params.from.as_deref().unwrap_or(""),
            "incoming call"
        );

        self.settle_at = None;
        self.answer_at = Some(Instant::now() + Duration::from_millis(self.config.answer_delay_ms));
        self.handle = Some(call);
        self.transition(SessionState::CallPending {
            call: CallRecord::inbound(params.from, params.to),
        });
    }

    /// Auto-answer deadline fired.
    async fn answer_pending_call(&mut self) {
        self.answer_at = None;
        if !matches!(self.state, SessionState::CallPending { .. }) {
            return;
        }
        if let Some(handle) = &self.handle {
            if let Err(err) = handle.accept().await {
                tracing::error!(error = %err, "auto-answer failed");
            }
        }
    }

    fn call_accepted(&mut self, call_sid: &str) {
        if !self.matches_current(call_sid) {
            return;
        }
        let SessionState::CallPending { call } = &self.state else {
            return;
        };

        let mut call = call.clone();
        call.status = CallStatus::InProgress;
        call.started_at = Utc::now();

        self.answer_at = None;
        self.duration_secs = 0;
        self.tick_at = Some(Instant::now() + Duration::from_secs(1));
        self.history.push(call.clone());
        tracing::info!(id = %call.id, "call answered");
        self.transition(SessionState::InCall { call });
    }

    /// Any terminal event for the current call: remote hangup, caller
    /// abandon, local rejection, or our own disconnect coming back.
    fn call_terminated(&mut self, call_sid: &str) {
        if !self.matches_current(call_sid) {
            tracing::debug!(sid = call_sid, "ignoring terminal event for a stale call");
            return;
        }

        if let SessionState::InCall { call } = &self.state {
            self.history.finalize(call.id, self.duration_secs);
            tracing::info!(id = %call.id, duration_secs = self.duration_secs, "call finished");
        }

        self.handle = None;
        self.muted = false;
        self.answer_at = None;
        self.tick_at = None;
        self.duration_secs = 0;
        self.settle_at =
            Some(Instant::now() + Duration::from_secs(self.config.post_call_settle_seconds));
        self.transition(SessionState::CallEnded);
    }

    fn advance_duration(&mut self) {
        // Reschedule from the previous deadline so ticks do not drift.
        if let Some(previous) = self.tick_at {
            self.tick_at = Some(previous + Duration::from_secs(1));
        }
        self.duration_secs += 1;
        self.publish();
    }

    fn settle_to_ready(&mut self) {
        self.settle_at = None;
        if matches!(self.state, SessionState::CallEnded) {
            self.transition(SessionState::Ready);
        }
    }

    fn schedule_refresh(&mut self, token: &str) {
        self.refresh_at = None;
        let claims = match AccessTokenClaims::peek(token) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!(error = %err, "token not inspectable, refresh disabled");
                return;
            }
        };
        let remaining = claims.remaining_ttl_seconds();
        let delay = remaining.saturating_sub(self.config.token_refresh_margin_seconds);
        self.refresh_at = Some(Instant::now() + Duration::from_secs(delay));
        tracing::debug!(delay_secs = delay, "token refresh scheduled");
    }

    /// Refresh deadline fired. Failure is reported like any platform
    /// error and never tears down a call in progress.
    async fn refresh_token(&mut self) {
        self.refresh_at = None;
        // A failed session has no registration to keep alive.
        if matches!(self.state, SessionState::Failed { .. }) {
            return;
        }
        let identity = self
            .identity
            .clone()
            .unwrap_or_else(|| self.config.identity.clone());

        let fetched = match self.token_source.fetch(&identity).await {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::error!(error = %err, "token refresh failed");
                self.error = Some(err.message.clone());
                self.notify(SessionNotice::DeviceError {
                    message: err.message,
                });
                return;
            }
        };

        match self.device.update_token(&fetched.token).await {
            Ok(()) => {
                tracing::info!("access token refreshed");
                self.schedule_refresh(&fetched.token);
            }
            Err(err) => {
                tracing::error!(error = %err, "token swap failed");
                self.error = Some(err.message.clone());
                self.notify(SessionNotice::DeviceError {
                    message: err.message,
                });
            }
        }
    }

    fn matches_current(&self, call_sid: &str) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| handle.sid() == call_sid)
    }

    /// Moves to the next state, dropping any transient notice, and
    /// publishes.
    fn transition(&mut self, next: SessionState) {
        self.notice = None;
        self.state = next;
        self.publish();
    }

    fn notify(&mut self, notice: SessionNotice) {
        self.notice = Some(notice);
        self.publish();
    }

    fn publish(&self) {
        let _ = self.publisher.send(SessionSnapshot {
            state: self.state.clone(),
            identity: self.identity.clone(),
            muted: self.muted,
            duration_secs: self.duration_secs,
            notice: self.notice.clone(),
            error: self.error.clone(),
            history: self.history.records().to_vec(),
        });
    }
}

/// Pending forever when no deadline is set; the select arm is guarded by
/// `is_some` so the pending branch is never polled.
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
