//! SessionController -- one task per consultation session.
//!
//! The controller owns the [`SessionState`] and its three deadlines, and is
//! the only place either is mutated. Visitor commands, reply results and
//! timer expiry all arrive at a single `tokio::select!` loop, so the phase
//! check inside each transition is the only guard needed.
//!
//! Reply requests and summary dispatch run on detached tasks: the reply task
//! reports back through an internal channel, the dispatch task reports to
//! nobody. Outstanding reply calls are never aborted; a result that arrives
//! after termination is dropped by the phase guard.

use std::fmt;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use conseil_types::chat::Turn;
use conseil_types::config::{ConsultationConfig, SessionTimings};
use conseil_types::contact::ContactMetadata;
use conseil_types::error::SessionError;
use conseil_types::session::{EndReason, SessionSnapshot};

use crate::reply::client::{Reply, ReplyClient, APOLOGY_REPLY, FALLBACK_GREETING};
use crate::reply::service::ReplyService;
use crate::summary::dispatcher::SummaryDispatcher;
use crate::summary::sink::SummarySink;

use super::deadline::Deadline;
use super::navigation::Navigator;
use super::state::SessionState;

const COMMAND_BUFFER: usize = 16;

/// Timing and routing knobs for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub timings: SessionTimings,
    pub confirmation_path: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&ConsultationConfig::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &ConsultationConfig) -> Self {
        Self {
            timings: config.timings,
            confirmation_path: config.confirmation_path.clone(),
        }
    }
}

/// What caused termination. Logged; the summary only carries the
/// [`EndReason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Inactivity,
    EndRequested,
    Unmount,
}

impl Trigger {
    fn end_reason(self) -> EndReason {
        match self {
            Trigger::Inactivity => EndReason::Inactivity,
            Trigger::EndRequested | Trigger::Unmount => EndReason::Manual,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Inactivity => write!(f, "inactivity"),
            Trigger::EndRequested => write!(f, "end_requested"),
            Trigger::Unmount => write!(f, "unmount"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyPurpose {
    Greeting,
    Answer,
}

impl ReplyPurpose {
    fn fallback(self) -> &'static str {
        match self {
            ReplyPurpose::Greeting => FALLBACK_GREETING,
            ReplyPurpose::Answer => APOLOGY_REPLY,
        }
    }
}

#[derive(Debug)]
struct ReplyEvent {
    purpose: ReplyPurpose,
    reply: Reply,
}

#[derive(Debug)]
enum Command {
    Send {
        text: String,
        ack: oneshot::Sender<Result<(), SessionError>>,
    },
    End {
        done: oneshot::Sender<()>,
    },
}

pub struct SessionController<S, K, N> {
    session_id: Uuid,
    metadata: ContactMetadata,
    settings: SessionSettings,
    state: SessionState,
    replies: ReplyClient<S>,
    dispatcher: SummaryDispatcher<K>,
    navigator: N,
    warning_timer: Deadline,
    end_timer: Deadline,
    navigation_timer: Deadline,
    dispatch: Option<JoinHandle<()>>,
    reply_tx: mpsc::UnboundedSender<ReplyEvent>,
    reply_rx: mpsc::UnboundedReceiver<ReplyEvent>,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl<S, K, N> SessionController<S, K, N>
where
    S: ReplyService + 'static,
    K: SummarySink + 'static,
    N: Navigator,
{
    /// Validate the contact metadata and start the session task.
    ///
    /// The greeting request is issued immediately. Must be called from
    /// within a tokio runtime.
    pub fn mount(
        metadata: ContactMetadata,
        settings: SessionSettings,
        replies: ReplyClient<S>,
        dispatcher: SummaryDispatcher<K>,
        navigator: N,
    ) -> Result<SessionHandle, SessionError> {
        let metadata = metadata.validated()?;
        let session_id = Uuid::now_v7();

        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionSnapshot::new(session_id));
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);

        let controller = Self {
            session_id,
            metadata,
            settings,
            state: SessionState::new(),
            replies,
            dispatcher,
            navigator,
            warning_timer: Deadline::idle(),
            end_timer: Deadline::idle(),
            navigation_timer: Deadline::idle(),
            dispatch: None,
            reply_tx,
            reply_rx,
            state_tx,
        };

        let span = info_span!("consultation", session_id = %session_id);
        let task = tokio::spawn(controller.run(commands_rx).instrument(span));

        Ok(SessionHandle {
            session_id,
            commands: commands_tx,
            state: state_rx,
            task,
        })
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!(first_name = self.metadata.first_name(), "Session mounted");

        self.state.begin_greeting();
        self.publish();
        self.spawn_reply(ReplyPurpose::Greeting, Vec::new());

        let mut attached = true;
        loop {
            tokio::select! {
                biased;

                command = commands.recv(), if attached => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        attached = false;
                        self.terminate(Trigger::Unmount);
                    }
                },
                Some(event) = self.reply_rx.recv() => self.handle_reply(event),
                () = self.end_timer.elapsed() => self.terminate(Trigger::Inactivity),
                () = self.warning_timer.elapsed() => self.handle_warning(),
                () = self.navigation_timer.elapsed() => {
                    info!(destination = %self.settings.confirmation_path, "Navigating to confirmation");
                    self.navigator.go_to_confirmation(&self.settings.confirmation_path);
                    break;
                }
            }
        }

        // Navigation never waits on delivery, but the task outlives it.
        if let Some(dispatch) = self.dispatch.take() {
            if let Err(e) = dispatch.await {
                warn!(error = %e, "Summary dispatch task failed");
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Send { text, ack } => {
                let result = self.handle_send(&text);
                let _ = ack.send(result);
            }
            Command::End { done } => {
                self.terminate(Trigger::EndRequested);
                let _ = done.send(());
            }
        }
    }

    fn handle_send(&mut self, text: &str) -> Result<(), SessionError> {
        let transcript = self.state.accept_visitor(text).inspect_err(|e| {
            debug!(phase = %self.state.phase(), error = %e, "Visitor message rejected");
        })?;

        self.arm_inactivity_timers();
        debug!(turns = transcript.len(), "Visitor turn appended");
        self.publish();
        self.spawn_reply(ReplyPurpose::Answer, transcript);
        Ok(())
    }

    fn handle_reply(&mut self, event: ReplyEvent) {
        let text = event.reply.text_or(event.purpose.fallback());
        if !self.state.apply_reply(Turn::advisor(text)) {
            debug!(purpose = ?event.purpose, "Discarding reply that resolved after the session ended");
            return;
        }

        if event.purpose == ReplyPurpose::Greeting {
            self.arm_inactivity_timers();
        }
        self.publish();
    }

    fn handle_warning(&mut self) {
        if self.state.show_warning() {
            info!("Inactivity warning shown");
            self.publish();
        }
    }

    /// Idempotent: only the first trigger ends the session.
    fn terminate(&mut self, trigger: Trigger) {
        let reason = trigger.end_reason();
        if !self.state.end(reason) {
            debug!(%trigger, "Session already ended");
            return;
        }

        self.warning_timer.cancel();
        self.end_timer.cancel();
        info!(
            %trigger,
            reason = %reason,
            turns = self.state.transcript().len(),
            "Session ended"
        );

        let dispatcher = self.dispatcher.clone();
        let metadata = self.metadata.clone();
        let transcript = self.state.transcript().to_vec();
        self.dispatch = Some(tokio::spawn(
            async move {
                dispatcher.dispatch(metadata, transcript, reason).await;
            }
            .in_current_span(),
        ));

        self.navigation_timer
            .arm(self.settings.timings.navigation_delay());
        self.publish();
    }

    fn arm_inactivity_timers(&mut self) {
        let timings = self.settings.timings;
        self.warning_timer.arm(timings.warning_after());
        self.end_timer.arm(timings.end_after());
    }

    fn spawn_reply(&self, purpose: ReplyPurpose, transcript: Vec<Turn>) {
        let replies = self.replies.clone();
        let metadata = self.metadata.clone();
        let events = self.reply_tx.clone();
        tokio::spawn(
            async move {
                let reply = replies.request(&transcript, &metadata).await;
                let _ = events.send(ReplyEvent { purpose, reply });
            }
            .in_current_span(),
        );
    }

    fn publish(&self) {
        self.state_tx
            .send_replace(self.state.snapshot(self.session_id));
    }
}

/// Caller's side of a mounted session.
///
/// Dropping the handle unmounts the session: it ends with
/// [`EndReason::Manual`] unless it had already ended.
#[derive(Debug)]
pub struct SessionHandle {
    session_id: Uuid,
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Submit a visitor message.
    ///
    /// Resolves once the turn is appended (not once the advisor answers).
    pub async fn send(&self, text: &str) -> Result<(), SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let (ack, result) = oneshot::channel();
        self.commands
            .send(Command::Send {
                text: text.to_string(),
                ack,
            })
            .await
            .map_err(|_| SessionError::Ended)?;
        result.await.map_err(|_| SessionError::Ended)?
    }

    /// Request an explicit end. No-op if the session already ended.
    pub async fn end(&self) {
        let (done, finished) = oneshot::channel();
        if self.commands.send(Command::End { done }).await.is_ok() {
            let _ = finished.await;
        }
    }

    /// Watch every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Detach from the session, ending it if still live.
    ///
    /// The returned task finishes after the navigation signal, once the
    /// summary delivery has settled.
    pub fn unmount(self) -> JoinHandle<()> {
        let SessionHandle { task, .. } = self;
        task
    }
}
