//! The kiosk session: one scanner + barrier pair and everything it remembers.
//!
//! [`Kiosk`] owns the proximity monitor, the scan delay, and the access state
//! machine, and is advanced by calling [`Kiosk::tick`] once per frame. The
//! credential lookup is the only suspending operation: it runs as a spawned
//! task whose result is posted to a completion queue, and the queue is drained
//! synchronously by the next tick. All state mutation therefore happens inside
//! `tick`, in a fixed order:
//!
//! 1. sample the actor position (visit entry / exit)
//! 2. advance the scan delay (dispatch the lookup when it elapses); the frame
//!    that starts a visit does not count towards the delay
//! 3. apply completed lookups
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kiosk_core::{
    AccessStateMachine, ActorId, CredentialSet, DelayTimer, KioskConfig, Phase, PhaseChange,
    PresentationIntent, ProximityEvent, ProximityMonitor, TriggerFlags, Verdict,
};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::actor::ActorSource;
use crate::api::{Result, RuntimeError};
use crate::events::{AccessEvent, EventBus, VisitEvent};
use crate::oracle::{CredentialOracle, OracleError};
use crate::presentation::PresentationSink;

/// Identifies one dispatched credential lookup. Tickets increase
/// monotonically per kiosk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CheckTicket(pub u64);

impl fmt::Display for CheckTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a lookup, posted back to the kiosk that dispatched it.
#[derive(Debug)]
struct CheckCompletion {
    ticket: CheckTicket,
    actor: ActorId,
    result: std::result::Result<CredentialSet, OracleError>,
}

/// Point-in-time view of a kiosk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KioskStatus {
    pub phase: Phase,
    pub intent: PresentationIntent,
    pub flags: TriggerFlags,
    pub outstanding_check: Option<CheckTicket>,
}

pub struct Kiosk {
    config: KioskConfig,
    machine: AccessStateMachine,
    monitor: ProximityMonitor,
    timer: DelayTimer,

    oracle: Arc<dyn CredentialOracle>,
    oracle_timeout: Option<Duration>,
    presentation: Box<dyn PresentationSink>,
    events: EventBus,

    spawner: Handle,
    completion_tx: mpsc::UnboundedSender<CheckCompletion>,
    completion_rx: mpsc::UnboundedReceiver<CheckCompletion>,
    next_ticket: u64,
    outstanding: Option<CheckTicket>,
}

impl Kiosk {
    /// Creates a kiosk in the `Idle` phase.
    ///
    /// Must be called from within a tokio runtime; lookups are spawned onto it.
    pub fn new(
        config: KioskConfig,
        oracle: Arc<dyn CredentialOracle>,
        presentation: Box<dyn PresentationSink>,
    ) -> Result<Self> {
        config.validate()?;
        let spawner = Handle::try_current().map_err(RuntimeError::NoAsyncRuntime)?;
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Ok(Self {
            machine: AccessStateMachine::new(config.required_credential.clone()),
            monitor: ProximityMonitor::from_config(&config),
            timer: DelayTimer::new(config.check_delay),
            config,
            oracle,
            oracle_timeout: None,
            presentation,
            events: EventBus::new(),
            spawner,
            completion_tx,
            completion_rx,
            next_ticket: 0,
            outstanding: None,
        })
    }

    /// Bounds every lookup; an elapsed lookup counts as an oracle failure.
    pub fn with_oracle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    /// Publishes events on `events` instead of a private bus.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Advances the kiosk by one frame of `delta` elapsed time.
    pub fn tick(&mut self, delta: Duration, actor: &dyn ActorSource) {
        let armed = match self.monitor.sample(actor.position()) {
            Some(event) => self.handle_proximity(event),
            None => false,
        };

        // The entry frame's delta predates the trigger.
        if !armed && self.timer.advance(delta) {
            self.dispatch_check(actor.identity());
        }

        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    /// Waits for the outstanding lookup (if any) and applies it.
    ///
    /// Returns `false` immediately when no lookup is outstanding.
    pub async fn settle(&mut self) -> bool {
        if self.outstanding.is_none() {
            return false;
        }

        while self.outstanding.is_some() {
            match self.completion_rx.recv().await {
                Some(completion) => self.apply_completion(completion),
                None => break,
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn intent(&self) -> PresentationIntent {
        self.machine.intent()
    }

    pub fn flags(&self) -> TriggerFlags {
        self.monitor.flags()
    }

    pub fn last_credentials(&self) -> &CredentialSet {
        self.machine.last_credentials()
    }

    pub fn timer(&self) -> &DelayTimer {
        &self.timer
    }

    pub fn outstanding_check(&self) -> Option<CheckTicket> {
        self.outstanding
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn status(&self) -> KioskStatus {
        KioskStatus {
            phase: self.phase(),
            intent: self.intent(),
            flags: self.flags(),
            outstanding_check: self.outstanding,
        }
    }

    /// Returns `true` when the event armed the scan delay.
    fn handle_proximity(&mut self, event: ProximityEvent) -> bool {
        match event {
            ProximityEvent::Entered { distance } => {
                info!(distance, "actor entered scan zone");
                self.events.publish(VisitEvent::ActorEntered { distance });

                if let Some(ticket) = self.outstanding.take() {
                    debug!(%ticket, "new visit supersedes outstanding check");
                }
                let change = self.machine.begin_check();
                self.apply_change(change);
                self.timer.start();
                true
            }
            ProximityEvent::Exited { distance } => {
                info!(distance, "actor left scan zone");
                self.events.publish(VisitEvent::ActorLeft { distance });

                if self.timer.cancel()
                    && let Some(change) = self.machine.abandon()
                {
                    debug!("visit ended before the check was dispatched");
                    self.apply_change(change);
                }
                false
            }
        }
    }

    fn dispatch_check(&mut self, identity: Option<ActorId>) {
        let Some(actor) = identity else {
            self.apply_failure(None, "actor identity unavailable".to_string());
            return;
        };

        let ticket = CheckTicket(self.next_ticket);
        self.next_ticket += 1;
        self.outstanding = Some(ticket);

        info!(%ticket, %actor, "dispatching credential check");
        self.events.publish(AccessEvent::CheckDispatched {
            ticket,
            actor: actor.clone(),
        });

        let oracle = Arc::clone(&self.oracle);
        let completion_tx = self.completion_tx.clone();
        let timeout = self.oracle_timeout;

        // Separate task: a panicking lookup must still produce a completion.
        let lookup_actor = actor.clone();
        let mut lookup = self
            .spawner
            .spawn(async move { oracle.lookup(&lookup_actor).await });

        self.spawner.spawn(async move {
            let joined = match timeout {
                Some(limit) => match tokio::time::timeout(limit, &mut lookup).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        lookup.abort();
                        Ok(Err(OracleError::Timeout(limit)))
                    }
                },
                None => lookup.await,
            };
            let result =
                joined.unwrap_or_else(|error| Err(OracleError::Aborted(error.to_string())));

            if completion_tx
                .send(CheckCompletion {
                    ticket,
                    actor,
                    result,
                })
                .is_err()
            {
                debug!(%ticket, "kiosk dropped before check completed");
            }
        });
    }

    fn apply_completion(&mut self, completion: CheckCompletion) {
        let CheckCompletion {
            ticket,
            actor,
            result,
        } = completion;

        if self.outstanding != Some(ticket) {
            debug!(%ticket, "discarding superseded check result");
            self.events.publish(AccessEvent::ResultDiscarded { ticket });
            return;
        }
        self.outstanding = None;

        let credentials = match result {
            Ok(credentials) => credentials,
            Err(error) => {
                self.apply_failure(Some(ticket), error.to_string());
                return;
            }
        };

        debug!(%ticket, %actor, %credentials, "credential check completed");
        match self.machine.resolve(credentials) {
            Ok(change) => {
                if change.verdict() == Some(Verdict::Granted) {
                    self.monitor.mark_granted();
                }
                self.apply_change(change);
            }
            Err(error) => warn!(%ticket, %error, "check result could not be applied"),
        }
    }

    fn apply_failure(&mut self, ticket: Option<CheckTicket>, reason: String) {
        let policy = self.config.on_oracle_failure;
        warn!(ticket = ?ticket, %reason, %policy, "credential check failed");
        self.events.publish(AccessEvent::CheckFailed { ticket, reason });

        match self.machine.fail(policy) {
            Ok(Some(change)) => self.apply_change(change),
            Ok(None) => debug!("phase left in checking until the next visit"),
            Err(error) => warn!(%error, "check failure could not be applied"),
        }
    }

    fn apply_change(&mut self, change: PhaseChange) {
        info!(from = %change.from, to = %change.to, "access phase changed");
        self.presentation.apply_intent(&change.intent);
        self.events.publish(AccessEvent::PhaseChanged(change));
    }
}

impl fmt::Debug for Kiosk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kiosk")
            .field("config", &self.config)
            .field("phase", &self.machine.phase())
            .field("flags", &self.monitor.flags())
            .field("timer", &self.timer)
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}
