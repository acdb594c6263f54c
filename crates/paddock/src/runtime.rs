//! # Bot Runtime
//!
//! ```text
//! loop:
//!   shutdown? ─yes─> stop
//!   poll transport ──(raced against shutdown)──> updates
//!   for each update: acknowledge button, dispatch, send replies
//!   drain events into the log
//! ```
//!
//! Poll failures are retried forever after `retry_delay`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use paddock_shared::{Inbound, Payload};
use tokio::sync::Notify;

use crate::events::{EventReceiver, GameEvent};
use crate::handlers::Dispatcher;
use crate::transport::ChatTransport;

/// Shared shutdown flag that can also be awaited.
#[derive(Debug, Default)]
pub struct Shutdown {
    flag: AtomicBool,
    notify: Notify,
}

impl Shutdown {
    /// An untriggered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown and wakes every waiter.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// True once shutdown was requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown is requested.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }
}

/// Spawns a task that triggers `shutdown` on SIGINT or SIGTERM.
pub fn spawn_signal_listener(shutdown: Arc<Shutdown>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            tracing::info!("shutdown signal received (SIGINT)");
                        }
                        _ = sigterm.recv() => {
                            tracing::info!("shutdown signal received (SIGTERM)");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot listen for SIGTERM, ctrl-c only");
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("shutdown signal received (SIGINT)");
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received (ctrl-c)");
        }
        shutdown.trigger();
    })
}

/// Today's local calendar date.
#[must_use]
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was requested.
    Shutdown,
    /// The transport closed.
    TransportClosed,
}

/// Poll / dispatch / reply loop.
pub struct Runtime<T> {
    transport: T,
    dispatcher: Arc<Dispatcher>,
    events: EventReceiver,
    shutdown: Arc<Shutdown>,
    retry_delay: Duration,
    clock: fn() -> NaiveDate,
}

impl<T: ChatTransport> Runtime<T> {
    /// Assembles a runtime using the local date.
    pub fn new(
        transport: T,
        dispatcher: Arc<Dispatcher>,
        events: EventReceiver,
        shutdown: Arc<Shutdown>,
        retry_delay: Duration,
    ) -> Self {
        Self {
            transport,
            dispatcher,
            events,
            shutdown,
            retry_delay,
            clock: local_today,
        }
    }

    /// Replaces the date source.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// The transport, for inspection after the loop ends.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs until shutdown or until the transport closes.
    pub async fn run(&mut self) -> StopReason {
        tracing::info!(transport = self.transport.name(), "bot running");
        let shutdown = Arc::clone(&self.shutdown);

        let reason = loop {
            if shutdown.is_triggered() {
                break StopReason::Shutdown;
            }

            let polled = tokio::select! {
                polled = self.transport.poll() => polled,
                () = shutdown.wait() => break StopReason::Shutdown,
            };

            match polled {
                Ok(Some(updates)) => {
                    for inbound in &updates {
                        self.process(inbound).await;
                    }
                }
                Ok(None) => break StopReason::TransportClosed,
                Err(e) => {
                    tracing::warn!(
                        transport = self.transport.name(),
                        error = %e,
                        retry_in_ms = u64::try_from(self.retry_delay.as_millis()).unwrap_or(u64::MAX),
                        "poll failed, retrying"
                    );
                    tokio::select! {
                        () = tokio::time::sleep(self.retry_delay) => {}
                        () = shutdown.wait() => break StopReason::Shutdown,
                    }
                }
            }
        };

        self.log_events();
        tracing::info!(?reason, "bot stopped");
        reason
    }

    async fn process(&mut self, inbound: &Inbound) {
        if let Payload::Callback {
            query_id: Some(id), ..
        } = &inbound.payload
        {
            if let Err(e) = self.transport.acknowledge(id).await {
                tracing::warn!(error = %e, "callback acknowledgement failed");
            }
        }

        match self.dispatcher.handle(inbound, (self.clock)()) {
            Ok(replies) => {
                for reply in &replies {
                    if let Err(e) = self.transport.send(reply).await {
                        tracing::warn!(chat = reply.chat_id, error = %e, "reply not delivered");
                    }
                }
            }
            Err(e) => {
                tracing::error!(chat = inbound.chat_id, user = inbound.user.id, error = %e, "handler failed");
            }
        }

        self.log_events();
    }

    fn log_events(&self) {
        for event in self.events.drain() {
            match event {
                GameEvent::PlayerJoined { user_id, role } => {
                    tracing::info!(user_id, %role, "event: player joined");
                }
                GameEvent::HorseGranted { user_id, horse } => {
                    tracing::info!(user_id, %horse, "event: horse granted");
                }
                GameEvent::TrackGranted { user_id, track } => {
                    tracing::info!(user_id, %track, "event: track granted");
                }
                GameEvent::JockeyBooked { user_id, horse } => {
                    tracing::info!(user_id, %horse, "event: jockey booked");
                }
                GameEvent::RaceRun {
                    date,
                    track,
                    winner,
                    runners,
                } => {
                    tracing::info!(%date, %track, %winner, runners, "event: race run");
                }
            }
        }
    }
}
