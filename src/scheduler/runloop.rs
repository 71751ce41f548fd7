//! Scheduler run loop
//!
//! A repeating interval and connectivity events, all funneled into the
//! coordinator's single `start` entry point.

use crate::connectivity::{Capability, ConnectivityEvent};
use crate::scheduler::BatchCoordinator;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct Scheduler {
    coordinator: Arc<BatchCoordinator>,
    interval: Duration,
    capability: Capability,
    events: mpsc::Receiver<ConnectivityEvent>,
    events_open: bool,
    shutdown: CancellationToken,
    online: bool,
}

impl Scheduler {
    pub fn new(
        coordinator: Arc<BatchCoordinator>,
        interval: Duration,
        capability: Capability,
        events: mpsc::Receiver<ConnectivityEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            coordinator,
            interval,
            capability,
            events,
            events_open: true,
            shutdown,
            online: true,
        }
    }

    /// Run until shutdown.
    ///
    /// The first interval tick fires immediately, so the initial batch
    /// starts right away. While offline, scheduled ticks are skipped; the
    /// offline -> online transition forces an immediate batch instead.
    pub async fn run(mut self) {
        if self.capability == Capability::Unsupported {
            warn!("connectivity information is unavailable; probes disabled");
            self.coordinator.render_unsupported();
            return;
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("scheduler shutting down");
                    self.coordinator.cancel_current().await;
                    break;
                }
                _ = ticker.tick() => {
                    if self.online {
                        self.coordinator.start().await;
                    } else {
                        debug!("offline; skipping scheduled batch");
                    }
                }
                event = self.events.recv(), if self.events_open => match event {
                    Some(ConnectivityEvent::Offline) => {
                        if self.online {
                            info!("connectivity lost");
                        }
                        self.online = false;
                        self.coordinator.interrupt_offline().await;
                    }
                    Some(ConnectivityEvent::Online) => {
                        if !self.online {
                            info!("connectivity restored; starting immediate batch");
                            self.online = true;
                            self.coordinator.start().await;
                        }
                    }
                    Some(ConnectivityEvent::Changed) => {
                        if self.online {
                            debug!("network characteristics changed; starting immediate batch");
                            self.coordinator.start().await;
                        }
                    }
                    None => {
                        debug!("connectivity source closed; timer-only operation");
                        self.events_open = false;
                    }
                },
            }
        }
    }
}
