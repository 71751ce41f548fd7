//! Connectivity signals from an external source
//!
//! The scheduler consumes online/offline/changed notifications but does
//! not implement detection; a platform integration (or a test) pushes
//! events through the handle.

use tokio::sync::mpsc;

/// Capacity of the event channel between a source and the scheduler
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// A change in network state, as reported by the connectivity source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// The network came back
    Online,
    /// The network went away
    Offline,
    /// Network characteristics changed (interface, route, link type)
    Changed,
}

/// Whether the environment can report connectivity at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    Unsupported,
}

/// An external supplier of connectivity state
pub trait ConnectivitySource: Send {
    /// Whether this source can observe the network at all. `Unsupported`
    /// puts the whole monitor into a labeled degraded state: no probes
    /// are ever attempted.
    fn capability(&self) -> Capability;

    /// Take the event stream. A closed channel means the source is gone
    /// and only the periodic timer drives batches from then on.
    fn subscribe(&mut self) -> mpsc::Receiver<ConnectivityEvent>;
}

/// Create an event channel plus a handle for pushing transitions into it
pub fn channel() -> (ConnectivityHandle, mpsc::Receiver<ConnectivityEvent>) {
    let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    (ConnectivityHandle { sender }, receiver)
}

/// Sending half used by platform integrations and tests
#[derive(Debug, Clone)]
pub struct ConnectivityHandle {
    sender: mpsc::Sender<ConnectivityEvent>,
}

impl ConnectivityHandle {
    /// Report that connectivity was restored
    pub fn notify_online(&self) {
        self.notify(ConnectivityEvent::Online);
    }

    /// Report that connectivity was lost
    pub fn notify_offline(&self) {
        self.notify(ConnectivityEvent::Offline);
    }

    /// Report that network characteristics changed
    pub fn notify_changed(&self) {
        self.notify(ConnectivityEvent::Changed);
    }

    fn notify(&self, event: ConnectivityEvent) {
        // A full or closed channel just drops the notification; the
        // periodic timer covers missed triggers.
        let _ = self.sender.try_send(event);
    }
}

/// Source for environments with no connectivity signal: a fixed
/// capability and no events.
pub struct StaticConnectivity {
    capability: Capability,
    handle: Option<ConnectivityHandle>,
}

impl StaticConnectivity {
    /// Always online, never emits an event
    pub fn supported() -> Self {
        Self {
            capability: Capability::Supported,
            handle: None,
        }
    }

    /// Environment cannot observe the network at all
    pub fn unsupported() -> Self {
        Self {
            capability: Capability::Unsupported,
            handle: None,
        }
    }
}

impl ConnectivitySource for StaticConnectivity {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn subscribe(&mut self) -> mpsc::Receiver<ConnectivityEvent> {
        // Hold the sending half so the channel stays open (and silent)
        // for as long as the source lives.
        let (handle, receiver) = channel();
        self.handle = Some(handle);
        receiver
    }
}
