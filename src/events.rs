use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Inbound notifications the main-window coordinator subscribes to.
///
/// This is a closed set: the coordinator dispatches over it exhaustively, so
/// adding a variant forces every dispatch site to account for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Present a blocking informational dialog.
    ShowMessage { text: String, caption: String },
    /// The background listener could not bind its address/port.
    ServerBindFailed,
    /// Surface the main window, restoring it from the tray if hidden.
    ShowMainWindow,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Notification::ShowMessage { .. } => "show message",
            Notification::ServerBindFailed => "server bind failed",
            Notification::ShowMainWindow => "show main window",
        };
        write!(f, "{}", s)
    }
}

/// Notifications the coordinator produces for other subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundEvent {
    /// The user asked to exit. Whoever owns the application lifecycle is
    /// expected to flip the shutdown mode and tear the window down; the
    /// coordinator never terminates anything itself.
    AppForceShutdown,
}

impl fmt::Display for OutboundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboundEvent::AppForceShutdown => write!(f, "app force shutdown"),
        }
    }
}

/// Outbound half of the event bus. The bus itself lives outside this crate;
/// the coordinator only ever publishes through this seam.
pub trait Publisher {
    fn publish(&self, event: OutboundEvent);
}

/// [`Publisher`] over a plain channel sender. Send failures mean the consumer
/// is gone, which is only reachable during teardown, so they are dropped.
pub struct ChannelPublisher {
    tx: Sender<OutboundEvent>,
}

impl ChannelPublisher {
    pub fn new(tx: Sender<OutboundEvent>) -> Self {
        Self { tx }
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, event: OutboundEvent) {
        let _ = self.tx.send(event);
    }
}

/// Fan-in point for inbound notifications.
///
/// Background subsystems keep a [`NotificationSender`] and publish from any
/// thread; the UI loop drains the bus on its own thread and hands each
/// notification to the coordinator synchronously. That drain is the marshaling
/// step: handlers always run on the thread that owns window state.
pub struct NotificationBus {
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
}

#[derive(Clone)]
pub struct NotificationSender {
    tx: Sender<Notification>,
}

impl NotificationBus {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> NotificationSender {
        NotificationSender {
            tx: self.tx.clone(),
        }
    }

    /// Next pending notification, if any. Never blocks.
    pub fn try_next(&self) -> Option<Notification> {
        match self.rx.try_recv() {
            Ok(notification) => Some(notification),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSender {
    /// Publish a notification. Fire-and-forget: if the UI loop has already
    /// shut down there is nobody left to care.
    pub fn send(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}
