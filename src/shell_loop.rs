use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::events::{Notification, NotificationBus};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler on each turn.
pub enum LoopEvent {
    /// Terminal input (keyboard, mouse, resize).
    Input(Event),
    /// A notification drained from the bus, already marshaled onto this
    /// thread. Handlers run synchronously before the loop continues.
    Notice(Notification),
    /// The poll interval elapsed; draw/animate here.
    Tick,
}

/// The single loop that owns the UI thread.
///
/// Every turn it ticks the handler, drains pending bus notifications, then
/// polls terminal input. Background subsystems never touch window state
/// directly; they publish to the bus and this loop delivers.
pub struct ShellLoop {
    bus: NotificationBus,
    poll_interval: Duration,
}

impl ShellLoop {
    pub fn new(bus: NotificationBus, poll_interval: Duration) -> Self {
        Self { bus, poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(LoopEvent) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(LoopEvent::Tick)? {
                return Ok(());
            }

            while let Some(notification) = self.bus.try_next() {
                if let ControlFlow::Quit = handler(LoopEvent::Notice(notification))? {
                    return Ok(());
                }
            }

            if event::poll(self.poll_interval)? {
                // Drain the input queue to prevent lag during high-frequency
                // bursts; one event per poll would fall behind the stream.
                loop {
                    let input = event::read()?;
                    if let ControlFlow::Quit = handler(LoopEvent::Input(input))? {
                        return Ok(());
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}
