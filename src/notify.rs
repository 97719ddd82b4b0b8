//! New-message notification.
//!
//! The RING line interrupt only enqueues an event here. Application code
//! drains the queue between driver calls and then calls
//! [`Sms::read_sms`](crate::prelude::Sms::read_sms) itself.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

const NOTIFICATION_CAPACITY: usize = 4;

/// A falling edge was seen on the RING line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NewMessage;

pub struct MessageNotifier {
    ch: Channel<CriticalSectionRawMutex, NewMessage, NOTIFICATION_CAPACITY>,
}

impl Default for MessageNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageNotifier {
    pub const fn new() -> Self {
        Self { ch: Channel::new() }
    }

    /// Called from the RING interrupt handler. Never blocks.
    ///
    /// Returns `false` if the queue was full and the edge got dropped.
    pub fn signal(&self) -> bool {
        match self.ch.try_send(NewMessage) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => false,
        }
    }

    /// Takes one pending notification, if any.
    pub fn try_take(&self) -> Option<NewMessage> {
        self.ch.try_receive().ok()
    }

    /// Waits for the next notification.
    pub async fn take(&self) -> NewMessage {
        self.ch.receive().await
    }

    pub fn pending(&self) -> usize {
        self.ch.len()
    }

    /// Drops every queued notification.
    pub fn clear(&self) {
        while self.ch.try_receive().is_ok() {}
    }
}
