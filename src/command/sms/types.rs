//! Argument types used by Short Messages Service Commands
use atat::atat_derive::AtatEnum;

/// Format of messages exchanged through `+CMGS`/`+CMGL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageFormat {
    /// • 0: PDU mode
    Pdu = 0,
    /// • 1: text mode
    Text = 1,
}

/// Event that makes the module pulse its RING line
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingIndicatorMode {
    /// • 0: RING line is not used
    Disabled = 0,
    /// • 2: RING line pulses when a new message is stored
    NewMessage = 2,
}

/// Message status filter of `+CMGL` in text mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageStatus {
    ReceivedUnread,
    ReceivedRead,
    All,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReceivedUnread => "REC UNREAD",
            Self::ReceivedRead => "REC READ",
            Self::All => "ALL",
        }
    }
}
