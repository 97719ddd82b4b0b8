//! ### Short Messages Service

pub mod types;

use atat::atat_derive::AtatCmd;
use types::*;

use super::NoResponse;

/// Select message format +CMGF
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF", NoResponse)]
pub struct SetMessageFormat {
    #[at_arg(position = 0)]
    pub format: MessageFormat,
}

/// Send message +CMGS
///
/// In text mode the module answers with the `> ` prompt, after which the
/// message body is written and terminated with Ctrl-Z (0x1A).
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGS", NoResponse, timeout_ms = 10000)]
pub struct SendMessage<'a> {
    #[at_arg(position = 0, len = 20)]
    pub number: &'a str,
}

/// List messages +CMGL
///
/// Lists the stored messages with the given status. Reading `REC UNREAD`
/// messages marks them as read.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGL", NoResponse)]
pub struct ListMessages<'a> {
    #[at_arg(position = 0, len = 10)]
    pub stat: &'a str,
}

impl ListMessages<'static> {
    pub fn with_status(status: MessageStatus) -> Self {
        Self {
            stat: status.as_str(),
        }
    }
}

/// Delete message +CMGD
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGD", NoResponse)]
pub struct DeleteMessage {
    #[at_arg(position = 0)]
    pub index: u16,
}

/// Ring indicator configuration +PSRIC
#[derive(Clone, AtatCmd)]
#[at_cmd("+PSRIC", NoResponse)]
pub struct SetRingIndicator {
    #[at_arg(position = 0)]
    pub mode: RingIndicatorMode,
    #[at_arg(position = 1)]
    pub pulse: u8,
}
