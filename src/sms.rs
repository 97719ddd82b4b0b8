use heapless::{String, Vec};

use crate::client::Device;
use crate::command::{
    replies,
    sms::{types::MessageStatus, DeleteMessage, ListMessages, SendMessage},
};
use crate::config::CellularConfig;
use crate::error::Error;
use crate::module_timing::TimeoutClass;
use crate::scanner::Uart;
use crate::signal::TIMESTAMP_LEN;
use crate::state::ModuleState;

/// Longest text message body, in bytes.
pub const SMS_LENGTH_MAX: usize = 160;

/// Longest phone number accepted or reported.
pub const NUMBER_MAX: usize = 20;

/// A received text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedSms {
    /// Sender number without the leading `+`
    pub sender: String<NUMBER_MAX>,
    /// Service centre timestamp, `YY/MM/DD,HH:MM:SS±QQ`
    pub timestamp: String<TIMESTAMP_LEN>,
    pub body: String<SMS_LENGTH_MAX>,
}

/// Text mode SMS, available while powered without an active bearer.
pub trait Sms {
    fn send_sms(&mut self, recipient: &str, message: &str) -> Result<(), Error>;

    /// Reads the oldest unread message and deletes it from the module.
    ///
    /// Fails with [`Error::Timeout`] when there is no unread message.
    fn read_sms(&mut self) -> Result<ReceivedSms, Error>;
}

impl<U, C> Sms for Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    fn send_sms(&mut self, recipient: &str, message: &str) -> Result<(), Error> {
        self.state.require(ModuleState::On)?;
        if message.len() > SMS_LENGTH_MAX {
            return Err(Error::MessageTooLong);
        }
        if recipient.len() > NUMBER_MAX {
            return Err(Error::Overflow);
        }

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&SendMessage { number: recipient })?;

            dev.scanner.with_timeout(TimeoutClass::Long, |s| {
                s.expect(replies::SMS_PROMPT)?;
                s.write_str(message)?;
                s.write_all(&[replies::CTRL_Z])?;
                s.expect(replies::SMS_SENT)
            })?;

            // Message reference
            dev.scanner.skip_until(b'\r')?;
            dev.scanner.expect(replies::FIELD_OK)?;
            debug!("SMS sent");
            Ok(())
        })
    }

    fn read_sms(&mut self) -> Result<ReceivedSms, Error> {
        self.state.require(ModuleState::On)?;

        self.guarded(|dev| {
            let s = &mut dev.scanner;
            s.discard_input()?;
            s.send(&ListMessages::with_status(MessageStatus::ReceivedUnread))?;
            s.expect(replies::SMS_LISTED)?;

            dev.reply.clear();
            s.read_until(b',', &mut dev.reply)?;
            let index = core::str::from_utf8(&dev.reply)?
                .parse::<u16>()
                .map_err(|_| Error::Unparseable)?;

            s.expect(replies::SMS_UNREAD)?;
            let mut sender = Vec::<u8, NUMBER_MAX>::new();
            s.read_until(b'"', &mut sender)?;

            // Phonebook name of the sender, unused
            s.expect(replies::QUOTED_FIELD)?;
            s.skip_until(b'"')?;

            s.expect(replies::QUOTED_FIELD)?;
            let mut timestamp = [0u8; TIMESTAMP_LEN];
            for slot in timestamp.iter_mut() {
                *slot = s.read_byte()?;
            }
            s.expect(replies::SMS_HEADER_END)?;

            // May be empty
            let mut body = Vec::<u8, SMS_LENGTH_MAX>::new();
            s.read_until(b'\r', &mut body)?;
            s.expect(replies::SMS_LIST_END)?;

            // Undecodable messages stay on the module
            let sms = ReceivedSms {
                sender: String::from_utf8(sender)?,
                timestamp: String::from_utf8(
                    Vec::from_slice(&timestamp).map_err(|_| Error::Overflow)?,
                )?,
                body: String::from_utf8(body)?,
            };

            s.send(&DeleteMessage { index })?;
            s.expect(replies::OK)?;
            debug!("SMS {} read and deleted", index);
            Ok(sms)
        })
    }
}
