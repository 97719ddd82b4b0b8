use heapless::String;

use crate::client::Device;
use crate::command::{
    mobile_control::{GetClock, SetClock},
    network_service::GetSignalQuality,
    replies,
};
use crate::config::CellularConfig;
use crate::error::Error;
use crate::scanner::Uart;
use crate::signal::{SignalQuality, TIMESTAMP_LEN};

/// Clock and radio queries, available whenever the module is powered.
pub trait Gsm {
    /// Reads the module clock as `YY/MM/DD,HH:MM:SS±QQ`.
    ///
    /// The text is returned as sent by the module, use
    /// [`Timestamp::parse`](crate::signal::Timestamp::parse) to decode it.
    fn get_clock(&mut self) -> Result<String<TIMESTAMP_LEN>, Error>;

    /// Sets the module clock. `clock` must be exactly 20 bytes long.
    fn set_clock(&mut self, clock: &str) -> Result<(), Error>;

    fn signal_quality(&mut self) -> Result<SignalQuality, Error>;

    /// Signal level in dBm, or 0 when it is unknown or could not be read.
    ///
    /// A genuine reading and a failure cannot be told apart here, prefer
    /// [`Gsm::signal_quality`].
    fn rssi(&mut self) -> i16 {
        match self.signal_quality() {
            Ok(q) => q.dbm().unwrap_or(0),
            Err(_) => 0,
        }
    }
}

impl<U, C> Gsm for Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    fn get_clock(&mut self) -> Result<String<TIMESTAMP_LEN>, Error> {
        self.state.require_powered()?;

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&GetClock)?;
            dev.scanner.expect(replies::CLOCK)?;

            let mut clock = [0u8; TIMESTAMP_LEN];
            for slot in clock.iter_mut() {
                *slot = dev.scanner.read_byte()?;
            }
            dev.scanner.expect(replies::CLOCK_END)?;

            let clock = heapless::Vec::from_slice(&clock).map_err(|_| Error::Overflow)?;
            Ok(String::from_utf8(clock)?)
        })
    }

    fn set_clock(&mut self, clock: &str) -> Result<(), Error> {
        self.state.require_powered()?;
        if clock.len() != TIMESTAMP_LEN {
            return Err(Error::InvalidClock);
        }

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&SetClock { time: clock })?;
            dev.scanner.expect(replies::OK)
        })
    }

    fn signal_quality(&mut self) -> Result<SignalQuality, Error> {
        self.state.require_powered()?;

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&GetSignalQuality)?;
            dev.scanner.expect(replies::SIGNAL)?;

            dev.reply.clear();
            dev.scanner.read_until(b'\r', &mut dev.reply)?;
            let quality = SignalQuality::parse(&dev.reply)?;
            dev.scanner.expect(replies::FIELD_OK)?;

            debug!("Signal quality: {:?}", quality);
            Ok(quality)
        })
    }
}
