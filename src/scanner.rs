//! Reply scanner.
//!
//! The module answers every command with plain text. Each protocol step knows
//! the exact bytes it expects next, so instead of parsing whole responses the
//! driver scans the incoming byte stream for that literal, tolerating any
//! chatter in front of it, until a deadline passes.
//!
//! Bytes consumed while scanning are gone, matched or not. A step that may
//! see one of several replies therefore scans for their common prefix and
//! branches on the next byte it reads.

use atat::AtatCmd;
use embassy_time::{block_for, Duration, Instant};
use embedded_io::{Error as _, Read, ReadReady, Write, WriteFmtError};
use heapless::Vec;

use crate::error::Error;
use crate::module_timing::{TimeoutClass, Timing};

/// Largest encoded command line the driver sends.
pub(crate) const COMMAND_CAPACITY: usize = 256;

/// Capacity of the scratch buffer holding captured reply tokens.
pub const REPLY_CAPACITY: usize = 30;

/// Scratch space for reply tokens (message ids, byte counts, digits).
pub type ReplyBuffer = Vec<u8, REPLY_CAPACITY>;

/// Serial byte transport to the module.
pub trait Uart: Read + Write + ReadReady {
    /// Opens the channel at the given baud rate.
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error>;
    /// Releases the channel.
    fn close(&mut self) -> Result<(), Self::Error>;
}

fn io_error<E: embedded_io::Error>(e: E) -> Error {
    Error::Io(e.kind())
}

pub struct Scanner<U> {
    uart: U,
    timing: Timing,
    timeout: TimeoutClass,
}

impl<U: Uart> Scanner<U> {
    pub fn new(uart: U, timing: Timing) -> Self {
        Self {
            uart,
            timing,
            timeout: TimeoutClass::Short,
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn timeout_class(&self) -> TimeoutClass {
        self.timeout
    }

    pub fn release(self) -> U {
        self.uart
    }

    pub(crate) fn open(&mut self, baud_rate: u32) -> Result<(), Error> {
        self.uart.open(baud_rate).map_err(io_error)
    }

    pub(crate) fn close(&mut self) -> Result<(), Error> {
        self.uart.close().map_err(io_error)
    }

    /// Runs `f` with the given timeout class active, restoring `Short`
    /// afterwards whatever the outcome.
    pub fn with_timeout<T>(
        &mut self,
        class: TimeoutClass,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.timeout = class;
        let res = f(self);
        self.timeout = TimeoutClass::Short;
        res
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timing.timeout(self.timeout)
    }

    /// Throws away everything currently pending on the line.
    pub fn discard_input(&mut self) -> Result<(), Error> {
        let mut buf = [0u8; 16];
        while self.uart.read_ready().map_err(io_error)? {
            if self.uart.read(&mut buf).map_err(io_error)? == 0 {
                break;
            }
        }
        Ok(())
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.uart.write_all(bytes).map_err(io_error)?;
        self.uart.flush().map_err(io_error)
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), Error> {
        self.write_all(s.as_bytes())
    }

    /// Writes formatted text followed by `\r\n`, e.g. a header line.
    ///
    /// The pieces go straight to the line, so there is no length limit.
    pub fn write_fmt_line(&mut self, args: core::fmt::Arguments<'_>) -> Result<(), Error> {
        self.uart.write_fmt(args).map_err(|e| match e {
            WriteFmtError::Other(e) => io_error(e),
            WriteFmtError::FmtError => Error::Unparseable,
        })?;
        self.write_all(b"\r\n")
    }

    /// Encodes an AT command and writes it, terminator included.
    pub fn send<A: AtatCmd>(&mut self, cmd: &A) -> Result<(), Error> {
        if A::MAX_LEN > COMMAND_CAPACITY {
            return Err(Error::Overflow);
        }
        let mut buf = [0u8; COMMAND_CAPACITY];
        let len = cmd.write(&mut buf);
        trace!("Sending command: {:?}", crate::fmt::LossyStr(&buf[..len]));
        self.write_all(&buf[..len])
    }

    /// Waits for a single byte until `deadline`.
    pub fn read_byte_until(&mut self, deadline: Instant) -> Result<u8, Error> {
        loop {
            if self.uart.read_ready().map_err(io_error)? {
                let mut byte = [0u8; 1];
                if self.uart.read(&mut byte).map_err(io_error)? == 1 {
                    return Ok(byte[0]);
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout);
            }
        }
    }

    /// Reads one byte under the active timeout.
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        let deadline = self.deadline();
        self.read_byte_until(deadline)
    }

    /// Scans for `expected` under the active timeout.
    pub fn expect(&mut self, expected: &[u8]) -> Result<(), Error> {
        let deadline = self.deadline();
        self.expect_until(expected, deadline)
    }

    /// Scans for `expected` until `deadline`.
    ///
    /// Matching restarts on a mismatch without losing a partial match that is
    /// itself a prefix of `expected`, so the literal is found wherever it
    /// appears in the stream.
    pub fn expect_until(&mut self, expected: &[u8], deadline: Instant) -> Result<(), Error> {
        let mut matched = 0;
        while matched < expected.len() {
            let byte = match self.read_byte_until(deadline) {
                Ok(b) => b,
                Err(e) => {
                    debug!(
                        "Expected {:?}, matched {} bytes",
                        crate::fmt::LossyStr(expected),
                        matched
                    );
                    return Err(e);
                }
            };
            matched = advance(expected, matched, byte);
        }
        Ok(())
    }

    /// Reads bytes into `out` until `terminator`, which is consumed but not
    /// stored.
    pub fn read_until<const N: usize>(
        &mut self,
        terminator: u8,
        out: &mut Vec<u8, N>,
    ) -> Result<(), Error> {
        loop {
            let byte = self.read_byte()?;
            if byte == terminator {
                return Ok(());
            }
            out.push(byte).map_err(|_| Error::Overflow)?;
        }
    }

    /// Consumes everything up to and including `terminator`.
    pub fn skip_until(&mut self, terminator: u8) -> Result<(), Error> {
        while self.read_byte()? != terminator {}
        Ok(())
    }

    /// Consumes exactly `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            self.read_byte()?;
        }
        Ok(())
    }

    /// Copies whatever arrives during `window` into `buf`, dropping anything
    /// past its end. Always takes the full window.
    pub fn capture(&mut self, window: Duration, buf: &mut [u8]) -> Result<usize, Error> {
        let end = Instant::now() + window;
        let mut len = 0;
        let mut dropped = 0usize;
        let mut byte = [0u8; 1];
        while Instant::now() < end {
            if self.uart.read_ready().map_err(io_error)?
                && self.uart.read(&mut byte).map_err(io_error)? == 1
            {
                if let Some(slot) = buf.get_mut(len) {
                    *slot = byte[0];
                    len += 1;
                } else {
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            debug!("Capture limit reached, dropped {} bytes", dropped);
        }
        Ok(len)
    }

    /// Busy-waits without touching the line.
    pub fn pause(&mut self, duration: Duration) {
        block_for(duration);
    }
}

/// Next match position after seeing `byte` with `matched` bytes of `expected`
/// already matched.
fn advance(expected: &[u8], matched: usize, byte: u8) -> usize {
    if expected[matched] == byte {
        return matched + 1;
    }
    // The matched bytes equal `expected[..matched]`. Fall back to the longest
    // proper suffix of that window, extended by `byte`, that is also a prefix.
    let mut k = matched;
    while k > 0 {
        k -= 1;
        let start = matched - k;
        if expected[start..matched] == expected[..k] && expected[k] == byte {
            return k + 1;
        }
    }
    0
}
