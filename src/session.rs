//! TCP client session on top of the GPRS bearer.
//!
//! A session is opened with `+WIPCREATE`, switched into data mode with
//! `+WIPDATA`, left again through the `+++` escape sequence and closed with
//! `+WIPCLOSE`. Only one session exists at a time.

use crate::client::Device;
use crate::command::{
    replies,
    wip::{
        types::{DataMode, SocketProtocol},
        CloseSocket, CreateSocket, SetDataMode, HOST_MAX, SESSION_SOCKET,
    },
};
use crate::config::CellularConfig;
use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::scanner::Uart;

impl<U, C> Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    /// Connects the session socket, retrying while the peer is unreachable.
    pub(crate) fn open_port(&mut self, host: &str, port: u16) -> Result<(), Error> {
        if host.len() > HOST_MAX {
            return Err(Error::Overflow);
        }
        let cmd = CreateSocket {
            protocol: SocketProtocol::TcpClient,
            index: SESSION_SOCKET,
            host,
            port,
        };
        RetryPolicy::TRANSIENT.run(&mut self.scanner, |scanner| {
            scanner.send(&cmd)?;
            scanner.expect(replies::SOCKET_READY)
        })?;
        debug!("Session open to {}:{}", host, port);
        Ok(())
    }

    /// Switches the line to raw data mode. Everything written from here on
    /// goes to the peer.
    pub(crate) fn exchange_data(&mut self) -> Result<(), Error> {
        self.scanner.send(&SetDataMode {
            protocol: SocketProtocol::TcpClient,
            index: SESSION_SOCKET,
            mode: DataMode::Continuous,
        })?;
        self.scanner.expect(replies::CONNECT)
    }

    /// Sends the escape sequence after the mandatory silence and waits for
    /// the module to answer in command mode.
    pub(crate) fn leave_data_mode(&mut self) -> Result<(), Error> {
        let guard = self.scanner.timing().escape_guard;
        self.scanner.pause(guard);
        self.scanner.write_all(replies::ESCAPE)?;
        self.scanner.expect(replies::OK)
    }

    pub(crate) fn close_port(&mut self) -> Result<(), Error> {
        self.scanner.send(&CloseSocket {
            protocol: SocketProtocol::TcpClient,
            index: SESSION_SOCKET,
        })?;
        self.scanner.expect(replies::OK)?;
        debug!("Session closed");
        Ok(())
    }
}
