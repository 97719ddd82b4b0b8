use crate::client::Device;
use crate::command::replies;
use crate::config::CellularConfig;
use crate::error::Error;
use crate::module_timing::TimeoutClass;
use crate::scanner::Uart;
use crate::state::ModuleState;

/// An HTTP PUT request.
#[derive(Debug, Clone, Copy)]
pub struct PutRequest<'a> {
    pub path: &'a str,
    /// Value of the `Host` header
    pub host: &'a str,
    /// Full header line authorizing the request, e.g. an API key header
    pub control_key: &'a str,
    pub content_type: &'a str,
    pub body: &'a [u8],
}

/// Minimal HTTP/1.1 over the session socket.
pub trait Http {
    /// Sends a GET request and copies whatever the server sends during the
    /// capture window into `buf`. Bytes that do not fit are dropped.
    ///
    /// Returns the number of bytes stored. The window always runs to its end,
    /// the response is not parsed.
    fn get_http(&mut self, server: &str, path: &str, port: u16, buf: &mut [u8])
        -> Result<usize, Error>;

    /// Sends a PUT request and waits for the server to acknowledge it with
    /// status 200 followed by a `SHUTDOWN` line.
    fn put_http(&mut self, server: &str, port: u16, request: &PutRequest<'_>)
        -> Result<(), Error>;
}

impl<U, C> Http for Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    fn get_http(
        &mut self,
        server: &str,
        path: &str,
        port: u16,
        buf: &mut [u8],
    ) -> Result<usize, Error> {
        self.state.require(ModuleState::GprsOn)?;

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.open_port(server, port)?;
            dev.exchange_data()?;

            dev.scanner.write_fmt_line(format_args!(
                "GET {} HTTP/1.1\r\nHost: {}\r\n",
                path, server
            ))?;

            let timing = *dev.scanner.timing();
            let len = dev.scanner.capture(timing.http_capture_window, buf)?;
            debug!("Captured {} bytes of HTTP response", len);

            dev.scanner.pause(timing.escape_guard);
            dev.scanner.discard_input()?;
            dev.scanner.write_all(replies::ESCAPE)?;

            // Either a plain OK or the peer having closed the socket first
            dev.scanner.expect(b"\r\n")?;
            match dev.scanner.read_byte()? {
                b'O' => dev.scanner.expect(b"K\r\n")?,
                b'+' => {
                    dev.scanner.expect(replies::PEER_CLOSED)?;
                    debug!("Server closed the session");
                }
                _ => return Err(Error::Timeout),
            }

            dev.close_port()?;
            Ok(len)
        })
    }

    fn put_http(
        &mut self,
        server: &str,
        port: u16,
        request: &PutRequest<'_>,
    ) -> Result<(), Error> {
        self.state.require(ModuleState::GprsOn)?;

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.open_port(server, port)?;

            if let Err(e) = dev.exchange_data() {
                if let Err(close) = dev.close_port() {
                    warn!("Closing session after failed handshake: {:?}", close);
                }
                return Err(e);
            }

            let s = &mut dev.scanner;
            s.write_fmt_line(format_args!("PUT {} HTTP/1.1", request.path))?;
            s.write_fmt_line(format_args!("Host: {}", request.host))?;
            s.write_fmt_line(format_args!("{}", request.control_key))?;
            s.write_fmt_line(format_args!("Content-Length: {}", request.body.len()))?;
            s.write_fmt_line(format_args!("Content-Type: {}", request.content_type))?;
            s.write_fmt_line(format_args!("Connection: close"))?;
            s.write_str("\r\n")?;
            s.write_all(request.body)?;

            s.with_timeout(TimeoutClass::Medium, |s| s.expect(replies::HTTP_OK))?;
            s.with_timeout(TimeoutClass::Long, |s| s.expect(replies::HTTP_SHUTDOWN))?;

            dev.leave_data_mode()?;
            dev.close_port()
        })
    }
}
