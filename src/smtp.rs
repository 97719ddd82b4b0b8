use crate::base64::encode_credential;
use crate::client::Device;
use crate::command::replies;
use crate::config::CellularConfig;
use crate::error::Error;
use crate::module_timing::TimeoutClass;
use crate::scanner::Uart;
use crate::state::ModuleState;

/// Base64 of `Username:`
const USERNAME_PROMPT: &[u8] = b"334 VXNlcm5hbWU6\r\n";
/// Base64 of `Password:`
const PASSWORD_PROMPT: &[u8] = b"334 UGFzc3dvcmQ6\r\n";

#[derive(Debug, Clone, Copy)]
pub struct Email<'a> {
    /// Account name, also used as the sender address
    pub username: &'a str,
    pub password: &'a str,
    pub recipient: &'a str,
    pub subject: &'a str,
    pub content: &'a str,
}

/// Mail submission through an SMTP server requiring `AUTH LOGIN`.
pub trait Smtp {
    fn send_email(&mut self, server: &str, port: u16, email: &Email<'_>) -> Result<(), Error>;
}

impl<U, C> Smtp for Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    fn send_email(&mut self, server: &str, port: u16, email: &Email<'_>) -> Result<(), Error> {
        self.state.require(ModuleState::GprsOn)?;
        let username = encode_credential(email.username)?;
        let password = encode_credential(email.password)?;

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.open_port(server, port)?;

            // The module announces the buffered server banner
            dev.scanner
                .with_timeout(TimeoutClass::Medium, |s| s.expect(replies::SOCKET_DATA))?;
            dev.reply.clear();
            dev.scanner.read_until(b'\r', &mut dev.reply)?;
            let banner = core::str::from_utf8(&dev.reply)?
                .parse::<usize>()
                .map_err(|_| Error::Unparseable)?;
            dev.scanner.expect(b"\n")?;

            dev.exchange_data()?;
            dev.scanner.skip(banner)?;

            let timing = *dev.scanner.timing();
            let s = &mut dev.scanner;
            s.write_str("EHLO\r\n")?;
            // The extension list is of no interest
            s.pause(timing.smtp_settle);
            s.discard_input()?;

            s.write_str("AUTH LOGIN\r\n")?;
            s.expect(USERNAME_PROMPT)?;
            s.write_fmt_line(format_args!("{}", username))?;
            s.expect(PASSWORD_PROMPT)?;
            s.write_fmt_line(format_args!("{}", password))?;
            s.with_timeout(TimeoutClass::Medium, |s| s.expect(replies::SMTP_AUTH_OK))?;

            s.write_fmt_line(format_args!("MAIL FROM: {}", email.username))?;
            s.expect(replies::SMTP_OK)?;
            s.write_fmt_line(format_args!("RCPT TO: {}", email.recipient))?;
            s.expect(replies::SMTP_ACCEPTED)?;
            s.write_str("DATA\r\n")?;
            s.expect(replies::SMTP_DATA_GO)?;
            s.skip_until(b'\n')?;

            s.write_fmt_line(format_args!("From: {}", email.username))?;
            s.write_fmt_line(format_args!("To: {}", email.recipient))?;
            s.write_fmt_line(format_args!("Subject: {}", email.subject))?;
            s.write_str("\r\n")?;
            s.write_str(email.content)?;
            s.write_str("\r\n.\r\n")?;

            s.with_timeout(TimeoutClass::Medium, |s| s.expect(replies::SMTP_QUEUED))?;
            // Queue id
            s.skip_until(b'\n')?;
            debug!("Email accepted by server");

            s.pause(timing.transfer_pause);
            dev.leave_data_mode()?;
            dev.close_port()
        })
    }
}
