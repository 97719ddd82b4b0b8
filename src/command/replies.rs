//! Literal replies the driver scans for.

pub const OK: &[u8] = b"\r\nOK\r\n";
pub const SIM_READY: &[u8] = b"\r\n+CPIN: READY\r\n\r\nOK\r\n";
/// Followed by the registration status digit.
pub const REGISTRATION: &[u8] = b"\r\n+CREG: 0,";
pub const REGISTRATION_END: &[u8] = b"\r\n\r\nOK\r\n";

pub const SMS_PROMPT: &[u8] = b"\r\n> ";
/// Terminates an SMS body in text mode.
pub const CTRL_Z: u8 = 0x1a;
pub const SMS_SENT: &[u8] = b"\r\n+CMGS: ";
/// Closes a reply whose last field was read up to `\r`.
pub const FIELD_OK: &[u8] = b"\n\r\nOK\r\n";
pub const SMS_LISTED: &[u8] = b"\r\n+CMGL: ";
pub const SMS_UNREAD: &[u8] = b"\"REC UNREAD\",\"+";
pub const QUOTED_FIELD: &[u8] = b",\"";
pub const SMS_HEADER_END: &[u8] = b"\"\r\n";
pub const SMS_LIST_END: &[u8] = b"\nOK\r\n";

pub const SOCKET_READY: &[u8] = b"\r\nOK\r\n\r\n+WIPREADY: 2,1\r\n";
pub const CONNECT: &[u8] = b"\r\nCONNECT\r\n";
pub const ESCAPE: &[u8] = b"+++";
pub const PEER_CLOSED: &[u8] = b"WIPPEERCLOSE: 2,1\r\n\r\nOK\r\n";
pub const SOCKET_DATA: &[u8] = b"\r\n+WIPDATA: 2,1,";
pub const PING_REPLY: &[u8] = b"\r\nOK\r\n\r\n+WIPPING: ";
pub const PING_SUCCESS: &[u8] = b"0,0,";

pub const CLOCK: &[u8] = b"\r\n+CCLK: \"";
pub const CLOCK_END: &[u8] = b"\"\r\n\r\nOK\r\n";
pub const SIGNAL: &[u8] = b"\r\n+CSQ: ";

pub const HTTP_OK: &[u8] = b"HTTP/1.1 200";
pub const HTTP_SHUTDOWN: &[u8] = b"\r\nSHUTDOWN\r\n";

pub const SMTP_AUTH_OK: &[u8] = b"235 Authentication succeeded\r\n";
pub const SMTP_OK: &[u8] = b"250 OK\r\n";
pub const SMTP_ACCEPTED: &[u8] = b"250 Accepted\r\n";
pub const SMTP_DATA_GO: &[u8] = b"354 ";
pub const SMTP_QUEUED: &[u8] = b"250 OK ";
