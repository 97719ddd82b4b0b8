//! ### Wavecom IP stack
//!
//! The driver only ever uses a single TCP client socket on a GPRS bearer.
//! [`SESSION_SOCKET`] is its index.

pub mod types;

use atat::atat_derive::AtatCmd;
use types::*;

use super::NoResponse;

/// Index of the one TCP client socket the driver uses.
pub const SESSION_SOCKET: u8 = 1;

/// Longest host name or bearer option value the commands accept.
pub const HOST_MAX: usize = 64;

/// Start/stop TCP/IP stack +WIPCFG
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPCFG", NoResponse)]
pub struct SetIpStack {
    #[at_arg(position = 0)]
    pub mode: IpStackMode,
}

/// Open or close a bearer +WIPBR
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPBR", NoResponse)]
pub struct SetBearer {
    #[at_arg(position = 0)]
    pub action: BearerAction,
    #[at_arg(position = 1)]
    pub bearer: BearerId,
}

/// Set a bearer option +WIPBR
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPBR", NoResponse)]
pub struct SetBearerOption<'a> {
    #[at_arg(position = 0)]
    pub action: BearerAction,
    #[at_arg(position = 1)]
    pub bearer: BearerId,
    #[at_arg(position = 2)]
    pub option: BearerOption,
    #[at_arg(position = 3, len = 64)]
    pub value: &'a str,
}

impl<'a> SetBearerOption<'a> {
    pub fn gprs(option: BearerOption, value: &'a str) -> Self {
        Self {
            action: BearerAction::SetOption,
            bearer: BearerId::Gprs,
            option,
            value,
        }
    }
}

/// Start a bearer +WIPBR
///
/// Attaching to the GPRS network may be refused transiently.
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPBR", NoResponse, timeout_ms = 5000)]
pub struct StartBearer {
    #[at_arg(position = 0)]
    pub action: BearerAction,
    #[at_arg(position = 1)]
    pub bearer: BearerId,
    #[at_arg(position = 2)]
    pub mode: BearerMode,
}

impl StartBearer {
    pub fn gprs_client() -> Self {
        Self {
            action: BearerAction::Start,
            bearer: BearerId::Gprs,
            mode: BearerMode::Client,
        }
    }
}

/// Create a socket +WIPCREATE
///
/// Replies `OK` first, then `+WIPREADY: <proto>,<idx>` once the peer
/// accepted the connection.
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPCREATE", NoResponse, timeout_ms = 5000)]
pub struct CreateSocket<'a> {
    #[at_arg(position = 0)]
    pub protocol: SocketProtocol,
    #[at_arg(position = 1)]
    pub index: u8,
    #[at_arg(position = 2, len = 64)]
    pub host: &'a str,
    #[at_arg(position = 3)]
    pub port: u16,
}

/// Switch a socket to data mode +WIPDATA
///
/// In continuous mode everything written goes to the peer until the `+++`
/// escape sequence.
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPDATA", NoResponse)]
pub struct SetDataMode {
    #[at_arg(position = 0)]
    pub protocol: SocketProtocol,
    #[at_arg(position = 1)]
    pub index: u8,
    #[at_arg(position = 2)]
    pub mode: DataMode,
}

/// Close a socket +WIPCLOSE
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPCLOSE", NoResponse)]
pub struct CloseSocket {
    #[at_arg(position = 0)]
    pub protocol: SocketProtocol,
    #[at_arg(position = 1)]
    pub index: u8,
}

/// ICMP echo +WIPPING
///
/// Answers `+WIPPING: <status>,<idx>,<time>` with the round trip in ms.
#[derive(Clone, AtatCmd)]
#[at_cmd("+WIPPING", NoResponse, timeout_ms = 10000)]
pub struct Ping<'a> {
    #[at_arg(position = 0, len = 64)]
    pub host: &'a str,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::command::encode;

    #[test]
    fn ip_stack() {
        assert_eq!(
            encode(&SetIpStack {
                mode: IpStackMode::Start
            }),
            "AT+WIPCFG=1\r\n"
        );
        assert_eq!(
            encode(&SetIpStack {
                mode: IpStackMode::Stop
            }),
            "AT+WIPCFG=0\r\n"
        );
    }

    #[test]
    fn bearer() {
        assert_eq!(
            encode(&SetBearer {
                action: BearerAction::Open,
                bearer: BearerId::Gprs
            }),
            "AT+WIPBR=1,6\r\n"
        );
        assert_eq!(
            encode(&SetBearerOption::gprs(
                BearerOption::AccessPointName,
                "internet"
            )),
            "AT+WIPBR=2,6,11,\"internet\"\r\n"
        );
        assert_eq!(
            encode(&SetBearerOption::gprs(BearerOption::Username, "")),
            "AT+WIPBR=2,6,0,\"\"\r\n"
        );
        assert_eq!(
            encode(&SetBearerOption::gprs(BearerOption::Password, "secret")),
            "AT+WIPBR=2,6,1,\"secret\"\r\n"
        );
        assert_eq!(encode(&StartBearer::gprs_client()), "AT+WIPBR=4,6,0\r\n");
    }

    #[test]
    fn socket() {
        assert_eq!(
            encode(&CreateSocket {
                protocol: SocketProtocol::TcpClient,
                index: SESSION_SOCKET,
                host: "example.com",
                port: 80
            }),
            "AT+WIPCREATE=2,1,\"example.com\",80\r\n"
        );
        assert_eq!(
            encode(&SetDataMode {
                protocol: SocketProtocol::TcpClient,
                index: SESSION_SOCKET,
                mode: DataMode::Continuous
            }),
            "AT+WIPDATA=2,1,1\r\n"
        );
        assert_eq!(
            encode(&CloseSocket {
                protocol: SocketProtocol::TcpClient,
                index: SESSION_SOCKET
            }),
            "AT+WIPCLOSE=2,1\r\n"
        );
    }

    #[test]
    fn ping() {
        assert_eq!(
            encode(&Ping { host: "8.8.8.8" }),
            "AT+WIPPING=\"8.8.8.8\"\r\n"
        );
    }
}
