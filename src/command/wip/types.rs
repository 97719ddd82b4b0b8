//! Argument types used by the Wavecom IP stack commands
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpStackMode {
    /// • 0: stop the TCP/IP stack
    Stop = 0,
    /// • 1: start the TCP/IP stack
    Start = 1,
}

/// Operation requested through `+WIPBR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerAction {
    Close = 0,
    Open = 1,
    SetOption = 2,
    Start = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerId {
    /// • 6: GPRS
    Gprs = 6,
}

/// Bearer option selected with `+WIPBR=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerOption {
    Username = 0,
    Password = 1,
    AccessPointName = 11,
}

/// Bearer start mode, only client mode is supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BearerMode {
    Client = 0,
    Server = 1,
}

/// Socket protocol of `+WIPCREATE`, `+WIPDATA` and `+WIPCLOSE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocketProtocol {
    Udp = 1,
    TcpClient = 2,
    TcpServer = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMode {
    Command = 0,
    Continuous = 1,
}
