//! ### Device lock

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// Enter PIN +CPIN
///
/// Read form: reports whether the SIM card is ready or still waits for a
/// PIN/PUK. The SIM needs a few seconds after power up before it reports
/// `READY`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN?", NoResponse, timeout_ms = 10000)]
pub struct GetPinStatus;
