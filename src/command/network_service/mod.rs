//! ### Network service

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// Network registration +CREG
///
/// Read form: `+CREG: <n>,<stat>`. With unsolicited reports disabled `<n>`
/// is 0, `<stat>` is 1 when registered on the home network and 5 when
/// roaming.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NoResponse)]
pub struct GetNetworkRegistrationStatus;

/// Signal quality +CSQ
///
/// Returns `+CSQ: <rssi>,<ber>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse)]
pub struct GetSignalQuality;
