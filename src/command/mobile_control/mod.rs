//! ### Mobile equipment control

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// Clock +CCLK
///
/// Read form: `+CCLK: "YY/MM/DD,HH:MM:SS±QQ"`, `QQ` being the offset from
/// UTC in quarters of an hour.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCLK?", NoResponse)]
pub struct GetClock;

/// Clock +CCLK
///
/// Sets the real-time clock of the module.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CCLK", NoResponse)]
pub struct SetClock<'a> {
    #[at_arg(position = 0, len = 20)]
    pub time: &'a str,
}
