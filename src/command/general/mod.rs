//! ### General commands

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// Echo off E0
///
/// Stops the module from echoing command lines back, which halves the
/// traffic on the line.
#[derive(Clone, AtatCmd)]
#[at_cmd("E0", NoResponse)]
pub struct DisableEcho;
