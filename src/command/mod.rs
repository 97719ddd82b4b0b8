//! AT Commands for the Sierra Wireless WISMO228 module
//!
//! Commands are typed and encoded through `atat`. Replies are not parsed into
//! response types: the driver validates them byte for byte against the
//! literals in [`replies`].

pub mod device_lock;
pub mod general;
pub mod mobile_control;
pub mod network_service;
pub mod replies;
pub mod sms;
pub mod wip;

use atat::atat_derive::AtatResp;

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[cfg(test)]
pub(crate) fn encode<A: atat::AtatCmd>(cmd: &A) -> std::string::String {
    let mut buf = [0u8; 256];
    let len = cmd.write(&mut buf);
    std::string::String::from_utf8(buf[..len].to_vec()).unwrap()
}
