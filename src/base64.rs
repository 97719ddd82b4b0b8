//! Base64 (RFC 4648, padded) for SMTP `AUTH LOGIN` credentials.

use base64ct::{Base64, Encoding};
use heapless::String;

use crate::error::Error;

/// Longest credential, in bytes, that can be sent through `AUTH LOGIN`.
pub const CREDENTIAL_MAX: usize = 96;

/// Encoded size of a `CREDENTIAL_MAX` long input.
pub const ENCODED_MAX: usize = CREDENTIAL_MAX / 3 * 4;

/// Encodes `input` into `out`, returning the encoded text.
pub fn encode<'o>(input: &[u8], out: &'o mut [u8]) -> Result<&'o str, Error> {
    Ok(Base64::encode(input, out)?)
}

/// Decodes `input` into `out`, returning the decoded bytes.
pub fn decode<'o>(input: &[u8], out: &'o mut [u8]) -> Result<&'o [u8], Error> {
    Base64::decode(input, out).map_err(|_| Error::Unparseable)
}

/// Encodes a credential for `AUTH LOGIN`.
pub fn encode_credential(input: &str) -> Result<String<ENCODED_MAX>, Error> {
    if input.len() > CREDENTIAL_MAX {
        return Err(Error::Overflow);
    }
    let mut buf = [0u8; ENCODED_MAX];
    let encoded = encode(input.as_bytes(), &mut buf)?;
    let mut s = String::new();
    s.push_str(encoded).map_err(|_| Error::Overflow)?;
    Ok(s)
}
