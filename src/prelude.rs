//! Prelude - Include traits
pub use crate::gprs::Gprs;
pub use crate::gsm::Gsm;
pub use crate::http::Http;
pub use crate::smtp::Smtp;
pub use crate::sms::Sms;
