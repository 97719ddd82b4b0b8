use embedded_hal::digital::{ErrorType, OutputPin};

use crate::module_timing::Timing;
use crate::notify::MessageNotifier;

pub struct NoPin;

impl ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl RingIndicator for NoPin {
    fn arm(&mut self, _notifier: &'static MessageNotifier) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disarm(&mut self) {}
}

/// The module's RING line, used as a new-message indicator.
///
/// Implementations attach a falling-edge interrupt on `arm`, whose handler
/// only calls [`MessageNotifier::signal`]. The application drains the
/// notifier outside of any driver call.
pub trait RingIndicator: ErrorType {
    fn arm(&mut self, notifier: &'static MessageNotifier) -> Result<(), Self::Error>;
    fn disarm(&mut self);
}

pub trait CellularConfig {
    type PowerPin: OutputPin;
    type RingPin: RingIndicator;

    const BAUD_RATE: u32 = 9600;
    const TIMING: Timing = Timing::WISMO228;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin>;
    fn ring_pin(&mut self) -> Option<&mut Self::RingPin>;
}

/// Access point settings for the GPRS bearer.
#[derive(Debug, Clone, Default)]
pub enum Apn<'a> {
    /// Keep whatever the module has stored
    #[default]
    None,
    Given {
        name: &'a str,
        username: Option<&'a str>,
        password: Option<&'a str>,
    },
}

impl<'a> Apn<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::Given {
            name,
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(self, username: &'a str, password: &'a str) -> Self {
        match self {
            Self::Given { name, .. } => Self::Given {
                name,
                username: Some(username),
                password: Some(password),
            },
            Self::None => Self::None,
        }
    }
}
