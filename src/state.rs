/// Coarse operating mode of the module, as tracked by the driver.
///
/// Transitions only run along `Off <-> On <-> GprsOn`. `Error` is entered
/// when the serial transport itself reports a fault, and is only left through
/// [`Device::shutdown`](crate::Device::shutdown).
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModuleState {
    Off = 0,
    On = 1,
    GprsOn = 2,
    Error = 3,
}

impl Default for ModuleState {
    fn default() -> Self {
        Self::Off
    }
}

impl ModuleState {
    /// Powered and accepting AT commands, with or without an active bearer.
    pub fn is_powered(self) -> bool {
        matches!(self, Self::On | Self::GprsOn)
    }

    pub(crate) fn require(self, expected: ModuleState) -> Result<(), crate::Error> {
        if self == expected {
            Ok(())
        } else {
            Err(crate::Error::InvalidState(self))
        }
    }

    pub(crate) fn require_powered(self) -> Result<(), crate::Error> {
        if self.is_powered() {
            Ok(())
        } else {
            Err(crate::Error::InvalidState(self))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn default_is_off() {
        assert_eq!(ModuleState::default(), ModuleState::Off);
    }

    #[test]
    fn powered_states() {
        assert!(!ModuleState::Off.is_powered());
        assert!(ModuleState::On.is_powered());
        assert!(ModuleState::GprsOn.is_powered());
        assert!(!ModuleState::Error.is_powered());
    }

    #[test]
    fn require_reports_current_state() {
        assert_eq!(ModuleState::On.require(ModuleState::On), Ok(()));
        assert_eq!(
            ModuleState::GprsOn.require(ModuleState::On),
            Err(Error::InvalidState(ModuleState::GprsOn))
        );
        assert_eq!(
            ModuleState::Off.require_powered(),
            Err(Error::InvalidState(ModuleState::Off))
        );
    }
}
