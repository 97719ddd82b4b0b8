use embassy_time::block_for;
use embedded_hal::digital::OutputPin as _;

use crate::{config::CellularConfig, error::Error, module_timing::Timing};

/// Drives the module's ON/OFF line.
pub(crate) struct PwrCtrl<'b, C> {
    config: &'b mut C,
    timing: &'b Timing,
}

impl<'b, C> PwrCtrl<'b, C>
where
    C: CellularConfig,
{
    pub(crate) fn new(config: &'b mut C, timing: &'b Timing) -> Self {
        Self { config, timing }
    }

    /// Holds the ON/OFF line released, the resting level.
    pub(crate) fn release(&mut self) -> Result<(), Error> {
        if let Some(pin) = self.config.power_pin() {
            pin.set_low().map_err(|_| Error::IoPin)?;
        }
        Ok(())
    }

    pub(crate) fn power_up(&mut self) -> Result<(), Error> {
        if let Some(pin) = self.config.power_pin() {
            debug!("Pulsing ON/OFF line to power up");
            pin.set_high().map_err(|_| Error::IoPin)?;
            block_for(self.timing.power_on_pulse);
            pin.set_low().map_err(|_| Error::IoPin)?;
        } else {
            warn!("No power pin configured");
        }
        Ok(())
    }

    pub(crate) fn power_down(&mut self) -> Result<(), Error> {
        if let Some(pin) = self.config.power_pin() {
            debug!("Pulsing ON/OFF line to power down");
            pin.set_low().map_err(|_| Error::IoPin)?;
            block_for(self.timing.power_off_low);
            pin.set_high().map_err(|_| Error::IoPin)?;
            block_for(self.timing.power_off_pulse);
            pin.set_low().map_err(|_| Error::IoPin)?;
        } else {
            warn!("No power pin configured");
        }
        Ok(())
    }
}
