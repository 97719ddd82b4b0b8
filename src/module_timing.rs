use embassy_time::Duration;

/// How long the reply scanner blocks waiting for an expected reply.
///
/// `Short` is the resting class; every operation that raises it restores it
/// before returning.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutClass {
    #[default]
    Short,
    Medium,
    Long,
}

/// Fixed delays and timeouts of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Time the ON/OFF line is held high to switch the module on
    pub power_on_pulse: Duration,
    /// Low time of the ON/OFF line preceding the switch-off pulse
    pub power_off_low: Duration,
    /// High time of the ON/OFF line to trigger a graceful switch off.
    ///
    /// Stated as 5.5 s in the datasheet, 3 s is observed to be enough.
    pub power_off_pulse: Duration,
    /// Time to wait after the power pulse before talking to the module
    pub boot_wait: Duration,
    /// Overall window for the SIM card to report ready
    pub sim_ready_window: Duration,
    /// Overall window for the module to register on the network
    pub network_search_window: Duration,
    pub short_timeout: Duration,
    pub medium_timeout: Duration,
    pub long_timeout: Duration,
    /// Fixed window during which an HTTP GET response is captured
    pub http_capture_window: Duration,
    /// Silence kept on the line before the `+++` escape sequence
    pub escape_guard: Duration,
    /// Settling delay after `EHLO`, the server's feature list is discarded
    pub smtp_settle: Duration,
    /// Pause the module needs after a completed transfer
    pub transfer_pause: Duration,
}

impl Timing {
    pub const WISMO228: Timing = Timing {
        power_on_pulse: Duration::from_millis(685),
        power_off_low: Duration::from_millis(100),
        power_off_pulse: Duration::from_millis(3000),
        boot_wait: Duration::from_millis(3000),
        sim_ready_window: Duration::from_millis(10_000),
        network_search_window: Duration::from_millis(30_000),
        short_timeout: Duration::from_millis(3000),
        medium_timeout: Duration::from_millis(5000),
        long_timeout: Duration::from_millis(10_000),
        http_capture_window: Duration::from_millis(3000),
        escape_guard: Duration::from_millis(1000),
        smtp_settle: Duration::from_millis(5000),
        transfer_pause: Duration::from_millis(1000),
    };

    pub fn timeout(&self, class: TimeoutClass) -> Duration {
        match class {
            TimeoutClass::Short => self.short_timeout,
            TimeoutClass::Medium => self.medium_timeout,
            TimeoutClass::Long => self.long_timeout,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::WISMO228
    }
}
