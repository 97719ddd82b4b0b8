use embassy_time::{Duration, Instant};

use crate::command::{
    device_lock::GetPinStatus,
    general::DisableEcho,
    network_service::GetNetworkRegistrationStatus,
    replies,
    sms::{
        types::{MessageFormat, RingIndicatorMode},
        SetMessageFormat, SetRingIndicator,
    },
};
use crate::config::{CellularConfig, RingIndicator as _};
use crate::error::Error;
use crate::notify::MessageNotifier;
use crate::pwr::PwrCtrl;
use crate::scanner::{ReplyBuffer, Scanner, Uart};
use crate::state::ModuleState;

/// Driver for a single WISMO228 module.
///
/// Owns the serial channel, the pin configuration and the lifecycle state.
/// Every operation blocks until its last expected reply arrived or its
/// timeout elapsed.
pub struct Device<U, C> {
    pub(crate) scanner: Scanner<U>,
    pub(crate) config: C,
    pub(crate) state: ModuleState,
    /// Scratch space for reply tokens, reused by every operation
    pub(crate) reply: ReplyBuffer,
    notifier: Option<&'static MessageNotifier>,
    armed: bool,
}

impl<U, C> Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    pub fn new(uart: U, config: C) -> Self {
        Self {
            scanner: Scanner::new(uart, C::TIMING),
            config,
            state: ModuleState::Off,
            reply: ReplyBuffer::new(),
            notifier: None,
            armed: false,
        }
    }

    /// Like [`Device::new`], additionally arming the RING line on power up
    /// so new messages are reported through `notifier`.
    pub fn with_notifier(uart: U, config: C, notifier: &'static MessageNotifier) -> Self {
        Self {
            notifier: Some(notifier),
            ..Self::new(uart, config)
        }
    }

    pub fn status(&self) -> ModuleState {
        self.state
    }

    pub fn release(self) -> (U, C) {
        (self.scanner.release(), self.config)
    }

    /// Puts the control lines in their resting state and forces the state
    /// to `Off`. Idempotent.
    pub fn init(&mut self) -> Result<(), Error> {
        self.disarm();
        let timing = *self.scanner.timing();
        PwrCtrl::new(&mut self.config, &timing).release()?;
        self.state = ModuleState::Off;
        Ok(())
    }

    /// Switches the module on and configures it for SMS.
    ///
    /// The state turns `On` as soon as the power pulse has been given. A
    /// later failure does not roll it back, the module is then powered but
    /// not fully configured and [`Device::shutdown`] brings it back to `Off`.
    pub fn power_up(&mut self) -> Result<(), Error> {
        self.state.require(ModuleState::Off)?;

        self.guarded(|dev| {
            let timing = *dev.scanner.timing();
            dev.scanner.open(C::BAUD_RATE)?;
            PwrCtrl::new(&mut dev.config, &timing).power_up()?;
            dev.state = ModuleState::On;
            info!("Module powered on");

            dev.scanner.pause(timing.boot_wait);
            dev.scanner.discard_input()?;

            dev.disable_echo()?;
            dev.sim_ready()?;
            dev.register_network()?;
            dev.text_mode_sms()?;
            if dev.notifier.is_some() && dev.config.ring_pin().is_some() {
                dev.new_message_setup()?;
            }
            info!("Module ready");
            Ok(())
        })
    }

    /// Switches the module off from any state but `Off`, where it does
    /// nothing.
    ///
    /// The state ends up `Off` even if driving a line failed, in which case
    /// the first error is returned.
    pub fn shutdown(&mut self) -> Result<(), Error> {
        if self.state == ModuleState::Off {
            return Ok(());
        }

        self.disarm();
        let timing = *self.scanner.timing();
        let pulse = PwrCtrl::new(&mut self.config, &timing).power_down();
        if let Err(e) = self.scanner.discard_input() {
            warn!("Could not drain input on shutdown: {:?}", e);
        }
        let close = self.scanner.close();

        self.state = ModuleState::Off;
        info!("Module powered off");
        pulse.and(close)
    }

    /// Runs an operation, moving to `Error` if the transport failed.
    pub(crate) fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let res = op(self);
        if let Err(e) = &res {
            if e.is_transport_fault() {
                error!("Serial transport fault: {:?}", e);
                self.state = ModuleState::Error;
            }
        }
        res
    }

    fn disarm(&mut self) {
        if self.armed {
            if let Some(ring) = self.config.ring_pin() {
                ring.disarm();
            }
            self.armed = false;
        }
    }

    fn disable_echo(&mut self) -> Result<(), Error> {
        self.scanner.send(&DisableEcho)?;
        // Matches with or without the command echoed back first
        self.scanner.expect(replies::OK)
    }

    fn sim_ready(&mut self) -> Result<(), Error> {
        let window = self.scanner.timing().sim_ready_window;
        self.poll(window, |scanner, deadline| {
            scanner.send(&GetPinStatus)?;
            scanner.expect_until(replies::SIM_READY, deadline)
        })
    }

    fn register_network(&mut self) -> Result<(), Error> {
        let window = self.scanner.timing().network_search_window;
        self.poll(window, |scanner, deadline| {
            scanner.send(&GetNetworkRegistrationStatus)?;
            scanner.expect_until(replies::REGISTRATION, deadline)?;
            match scanner.read_byte_until(deadline)? {
                b'1' => debug!("Registered on home network"),
                b'5' => debug!("Registered, roaming"),
                // Still searching or denied, ask again
                _ => return Err(Error::Timeout),
            }
            scanner.expect_until(replies::REGISTRATION_END, deadline)
        })
    }

    /// Re-issues a query until it succeeds or `window` has passed. Each
    /// attempt waits at most one short timeout, and never past the window.
    fn poll(
        &mut self,
        window: Duration,
        mut attempt: impl FnMut(&mut Scanner<U>, Instant) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let end = Instant::now() + window;
        let per_attempt = self.scanner.timing().short_timeout;
        loop {
            let now = Instant::now();
            if now >= end {
                return Err(Error::Timeout);
            }
            match attempt(&mut self.scanner, (now + per_attempt).min(end)) {
                Err(Error::Timeout) => continue,
                res => return res,
            }
        }
    }

    fn text_mode_sms(&mut self) -> Result<(), Error> {
        self.scanner.send(&SetMessageFormat {
            format: MessageFormat::Text,
        })?;
        self.scanner.expect(replies::OK)
    }

    fn new_message_setup(&mut self) -> Result<(), Error> {
        self.scanner.send(&SetRingIndicator {
            mode: RingIndicatorMode::NewMessage,
            pulse: 0,
        })?;
        self.scanner.expect(replies::OK)?;

        if let (Some(notifier), Some(ring)) = (self.notifier, self.config.ring_pin()) {
            ring.arm(notifier).map_err(|_| Error::IoPin)?;
            self.armed = true;
            debug!("RING line armed for new messages");
        }
        Ok(())
    }
}
