use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embassy_time::{Duration, Instant};
use embedded_io::ErrorKind;

use crate::client::Device;
use crate::config::{Apn, CellularConfig, RingIndicator};
use crate::gprs::Gprs as _;
use crate::module_timing::Timing;
use crate::notify::MessageNotifier;
use crate::scanner::Uart;

pub const FAST: Timing = Timing {
    power_on_pulse: Duration::from_millis(1),
    power_off_low: Duration::from_millis(1),
    power_off_pulse: Duration::from_millis(1),
    boot_wait: Duration::from_millis(1),
    sim_ready_window: Duration::from_millis(100),
    network_search_window: Duration::from_millis(100),
    short_timeout: Duration::from_millis(20),
    medium_timeout: Duration::from_millis(30),
    long_timeout: Duration::from_millis(50),
    http_capture_window: Duration::from_millis(20),
    escape_guard: Duration::from_millis(1),
    smtp_settle: Duration::from_millis(1),
    transfer_pause: Duration::from_millis(1),
};

pub fn fast_timing() -> Timing {
    FAST
}

#[derive(Default)]
pub struct UartLog {
    rx: VecDeque<u8>,
    /// Chunks held back until their release time
    scheduled: VecDeque<(Instant, Vec<u8>)>,
    pub tx: Vec<u8>,
    /// Replies injected once their trigger shows up in `tx`, in order
    script: VecDeque<(Vec<u8>, Vec<u8>)>,
    /// Position in `tx` the next trigger is searched from
    cursor: usize,
    pub opened: Vec<u32>,
    pub closed: usize,
    pub broken: bool,
}

impl UartLog {
    fn release_due(&mut self) {
        let now = Instant::now();
        while let Some((at, _)) = self.scheduled.front() {
            if *at > now {
                return;
            }
            if let Some((_, chunk)) = self.scheduled.pop_front() {
                self.rx.extend(chunk);
            }
        }
    }

    fn run_script(&mut self) {
        while let Some((trigger, _)) = self.script.front() {
            let window = &self.tx[self.cursor..];
            let Some(pos) = window
                .windows(trigger.len().max(1))
                .position(|w| w == &trigger[..])
            else {
                return;
            };
            self.cursor += pos + trigger.len();
            if let Some((_, reply)) = self.script.pop_front() {
                self.rx.extend(reply);
            }
        }
    }
}

/// Scripted serial line. Clones share the same state, so a test keeps one
/// handle while the driver owns the other.
#[derive(Clone, Default)]
pub struct MockUart(pub Rc<RefCell<UartLog>>);

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `bytes` available for reading right away.
    pub fn inject(&mut self, bytes: &[u8]) {
        self.0.borrow_mut().rx.extend(bytes);
    }

    /// Makes `bytes` available once `delay` has passed. Chunks are released
    /// in the order they were scheduled.
    pub fn inject_after(&mut self, delay: Duration, bytes: &[u8]) -> &mut Self {
        self.0
            .borrow_mut()
            .scheduled
            .push_back((Instant::now() + delay, bytes.to_vec()));
        self
    }

    /// Queues `reply` to arrive once `trigger` has been written.
    pub fn on(&mut self, trigger: &[u8], reply: &[u8]) -> &mut Self {
        self.0
            .borrow_mut()
            .script
            .push_back((trigger.to_vec(), reply.to_vec()));
        self
    }

    /// Queues `OK` as the answer to `command`.
    pub fn ok(&mut self, command: &str) -> &mut Self {
        self.on(command.as_bytes(), b"\r\nOK\r\n")
    }

    pub fn tx(&self) -> Vec<u8> {
        self.0.borrow().tx.clone()
    }

    pub fn tx_string(&self) -> std::string::String {
        std::string::String::from_utf8_lossy(&self.0.borrow().tx).into_owned()
    }

    pub fn clear_tx(&mut self) {
        let mut log = self.0.borrow_mut();
        log.tx.clear();
        log.cursor = 0;
    }

    /// Script entries whose trigger never got written.
    pub fn unconsumed(&self) -> usize {
        self.0.borrow().script.len()
    }

    pub fn pending_rx(&self) -> usize {
        self.0.borrow().rx.len()
    }

    pub fn break_line(&mut self) {
        self.0.borrow_mut().broken = true;
    }

    fn check(&self) -> Result<(), ErrorKind> {
        if self.0.borrow().broken {
            Err(ErrorKind::BrokenPipe)
        } else {
            Ok(())
        }
    }
}

impl embedded_io::ErrorType for MockUart {
    type Error = ErrorKind;
}

impl embedded_io::Read for MockUart {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.check()?;
        let mut log = self.0.borrow_mut();
        log.release_due();
        let mut n = 0;
        while n < buf.len() {
            match log.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for MockUart {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        let mut log = self.0.borrow_mut();
        log.release_due();
        Ok(!log.rx.is_empty())
    }
}

impl embedded_io::Write for MockUart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.check()?;
        let mut log = self.0.borrow_mut();
        log.tx.extend_from_slice(buf);
        log.run_script();
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.check()
    }
}

impl Uart for MockUart {
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        self.check()?;
        self.0.borrow_mut().opened.push(baud_rate);
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().closed += 1;
        Ok(())
    }
}

/// Output pin recording every level it was driven to.
#[derive(Clone, Default)]
pub struct MockPin(pub Rc<RefCell<Vec<bool>>>);

impl MockPin {
    pub fn levels(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Default)]
pub struct RingLog {
    pub armed: bool,
    pub arms: usize,
    pub disarms: usize,
    pub notifier: Option<&'static MessageNotifier>,
}

#[derive(Clone, Default)]
pub struct MockRing(pub Rc<RefCell<RingLog>>);

impl MockRing {
    pub fn armed(&self) -> bool {
        self.0.borrow().armed
    }

    /// Simulates a falling edge on the RING line.
    pub fn fire(&self) -> bool {
        let log = self.0.borrow();
        match (log.armed, log.notifier) {
            (true, Some(n)) => n.signal(),
            _ => false,
        }
    }
}

impl embedded_hal::digital::ErrorType for MockRing {
    type Error = core::convert::Infallible;
}

impl RingIndicator for MockRing {
    fn arm(&mut self, notifier: &'static MessageNotifier) -> Result<(), Self::Error> {
        let mut log = self.0.borrow_mut();
        log.armed = true;
        log.arms += 1;
        log.notifier = Some(notifier);
        Ok(())
    }

    fn disarm(&mut self) {
        let mut log = self.0.borrow_mut();
        log.armed = false;
        log.disarms += 1;
    }
}

#[derive(Clone, Default)]
pub struct TestConfig {
    pub power: Option<MockPin>,
    pub ring: Option<MockRing>,
}

impl TestConfig {
    pub fn with_pins() -> Self {
        Self {
            power: Some(MockPin::default()),
            ring: Some(MockRing::default()),
        }
    }
}

impl CellularConfig for TestConfig {
    type PowerPin = MockPin;
    type RingPin = MockRing;

    const TIMING: Timing = FAST;

    fn power_pin(&mut self) -> Option<&mut Self::PowerPin> {
        self.power.as_mut()
    }

    fn ring_pin(&mut self) -> Option<&mut Self::RingPin> {
        self.ring.as_mut()
    }
}

/// Replies for a clean power up on the home network.
pub fn boot_script(uart: &mut MockUart) {
    uart.ok("ATE0\r\n")
        .on(b"AT+CPIN?\r\n", b"\r\n+CPIN: READY\r\n\r\nOK\r\n")
        .on(b"AT+CREG?\r\n", b"\r\n+CREG: 0,1\r\n\r\nOK\r\n")
        .ok("AT+CMGF=1\r\n");
}

/// Replies for attaching with the APN `internet` and no credentials.
pub fn gprs_script(uart: &mut MockUart) {
    uart.ok("AT+WIPCFG=1\r\n")
        .ok("AT+WIPBR=1,6\r\n")
        .ok("AT+WIPBR=2,6,11,\"internet\"\r\n")
        .ok("AT+WIPBR=2,6,0,\"\"\r\n")
        .ok("AT+WIPBR=2,6,1,\"\"\r\n")
        .ok("AT+WIPBR=4,6,0\r\n");
}

/// A powered up device with an empty transmit log.
pub fn device_on() -> (Device<MockUart, TestConfig>, MockUart) {
    let mut uart = MockUart::new();
    boot_script(&mut uart);
    let mut dev = Device::new(uart.clone(), TestConfig::default());
    assert_eq!(dev.power_up(), Ok(()));
    uart.clear_tx();
    (dev, uart)
}

/// A device with an active GPRS bearer and an empty transmit log.
pub fn device_gprs() -> (Device<MockUart, TestConfig>, MockUart) {
    let (mut dev, mut uart) = device_on();
    gprs_script(&mut uart);
    assert_eq!(dev.open_gprs(&Apn::new("internet")), Ok(()));
    uart.clear_tx();
    (dev, uart)
}
