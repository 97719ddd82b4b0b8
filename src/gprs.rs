use crate::client::Device;
use crate::command::{
    replies,
    wip::{
        types::{BearerAction, BearerId, BearerOption, IpStackMode},
        Ping, SetBearer, SetBearerOption, SetIpStack, StartBearer, HOST_MAX,
    },
};
use crate::config::{Apn, CellularConfig};
use crate::error::Error;
use crate::module_timing::TimeoutClass;
use crate::retry::RetryPolicy;
use crate::scanner::Uart;
use crate::state::ModuleState;

/// Packet data bearer control.
pub trait Gprs {
    /// Starts the IP stack and attaches a GPRS bearer.
    ///
    /// Only the final bearer start is retried, the network may not grant a
    /// data slot right away.
    fn open_gprs(&mut self, apn: &Apn<'_>) -> Result<(), Error>;

    /// Stops the IP stack, which also releases the bearer.
    fn close_gprs(&mut self) -> Result<(), Error>;

    /// Pings `host` and returns the round trip time in milliseconds.
    fn ping(&mut self, host: &str) -> Result<u32, Error>;
}

impl<U, C> Gprs for Device<U, C>
where
    U: Uart,
    C: CellularConfig,
{
    fn open_gprs(&mut self, apn: &Apn<'_>) -> Result<(), Error> {
        self.state.require(ModuleState::On)?;
        if let Apn::Given {
            name,
            username,
            password,
        } = apn
        {
            let too_long = |s: &Option<&str>| s.map_or(false, |s| s.len() > HOST_MAX);
            if name.len() > HOST_MAX || too_long(username) || too_long(password) {
                return Err(Error::Overflow);
            }
        }

        self.guarded(|dev| {
            dev.scanner.discard_input()?;

            dev.scanner.send(&SetIpStack {
                mode: IpStackMode::Start,
            })?;
            dev.scanner.expect(replies::OK)?;

            dev.scanner.send(&SetBearer {
                action: BearerAction::Open,
                bearer: BearerId::Gprs,
            })?;
            dev.scanner.expect(replies::OK)?;

            if let Apn::Given {
                name,
                username,
                password,
            } = apn
            {
                for (option, value) in [
                    (BearerOption::AccessPointName, *name),
                    (BearerOption::Username, username.unwrap_or("")),
                    (BearerOption::Password, password.unwrap_or("")),
                ] {
                    dev.scanner.send(&SetBearerOption::gprs(option, value))?;
                    dev.scanner.expect(replies::OK)?;
                }
            }

            RetryPolicy::TRANSIENT.run(&mut dev.scanner, |scanner| {
                scanner.send(&StartBearer::gprs_client())?;
                scanner.expect(replies::OK)
            })?;

            dev.state = ModuleState::GprsOn;
            info!("GPRS bearer up");
            Ok(())
        })
    }

    fn close_gprs(&mut self) -> Result<(), Error> {
        self.state.require(ModuleState::GprsOn)?;

        let res = self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&SetIpStack {
                mode: IpStackMode::Stop,
            })?;
            dev.scanner.expect(replies::OK)
        });

        // The bearer is considered gone even without an acknowledgement
        if self.state == ModuleState::GprsOn {
            self.state = ModuleState::On;
            info!("GPRS bearer down");
        }
        res
    }

    fn ping(&mut self, host: &str) -> Result<u32, Error> {
        self.state.require(ModuleState::GprsOn)?;
        if host.len() > HOST_MAX {
            return Err(Error::Overflow);
        }

        self.guarded(|dev| {
            dev.scanner.discard_input()?;
            dev.scanner.send(&Ping { host })?;
            dev.scanner
                .with_timeout(TimeoutClass::Long, |s| s.expect(replies::PING_REPLY))?;
            dev.scanner.expect(replies::PING_SUCCESS)?;

            dev.reply.clear();
            dev.scanner.read_until(b'\r', &mut dev.reply)?;
            dev.scanner.expect(b"\n")?;

            let ms = core::str::from_utf8(&dev.reply)?
                .parse::<u32>()
                .map_err(|_| Error::Unparseable)?;
            debug!("Ping {} ms", ms);
            Ok(ms)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{device_gprs, device_on, gprs_script};

    #[test]
    fn attach_and_detach() {
        let (mut dev, mut uart) = device_on();
        gprs_script(&mut uart);
        assert_eq!(dev.open_gprs(&Apn::new("internet")), Ok(()));
        assert_eq!(dev.status(), ModuleState::GprsOn);
        assert_eq!(
            uart.tx_string(),
            "AT+WIPCFG=1\r\nAT+WIPBR=1,6\r\nAT+WIPBR=2,6,11,\"internet\"\r\n\
             AT+WIPBR=2,6,0,\"\"\r\nAT+WIPBR=2,6,1,\"\"\r\nAT+WIPBR=4,6,0\r\n"
        );

        uart.clear_tx();
        uart.ok("AT+WIPCFG=0\r\n");
        assert_eq!(dev.close_gprs(), Ok(()));
        assert_eq!(dev.status(), ModuleState::On);
        assert_eq!(uart.tx_string(), "AT+WIPCFG=0\r\n");
    }

    #[test]
    fn credentials_are_sent() {
        let (mut dev, mut uart) = device_on();
        uart.ok("AT+WIPCFG=1\r\n")
            .ok("AT+WIPBR=1,6\r\n")
            .ok("AT+WIPBR=2,6,11,\"apn\"\r\n")
            .ok("AT+WIPBR=2,6,0,\"user\"\r\n")
            .ok("AT+WIPBR=2,6,1,\"pass\"\r\n")
            .ok("AT+WIPBR=4,6,0\r\n");
        let apn = Apn::new("apn").with_credentials("user", "pass");
        assert_eq!(dev.open_gprs(&apn), Ok(()));
        assert_eq!(uart.unconsumed(), 0);
    }

    #[test]
    fn without_apn_only_starts_bearer() {
        let (mut dev, mut uart) = device_on();
        uart.ok("AT+WIPCFG=1\r\n")
            .ok("AT+WIPBR=1,6\r\n")
            .ok("AT+WIPBR=4,6,0\r\n");
        assert_eq!(dev.open_gprs(&Apn::None), Ok(()));
        assert_eq!(
            uart.tx_string(),
            "AT+WIPCFG=1\r\nAT+WIPBR=1,6\r\nAT+WIPBR=4,6,0\r\n"
        );
    }

    #[test]
    fn bearer_start_is_retried() {
        let (mut dev, mut uart) = device_on();
        uart.ok("AT+WIPCFG=1\r\n")
            .ok("AT+WIPBR=1,6\r\n")
            .on(b"AT+WIPBR=4,6,0\r\n", b"\r\n+CME ERROR: 847\r\n")
            .on(b"AT+WIPBR=4,6,0\r\n", b"\r\n+CME ERROR: 847\r\n")
            .ok("AT+WIPBR=4,6,0\r\n");
        assert_eq!(dev.open_gprs(&Apn::None), Ok(()));
        assert_eq!(uart.tx_string().matches("AT+WIPBR=4,6,0").count(), 3);
        assert_eq!(dev.scanner.timeout_class(), TimeoutClass::Short);
    }

    #[test]
    fn bearer_start_gives_up_after_three() {
        let (mut dev, mut uart) = device_on();
        uart.ok("AT+WIPCFG=1\r\n").ok("AT+WIPBR=1,6\r\n");
        assert_eq!(dev.open_gprs(&Apn::None), Err(Error::Timeout));
        assert_eq!(uart.tx_string().matches("AT+WIPBR=4,6,0").count(), 3);
        assert_eq!(dev.status(), ModuleState::On);
    }

    #[test]
    fn failed_setup_skips_bearer_start() {
        let (mut dev, mut uart) = device_on();
        uart.ok("AT+WIPCFG=1\r\n")
            .on(b"AT+WIPBR=1,6\r\n", b"\r\nERROR\r\n");
        assert_eq!(dev.open_gprs(&Apn::new("internet")), Err(Error::Timeout));
        assert!(!uart.tx_string().contains("AT+WIPBR=4"));
        assert_eq!(dev.status(), ModuleState::On);
    }

    #[test]
    fn state_preconditions() {
        let (mut dev, uart) = device_gprs();
        assert_eq!(
            dev.open_gprs(&Apn::None),
            Err(Error::InvalidState(ModuleState::GprsOn))
        );
        assert!(uart.tx().is_empty());

        let (mut dev, uart) = device_on();
        assert_eq!(
            dev.close_gprs(),
            Err(Error::InvalidState(ModuleState::On))
        );
        assert_eq!(dev.ping("8.8.8.8"), Err(Error::InvalidState(ModuleState::On)));
        assert!(uart.tx().is_empty());
    }

    #[test]
    fn close_always_returns_to_on() {
        let (mut dev, mut uart) = device_gprs();
        uart.on(b"AT+WIPCFG=0\r\n", b"\r\nERROR\r\n");
        assert_eq!(dev.close_gprs(), Err(Error::Timeout));
        assert_eq!(dev.status(), ModuleState::On);
    }

    #[test]
    fn ping_reports_round_trip() {
        let (mut dev, mut uart) = device_gprs();
        uart.on(
            b"AT+WIPPING=\"8.8.8.8\"\r\n",
            b"\r\nOK\r\n\r\n+WIPPING: 0,0,286\r\n",
        );
        assert_eq!(dev.ping("8.8.8.8"), Ok(286));
    }

    #[test]
    fn ping_failure() {
        let (mut dev, mut uart) = device_gprs();
        uart.on(
            b"AT+WIPPING=\"10.0.0.1\"\r\n",
            b"\r\nOK\r\n\r\n+WIPPING: 1,0,0\r\n",
        );
        assert_eq!(dev.ping("10.0.0.1"), Err(Error::Timeout));
        assert_eq!(dev.status(), ModuleState::GprsOn);
    }
}
