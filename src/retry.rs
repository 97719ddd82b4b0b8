use crate::error::Error;
use crate::module_timing::TimeoutClass;
use crate::scanner::{Scanner, Uart};

/// Bounded retry of a single protocol step, without backoff.
///
/// Only steps the network may transiently refuse are retried: starting the
/// GPRS bearer and creating a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u8,
    pub timeout: TimeoutClass,
}

impl RetryPolicy {
    pub const TRANSIENT: RetryPolicy = RetryPolicy {
        attempts: 3,
        timeout: TimeoutClass::Medium,
    };

    /// Runs `step` under the policy's timeout class until it succeeds or the
    /// attempts are used up. Transport faults are not retried.
    pub fn run<U: Uart, T>(
        &self,
        scanner: &mut Scanner<U>,
        mut step: impl FnMut(&mut Scanner<U>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        scanner.with_timeout(self.timeout, |scanner| {
            let mut last = Error::Timeout;
            for attempt in 1..=self.attempts {
                match step(scanner) {
                    Ok(v) => return Ok(v),
                    Err(e) if e.is_transport_fault() => return Err(e),
                    Err(e) => {
                        warn!("Attempt {}/{} failed: {:?}", attempt, self.attempts, e);
                        last = e;
                    }
                }
            }
            Err(last)
        })
    }
}
