use crate::error::{Result, ScreeningError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Hard mutual exclusion for one kind of operation.
///
/// A second [`SingleFlight::try_acquire`] while a permit is alive fails with
/// [`ScreeningError::Busy`] instead of queueing.
#[derive(Debug)]
pub struct SingleFlight {
    operation: &'static str,
    in_flight: AtomicBool,
}

impl SingleFlight {
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn try_acquire(&self) -> Result<FlightPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ScreeningError::Busy {
                operation: self.operation,
            })?;
        Ok(FlightPermit { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Releases its [`SingleFlight`] when dropped, on every exit path
#[derive(Debug)]
pub struct FlightPermit<'a> {
    guard: &'a SingleFlight,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}
