//! Line position reports.

use super::bus::Bus;
use super::time::ClockTime;

/// Every bus currently running on a line, as of `issued_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    issued_at: ClockTime,
    buses: Vec<Bus>,
}

impl LineReport {
    pub fn new(issued_at: ClockTime, buses: Vec<Bus>) -> Self {
        Self { issued_at, buses }
    }

    pub fn issued_at(&self) -> &ClockTime {
        &self.issued_at
    }

    /// Buses in the order the server listed them. May be empty.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn accessible_buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.iter().filter(|b| b.is_accessible())
    }
}
