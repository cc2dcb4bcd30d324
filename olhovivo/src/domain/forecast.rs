//! Arrival forecasts.
//!
//! A forecast groups predicted arrivals under either stops or lines,
//! depending on the query. Groups are keyed by the subject's id string
//! (stop id or line code) and keep the order the server sent them in.

use std::fmt;

use super::bus::Bus;
use super::error::ValidationError;
use super::line::BusLine;
use super::stop::BusStop;
use super::time::ClockTime;

/// A single predicted arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct BusForecast {
    time: ClockTime,
    bus: Bus,
}

impl BusForecast {
    pub fn new(time: ClockTime, bus: Bus) -> Self {
        Self { time, bus }
    }

    /// Validate the time string and build the forecast.
    pub fn parse(time: &str, bus: Bus) -> Result<Self, ValidationError> {
        Ok(Self::new(ClockTime::parse(time)?, bus))
    }

    /// Predicted arrival time.
    pub fn time(&self) -> &ClockTime {
        &self.time
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }
}

/// What the keys of an [`ArrivalForecast`] identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastMode {
    /// Keys are bus stops (forecast for one line along its stops).
    ByStop,
    /// Keys are bus lines (forecast for lines serving a stop).
    ByLine,
}

impl fmt::Display for ForecastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMode::ByStop => f.write_str("by stop"),
            ForecastMode::ByLine => f.write_str("by line"),
        }
    }
}

/// The stop or line a group of arrivals belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastSubject {
    Stop(BusStop),
    Line(BusLine),
}

impl ForecastSubject {
    /// Stable key: the stop id or the line code.
    pub fn key(&self) -> &str {
        match self {
            ForecastSubject::Stop(stop) => stop.id(),
            ForecastSubject::Line(line) => line.code(),
        }
    }

    /// The forecast mode this subject can appear in.
    pub fn mode(&self) -> ForecastMode {
        match self {
            ForecastSubject::Stop(_) => ForecastMode::ByStop,
            ForecastSubject::Line(_) => ForecastMode::ByLine,
        }
    }

    pub fn as_stop(&self) -> Option<&BusStop> {
        match self {
            ForecastSubject::Stop(stop) => Some(stop),
            ForecastSubject::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&BusLine> {
        match self {
            ForecastSubject::Line(line) => Some(line),
            ForecastSubject::Stop(_) => None,
        }
    }
}

/// Arrivals for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastGroup {
    subject: ForecastSubject,
    arrivals: Vec<BusForecast>,
}

impl ForecastGroup {
    pub fn key(&self) -> &str {
        self.subject.key()
    }

    pub fn subject(&self) -> &ForecastSubject {
        &self.subject
    }

    /// Arrivals in server order.
    pub fn arrivals(&self) -> &[BusForecast] {
        &self.arrivals
    }
}

/// Predicted arrivals issued at a point in time.
///
/// # Examples
///
/// ```
/// use olhovivo::domain::{ArrivalForecast, BusStop, ClockTime, ForecastMode, ForecastSubject};
///
/// let stop = BusStop::new("340015329", "AFONSO BRAZ B/C1").unwrap();
/// let forecast = ArrivalForecast::new(
///     ClockTime::parse("14:30").unwrap(),
///     ForecastMode::ByStop,
///     vec![(ForecastSubject::Stop(stop), Vec::new())],
/// )
/// .unwrap();
///
/// assert_eq!(forecast.get("340015329"), Some(&[][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalForecast {
    issued_at: ClockTime,
    mode: ForecastMode,
    groups: Vec<ForecastGroup>,
}

impl ArrivalForecast {
    /// Build a forecast from subject/arrivals pairs.
    ///
    /// Every subject must match `mode`. A subject whose key repeats an
    /// earlier one has its arrivals appended to the earlier group.
    pub fn new(
        issued_at: ClockTime,
        mode: ForecastMode,
        entries: impl IntoIterator<Item = (ForecastSubject, Vec<BusForecast>)>,
    ) -> Result<Self, ValidationError> {
        let mut groups: Vec<ForecastGroup> = Vec::new();

        for (subject, arrivals) in entries {
            if subject.mode() != mode {
                return Err(ValidationError::new(
                    "forecast subject",
                    format!(
                        "{:?} does not belong in a forecast {mode}",
                        subject.key()
                    ),
                ));
            }

            match groups.iter_mut().find(|g| g.key() == subject.key()) {
                Some(existing) => existing.arrivals.extend(arrivals),
                None => groups.push(ForecastGroup { subject, arrivals }),
            }
        }

        Ok(Self {
            issued_at,
            mode,
            groups,
        })
    }

    pub fn issued_at(&self) -> &ClockTime {
        &self.issued_at
    }

    pub fn mode(&self) -> ForecastMode {
        self.mode
    }

    /// Groups in server order.
    pub fn groups(&self) -> &[ForecastGroup] {
        &self.groups
    }

    /// Keys in server order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(ForecastGroup::key)
    }

    /// Arrivals for a stop id or line code.
    pub fn get(&self, key: &str) -> Option<&[BusForecast]> {
        self.group(key).map(ForecastGroup::arrivals)
    }

    /// The stop or line behind a key.
    pub fn subject(&self, key: &str) -> Option<&ForecastSubject> {
        self.group(key).map(ForecastGroup::subject)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group(&self, key: &str) -> Option<&ForecastGroup> {
        self.groups.iter().find(|g| g.key() == key)
    }
}
