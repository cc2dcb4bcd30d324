//! Domain types for the Olho Vivo client.
//!
//! Every type here validates its input once, at construction, and is
//! immutable afterwards. Code holding one of these values can trust it.

mod bus;
mod color;
mod company;
mod coordinate;
mod error;
mod forecast;
mod line;
mod report;
mod stop;
mod time;

pub use bus::{Bus, BusId};
pub use color::BusColor;
pub use company::Company;
pub use coordinate::Coordinate;
pub use error::ValidationError;
pub use forecast::{ArrivalForecast, BusForecast, ForecastGroup, ForecastMode, ForecastSubject};
pub use line::{BusLine, BusLineFields, Direction, LineType, SignCode};
pub use report::LineReport;
pub use stop::{BusStop, Busway};
pub use time::ClockTime;
