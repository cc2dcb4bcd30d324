//! SPTrans Olho Vivo API client.
//!
//! Olho Vivo serves real-time bus data for São Paulo.
//!
//! Key characteristics of the API:
//! - Access starts with `POST Login/Autenticar?token=...`; the session is
//!   then carried in cookies
//! - Sessions expire without warning. An expired session answers with
//!   `{"Message": "..."}` (usually with a 401) instead of the payload
//! - Search endpoints use long Portuguese keys, real-time endpoints use
//!   one- or two-letter keys
//! - Times are "HH:MM" strings in São Paulo local time

mod convert;
pub mod endpoint;
mod error;
mod session;
mod transport;
mod types;

pub use convert::{
    ConversionError, convert_busways, convert_companies, convert_line_at_stop_forecast,
    convert_line_forecast, convert_line_report, convert_lines, convert_stop_forecast,
    convert_stops,
};
pub use error::{AuthenticationFailure, MalformedResponse, TransportError};
pub use session::{Executor, SessionState};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use types::{
    AreaCompaniesDto, BuswayDto, Code, CompaniesDto, CompanyDto, LineArrivalsDto, LineDto,
    LineForecastDto, PositionsDto, StopArrivalsDto, StopDto, StopForecastDto, StopOnLineDto,
    VehicleDto, VehicleForecastDto,
};
