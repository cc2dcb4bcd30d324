//! High-level Olho Vivo client.
//!
//! Wraps an [`Executor`] with one method per query. Each method builds the
//! endpoint parameters, runs the call and converts the payload to domain
//! types.

use tracing::debug;

use crate::api::{self, Executor, HttpTransport, SessionState, Transport, endpoint};
use crate::config::OlhoVivoConfig;
use crate::domain::{ArrivalForecast, BusLine, BusStop, Busway, Company, LineReport};
use crate::error::Error;

/// Olho Vivo client.
///
/// One client holds one session. It is `Sync`; concurrent calls on the
/// same client are run one at a time.
///
/// # Examples
///
/// ```no_run
/// use olhovivo::{OlhoVivo, OlhoVivoConfig};
///
/// # async fn run() -> Result<(), olhovivo::Error> {
/// let client = OlhoVivo::connect(OlhoVivoConfig::new("my-token")).await?;
///
/// for line in client.seek_lines("8000").await? {
///     let report = client.get_line_report(&line).await?;
///     println!("{line}: {} buses", report.buses().len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OlhoVivo<T = HttpTransport> {
    executor: Executor<T>,
}

impl OlhoVivo<HttpTransport> {
    /// Create a client and log in straight away.
    ///
    /// A bad token fails here rather than on the first query.
    pub async fn connect(config: OlhoVivoConfig) -> Result<Self, Error> {
        let client = Self::new(config)?;
        client.executor.login().await?;
        Ok(client)
    }

    /// Create a client without logging in. The first query logs in.
    pub fn new(config: OlhoVivoConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config.base_url, config.timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> OlhoVivo<T> {
    /// Create a client over a custom transport.
    ///
    /// Only the token and retry bound are taken from `config`; the
    /// transport is responsible for the base URL and timeouts.
    pub fn with_transport(transport: T, config: OlhoVivoConfig) -> Self {
        Self {
            executor: Executor::new(transport, config.token, config.max_retries),
        }
    }

    /// Current session state.
    pub async fn session_state(&self) -> SessionState {
        self.executor.state().await
    }

    /// Search lines by number or name, e.g. `"8000"` or `"Lapa"`.
    ///
    /// Both directions of a line come back as separate entries.
    pub async fn seek_lines(&self, query: &str) -> Result<Vec<BusLine>, Error> {
        let raw = self
            .executor
            .execute(endpoint::LINE_SEARCH, &[("termosBusca", query)])
            .await?;
        Ok(api::convert_lines(&raw)?)
    }

    /// Search stops by name or address.
    pub async fn seek_bus_stops(&self, query: &str) -> Result<Vec<BusStop>, Error> {
        let raw = self
            .executor
            .execute(endpoint::STOP_SEARCH, &[("termosBusca", query)])
            .await?;
        Ok(api::convert_stops(endpoint::STOP_SEARCH, &raw)?)
    }

    /// Stops served by a line.
    pub async fn seek_bus_stops_by_line(&self, line: &BusLine) -> Result<Vec<BusStop>, Error> {
        let raw = self
            .executor
            .execute(endpoint::STOPS_BY_LINE, &[("codigoLinha", line.code())])
            .await?;
        Ok(api::convert_stops(endpoint::STOPS_BY_LINE, &raw)?)
    }

    /// Stops along a busway.
    pub async fn seek_bus_stops_by_busway(&self, busway: &Busway) -> Result<Vec<BusStop>, Error> {
        let raw = self
            .executor
            .execute(endpoint::STOPS_BY_BUSWAY, &[("codigoCorredor", busway.id())])
            .await?;
        Ok(api::convert_stops(endpoint::STOPS_BY_BUSWAY, &raw)?)
    }

    /// All busways (dedicated bus corridors).
    pub async fn get_corridors(&self) -> Result<Vec<Busway>, Error> {
        let raw = self.executor.execute(endpoint::BUSWAYS, &[]).await?;
        Ok(api::convert_busways(&raw)?)
    }

    /// Operating companies, grouped by area in server order.
    pub async fn get_companies(&self) -> Result<Vec<Company>, Error> {
        let raw = self.executor.execute(endpoint::COMPANIES, &[]).await?;
        Ok(api::convert_companies(&raw)?)
    }

    /// Current position of every bus running a line.
    pub async fn get_line_report(&self, line: &BusLine) -> Result<LineReport, Error> {
        let raw = self
            .executor
            .execute(endpoint::POSITIONS, &[("codigoLinha", line.code())])
            .await?;
        let report = api::convert_line_report(&raw)?;
        debug!(line = line.code(), buses = report.buses().len(), "line report");
        Ok(report)
    }

    /// Arrivals of one line at one stop, keyed by the line.
    pub async fn get_arrival_forecast_by_line_and_stop(
        &self,
        line: &BusLine,
        stop: &BusStop,
    ) -> Result<ArrivalForecast, Error> {
        let raw = self
            .executor
            .execute(
                endpoint::FORECAST,
                &[("codigoParada", stop.id()), ("codigoLinha", line.code())],
            )
            .await?;
        Ok(api::convert_line_at_stop_forecast(&raw, line)?)
    }

    /// Arrivals of a line at each of its stops, keyed by stop.
    pub async fn get_arrival_forecast_by_line(
        &self,
        line: &BusLine,
    ) -> Result<ArrivalForecast, Error> {
        let raw = self
            .executor
            .execute(endpoint::FORECAST_BY_LINE, &[("codigoLinha", line.code())])
            .await?;
        Ok(api::convert_line_forecast(&raw)?)
    }

    /// Arrivals of every line serving a stop, keyed by line.
    pub async fn get_arrival_forecast_by_stop(
        &self,
        stop: &BusStop,
    ) -> Result<ArrivalForecast, Error> {
        let raw = self
            .executor
            .execute(endpoint::FORECAST_BY_STOP, &[("codigoParada", stop.id())])
            .await?;
        Ok(api::convert_stop_forecast(&raw)?)
    }
}
