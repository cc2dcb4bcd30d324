//! Olho Vivo command-line client.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use olhovivo::config::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
use olhovivo::domain::ArrivalForecast;
use olhovivo::{Error, OlhoVivo, OlhoVivoConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Query the SPTrans Olho Vivo real-time bus API
#[derive(Parser, Debug)]
#[command(name = "olhovivo", version, about, long_about = None)]
struct Cli {
    /// API token issued by SPTrans
    #[arg(long, env = "OLHOVIVO_TOKEN", hide_env_values = true)]
    token: String,

    /// API root
    #[arg(long, env = "OLHOVIVO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "OLHOVIVO_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Re-logins allowed per call when the session expires
    #[arg(long, env = "OLHOVIVO_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    max_retries: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search lines by number or name
    Lines {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Search stops by name or address
    Stops {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List busways
    Corridors,

    /// Bus positions for every matching line
    Positions {
        /// Line number or name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Arrivals at the first matching stop
    ForecastStop {
        /// Stop name or address
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List operating companies
    Companies,
}

impl Cli {
    fn config(&self) -> OlhoVivoConfig {
        OlhoVivoConfig::new(&self.token)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_retries(self.max_retries)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "olhovivo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let client = OlhoVivo::connect(cli.config()).await?;

    match &cli.command {
        Command::Lines { query } => lines(&client, &query.join(" ")).await,
        Command::Stops { query } => stops(&client, &query.join(" ")).await,
        Command::Corridors => corridors(&client).await,
        Command::Positions { query } => positions(&client, &query.join(" ")).await,
        Command::ForecastStop { query } => forecast_stop(&client, &query.join(" ")).await,
        Command::Companies => companies(&client).await,
    }
}

async fn lines(client: &OlhoVivo, query: &str) -> Result<(), Error> {
    for line in client.seek_lines(query).await? {
        println!("{:>6}  {line}", line.code());
    }
    Ok(())
}

async fn stops(client: &OlhoVivo, query: &str) -> Result<(), Error> {
    for stop in client.seek_bus_stops(query).await? {
        println!(
            "{:>10}  {}  ({})",
            stop.id(),
            stop.name(),
            stop.address().unwrap_or("-")
        );
    }
    Ok(())
}

async fn corridors(client: &OlhoVivo) -> Result<(), Error> {
    for busway in client.get_corridors().await? {
        println!("{:>4}  {}", busway.id(), busway.name());
    }
    Ok(())
}

async fn positions(client: &OlhoVivo, query: &str) -> Result<(), Error> {
    for line in client.seek_lines(query).await? {
        let report = client.get_line_report(&line).await?;
        println!("{line} at {}", report.issued_at());
        for bus in report.buses() {
            let position = bus.position();
            println!(
                "  {}  {:>10.6} {:>10.6}  {}{}",
                bus.id(),
                position.latitude(),
                position.longitude(),
                bus.color(),
                if bus.is_accessible() { "  accessible" } else { "" }
            );
        }
    }
    Ok(())
}

async fn forecast_stop(client: &OlhoVivo, query: &str) -> Result<(), Error> {
    let Some(stop) = client.seek_bus_stops(query).await?.into_iter().next() else {
        println!("no stop matches {query:?}");
        return Ok(());
    };

    let forecast = client.get_arrival_forecast_by_stop(&stop).await?;
    println!("{} ({}) at {}", stop.name(), stop.id(), forecast.issued_at());
    print_forecast(&forecast);
    Ok(())
}

fn print_forecast(forecast: &ArrivalForecast) {
    for group in forecast.groups() {
        match group.subject().as_line() {
            Some(line) => println!("  {line}"),
            None => println!("  {}", group.key()),
        }
        for arrival in group.arrivals() {
            println!("    {}  bus {}", arrival.time(), arrival.bus().id());
        }
    }
}

async fn companies(client: &OlhoVivo) -> Result<(), Error> {
    for company in client.get_companies().await? {
        let area = company.area().map(|a| a.to_string()).unwrap_or_default();
        println!("{area:>2}  {:>4}  {}", company.id(), company.name());
    }
    Ok(())
}
