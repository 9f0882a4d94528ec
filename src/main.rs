use clap::{Args, Parser, Subcommand};
use moving_quote_engine::api::{AppState, QuoteCalculationRequest, create_router};
use moving_quote_engine::config::AppConfig;
use moving_quote_engine::error::EngineError;
use moving_quote_engine::telemetry::{self, TelemetryError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "moving-quote-engine",
    about = "Instant move quotes and lead intake for a moving company",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a single move and print the breakdown as JSON
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// 5-digit origin ZIP code
    #[arg(long)]
    origin_zip: String,
    /// 5-digit destination ZIP code
    #[arg(long)]
    destination_zip: String,
    /// Home size: studio, 1bed, 2bed, 3bed, 4bed, 5bed_plus or commercial
    #[arg(long)]
    home_size: String,
    /// Use this distance instead of the configured estimator
    #[arg(long)]
    miles: Option<Decimal>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Quote(args) => run_quote(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let state = AppState::from_settings(&config.quoting)?;
    let app = create_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, "moving quote engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(miles) = args.miles {
        config.quoting.fixed_distance_miles = Some(miles);
    }

    let request = QuoteCalculationRequest {
        origin_zip: args.origin_zip,
        destination_zip: args.destination_zip,
        home_size: args.home_size,
        inventory: None,
    }
    .into_quote_request()
    .map_err(EngineError::from)?;

    let state = AppState::from_settings(&config.quoting)?;
    let outcome = state.calculator().calculate_detailed(&request).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "quote": outcome.breakdown,
            "basis": outcome.basis,
        }))?
    );
    Ok(())
}
