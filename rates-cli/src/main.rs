//! Currency Converter CLI
//!
//! Converts amounts locally, fetching rates through the shared rate cache.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use rates_client::ExchangeRateApiClient;
use rates_hex::{ConversionService, CurrencyValidator, RateCache, RateCacheConfig, StaticRateProvider};
use rates_types::{ConvertRequest, OutputFormat, RateLookupPort};

#[derive(Parser)]
#[command(name = "convert")]
#[command(author, version, about = "Currency converter with cached exchange rates", long_about = None)]
struct Cli {
    /// Where exchange rates come from
    #[arg(long, env = "RATE_PROVIDER", value_enum, default_value = "static")]
    provider: Provider,

    /// Base URL of the upstream rates API (http provider only)
    #[arg(long, env = "RATES_API_URL", default_value = rates_client::DEFAULT_BASE_URL)]
    api_url: String,

    /// How long a fetched rate is reused, in seconds
    #[arg(long, env = "CACHE_FRESHNESS_SECS", default_value_t = 3600)]
    freshness_secs: u64,

    /// Upper bound on a single rate lookup in milliseconds (0 = no limit)
    #[arg(long, env = "LOOKUP_TIMEOUT_MS", default_value_t = 5000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Provider {
    Static,
    Http,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Plain,
    Fancy,
}

impl From<Style> for OutputFormat {
    fn from(style: Style) -> Self {
        match style {
            Style::Plain => OutputFormat::Plain,
            Style::Fancy => OutputFormat::Fancy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: f64,
        /// Source currency (e.g. USD)
        from: String,
        /// Target currency (e.g. EUR)
        to: String,
        #[arg(long, value_enum, default_value = "plain")]
        format: Style,
        /// Digits after the decimal point (0-10)
        #[arg(long)]
        precision: Option<u8>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the exchange rate for a pair
    Rate { from: String, to: String },
    /// List supported currencies
    Currencies,
    /// Prompt for conversions until an empty line or EOF
    Interactive,
}

type Service = ConversionService<Arc<dyn RateLookupPort>>;

fn build_service(cli: &Cli) -> Service {
    let lookup: Arc<dyn RateLookupPort> = match cli.provider {
        Provider::Static => Arc::new(StaticRateProvider::new()),
        Provider::Http => Arc::new(ExchangeRateApiClient::new(&cli.api_url)),
    };

    let lookup_timeout = match cli.timeout_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };
    let cache = Arc::new(RateCache::with_config(RateCacheConfig {
        freshness: Duration::from_secs(cli.freshness_secs),
        lookup_timeout,
    }));

    ConversionService::new(cache, lookup)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let service = build_service(&cli);

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            format,
            precision,
            json,
        } => {
            let resp = service
                .convert(ConvertRequest {
                    from,
                    to,
                    amount,
                    format: format.into(),
                    precision,
                })
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                println!("{}", resp.formatted);
            }
        }

        Commands::Rate { from, to } => {
            let rate = service.rate(&from, &to).await?;
            println!("1 {} = {} {}", rate.from, rate.rate, rate.to);
        }

        Commands::Currencies => {
            for currency in service.supported_currencies() {
                println!("{}  {}  {}", currency.code, currency.symbol, currency.name);
            }
        }

        Commands::Interactive => run_interactive(&service).await?,
    }

    Ok(())
}

async fn run_interactive(service: &Service) -> Result<()> {
    let stdin = io::stdin();
    interactive_loop(service, stdin.lock().lines()).await?;
    Ok(())
}

/// Console conversion loop sharing one cache across iterations.
///
/// Returns the number of conversions that produced a result.
async fn interactive_loop<I>(service: &Service, mut lines: I) -> Result<usize>
where
    I: Iterator<Item = io::Result<String>>,
{
    let validator = CurrencyValidator::default();
    let mut completed = 0;

    println!("=== Currency converter ===");
    println!("Leave a field empty to quit.");

    loop {
        let Some(from) = prompt_currency(&mut lines, &validator, "Source currency (e.g. USD): ")?
        else {
            break;
        };
        let Some(to) = prompt_currency(&mut lines, &validator, "Target currency (e.g. EUR): ")?
        else {
            break;
        };
        let Some(amount) = prompt_amount(&mut lines, &validator)? else {
            break;
        };

        println!("Output format:");
        println!("1: Plain");
        println!("2: Fancy");
        let format = match prompt(&mut lines, "Choice [1]: ")?.as_deref() {
            Some("2") => OutputFormat::Fancy,
            _ => OutputFormat::Plain,
        };

        let precision = match prompt(&mut lines, "Decimal places [2]: ")? {
            Some(raw) if !raw.is_empty() => match raw.parse::<u8>() {
                Ok(p) => Some(p),
                Err(_) => {
                    println!("Invalid choice, using 2 decimal places.");
                    None
                }
            },
            _ => None,
        };

        let req = ConvertRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            format,
            precision,
        };
        match service.convert(req).await {
            Ok(resp) => {
                completed += 1;
                println!("{}", resp.formatted);
            }
            Err(e) => println!("Error: {}", e),
        }
        println!();
    }

    Ok(completed)
}

/// Prints `label` and reads one trimmed line. `None` on EOF.
fn prompt<I>(lines: &mut I, label: &str) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", label);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn prompt_currency<I>(
    lines: &mut I,
    validator: &CurrencyValidator,
    label: &str,
) -> Result<Option<rates_types::Currency>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let Some(input) = prompt(lines, label)? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(None);
        }
        match validator.validate_currency(&input) {
            Ok(currency) => return Ok(Some(currency)),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn prompt_amount<I>(lines: &mut I, validator: &CurrencyValidator) -> Result<Option<f64>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let Some(input) = prompt(lines, "Amount: ")? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<f64>() {
            Ok(amount) => match validator.validate_amount(amount) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => println!("Error: {}", e),
            },
            Err(_) => println!("Error: enter a numeric value"),
        }
    }
}
