//! GiroCheckout CLI
//!
//! Command-line interface for the GiroCheckout gateway client. Account
//! settings come from `GIRO_*` environment variables (or a `.env` file);
//! per-call options come from flags. `giro sign <operation>` prints the
//! signed request instead of submitting it.

mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use giro_gateway::{GatewayClient, GatewayError, SignedRequest};
use giro_http::HttpTransport;
use giro_types::{
    Outcome, Pkn, ReferenceToken, StartOptions, TransactionOverrides, TransactionType, Transport,
    domain::gateway,
};

#[derive(Parser)]
#[command(name = "giro")]
#[command(author, version, about = "GiroCheckout gateway CLI client", long_about = None)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true, env = "GIRO_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Request(RequestCommand),
    /// Print a signed request without submitting it
    Sign {
        #[command(subcommand)]
        request: RequestCommand,
    },
    /// Show gateway metadata
    Info,
}

#[derive(Subcommand)]
enum RequestCommand {
    /// Open a transaction
    Start {
        /// Transaction type (AUTH or SALE)
        #[arg(long = "type", default_value = "AUTH")]
        transaction_type: TransactionType,
        /// Payment page locale
        #[arg(long, default_value = "de")]
        locale: String,
        /// Use the mobile-optimized payment page
        #[arg(long)]
        mobile: bool,
        /// Stored payment reference, or "create" to register a new one
        #[arg(long, default_value = "create")]
        pkn: String,
        /// Mark the payment as recurring
        #[arg(long)]
        recurring: bool,
        /// URL the customer returns to after payment
        #[arg(long)]
        url_redirect: String,
        /// URL notified of the payment result
        #[arg(long)]
        url_notify: String,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Settle an authorized transaction
    Capture {
        /// Reference returned by start
        reference: String,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Refund a settled transaction
    Refund {
        /// Reference returned by start
        reference: String,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Cancel an authorized transaction
    Void {
        /// Reference returned by start
        reference: String,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// A parsed gateway operation.
#[derive(Debug)]
enum Call {
    Start(StartOptions),
    Capture(ReferenceToken, TransactionOverrides),
    Refund(ReferenceToken, TransactionOverrides),
    Void(ReferenceToken, TransactionOverrides),
}

impl From<RequestCommand> for Call {
    fn from(command: RequestCommand) -> Self {
        match command {
            RequestCommand::Start {
                transaction_type,
                locale,
                mobile,
                pkn,
                recurring,
                url_redirect,
                url_notify,
                overrides,
            } => Call::Start(StartOptions {
                transaction_type,
                locale,
                mobile,
                pkn: Pkn::from(pkn.as_str()),
                recurring,
                url_redirect,
                url_notify,
                overrides: overrides.into(),
            }),
            RequestCommand::Capture {
                reference,
                overrides,
            } => Call::Capture(reference.into(), overrides.into()),
            RequestCommand::Refund {
                reference,
                overrides,
            } => Call::Refund(reference.into(), overrides.into()),
            RequestCommand::Void {
                reference,
                overrides,
            } => Call::Void(reference.into(), overrides.into()),
        }
    }
}

impl Call {
    /// Builds the signed request offline.
    fn prepare<T: Transport>(
        &self,
        client: &GatewayClient<T>,
    ) -> Result<SignedRequest, GatewayError> {
        match self {
            Call::Start(options) => client.prepare_start(options),
            Call::Capture(reference, overrides) => client.prepare_capture(reference, overrides),
            Call::Refund(reference, overrides) => client.prepare_refund(reference, overrides),
            Call::Void(reference, overrides) => client.prepare_void(reference, overrides),
        }
    }

    async fn submit<T: Transport>(
        &self,
        client: &GatewayClient<T>,
    ) -> Result<Outcome, GatewayError> {
        match self {
            Call::Start(options) => client.start(options).await,
            Call::Capture(reference, overrides) => client.capture_with(reference, overrides).await,
            Call::Refund(reference, overrides) => client.refund_with(reference, overrides).await,
            Call::Void(reference, overrides) => client.void_with(reference, overrides).await,
        }
    }
}

/// Per-call replacements for the configured transaction defaults.
#[derive(Args)]
struct OverrideArgs {
    #[arg(long)]
    merchant_tx_id: Option<String>,
    /// Amount in cents
    #[arg(long)]
    amount: Option<i64>,
    #[arg(long)]
    currency: Option<String>,
    #[arg(long)]
    purpose: Option<String>,
}

impl From<OverrideArgs> for TransactionOverrides {
    fn from(args: OverrideArgs) -> Self {
        TransactionOverrides {
            merchant_tx_id: args.merchant_tx_id,
            amount: args.amount,
            currency: args.currency,
            purpose: args.purpose,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,giro_gateway=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn print_info() -> Result<()> {
    let info = serde_json::json!({
        "display_name": gateway::DISPLAY_NAME,
        "homepage_url": gateway::HOMEPAGE_URL,
        "live_url": gateway::LIVE_URL,
        "test_url": gateway::TEST_URL,
        "supported_countries": gateway::SUPPORTED_COUNTRIES,
        "default_currency": gateway::DEFAULT_CURRENCY,
        "money_format": gateway::MONEY_FORMAT,
        "supported_card_brands": gateway::SUPPORTED_CARD_BRANDS,
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn build_client() -> Result<GatewayClient<HttpTransport>> {
    let config = config::from_env()?;
    tracing::info!(
        merchant_id = config.credentials.merchant_id(),
        base_url = config.base_url(),
        test = config.is_test(),
        "Loaded gateway configuration"
    );
    Ok(GatewayClient::new(config, HttpTransport::new()?))
}

fn request_preview<T: Transport>(
    client: &GatewayClient<T>,
    request: &SignedRequest,
) -> serde_json::Value {
    serde_json::json!({
        "url": client.config().endpoint(request.action()),
        "fields": request.fields(),
    })
}

fn print_outcome(outcome: &Outcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Request(command) => {
            let client = build_client()?;
            print_outcome(&Call::from(command).submit(&client).await?)?;
        }
        Commands::Sign { request } => {
            let client = build_client()?;
            let signed = Call::from(request).prepare(&client)?;
            let preview = request_preview(&client, &signed);
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Commands::Info => print_info()?,
    }

    Ok(())
}
