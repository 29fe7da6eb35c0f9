use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use proanalysis::{
    commands::{contact, email::EmailCommand, form::FormArgs},
    environment::{ConfigProvider, Provider},
    storage::Storage,
};
use proanalysis_config::DEFAULT_CONFIG_PATH;
use proanalysis_models::contact::ContactField;
use proanalysis_utils::proanalysis_version;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    paths.extend(cli.config);
    let config = proanalysis_config::load(&paths).context("Failed to load config")?;

    let storage = Storage::open(&config.storage, cli.ephemeral);
    let provider = Provider::new(ConfigProvider::new(&config), storage);

    match cli.command {
        Command::Submit { form } => {
            contact::submit(&provider.contact()?, form.into_form()?).await?
        }
        Command::Validate { form } => contact::validate(&provider.contact()?, &form.into_form()?)?,
        Command::ValidateField { field, value } => {
            contact::validate_field(&provider.contact()?, field, &value)?
        }
        Command::Stats => contact::stats(&provider.contact()?).await?,
        Command::Info => contact::info(&provider.contact()?)?,
        Command::Email { command } => command.invoke(provider).await?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
            if let Some(path) = provider.storage().path().filter(|path| !path.is_file()) {
                println!("Storage file {} does not exist yet", path.display());
            }
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = proanalysis_version())]
struct Cli {
    /// Additional config file, applied on top of the default config
    #[arg(long, global = true, env = "PROANALYSIS_CONFIG")]
    config: Option<PathBuf>,
    /// Keep rate limit and submission records in memory only
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate, sanitize and send a contact form message
    #[command(aliases(["send", "s"]))]
    Submit {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Validate a contact form without sending it
    #[command(aliases(["v"]))]
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Validate a single contact form field
    ValidateField {
        /// One of name, email, subject, message, company or phone
        field: ContactField,
        #[arg(default_value = "")]
        value: String,
    },
    /// Show analytics about recent submissions
    Stats,
    /// Show contact details and subject suggestions
    Info,
    /// Test email deliverability
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
