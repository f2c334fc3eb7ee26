//! quill-setup - Configure the generation provider and credentials

use anyhow::Result;
use clap::{Parser, Subcommand};
use libquillcast::logging::{LogFormat, LoggingConfig};
use libquillcast::service::QuillcastService;
use libquillcast::ProviderKind;

#[derive(Parser, Debug)]
#[command(name = "quill-setup")]
#[command(version)]
#[command(about = "Configure the generation provider and credentials", long_about = "\
quill-setup - Configure the generation provider and credentials

DESCRIPTION:
    quill-setup manages the persisted Quillcast settings: which AI provider
    generates content, the API keys for the real backends, and the opaque
    access token handed to the publishing platform. Without any configuration
    the mock provider is used, which needs no keys.

USAGE EXAMPLES:
    # Inspect current settings (secrets are not printed)
    quill-setup show

    # Switch to OpenAI and store its key
    quill-setup provider openai
    quill-setup key openai sk-...

    # Store or clear the publishing access token
    quill-setup token AQX...
    quill-setup token --clear
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show current settings (without secrets)
    Show {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Select the generation provider: mock, openai, gemini, deepseek
    Provider {
        /// Provider name
        name: String,
    },

    /// Store an API key for a provider
    Key {
        /// Provider name the key belongs to
        provider: String,

        /// The secret key
        secret: String,
    },

    /// Store the publishing-platform access token
    Token {
        /// The opaque token; omit together with --clear to remove it
        secret: Option<String>,

        /// Remove the stored token
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "error" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let service = QuillcastService::new().await?;
    let mut settings = service.store().read_settings().await?;

    match cli.command {
        Commands::Show { format } => {
            if format == "json" {
                // Redact secrets before printing
                let configured: Vec<&str> = settings.api_keys.keys().map(String::as_str).collect();
                let view = serde_json::json!({
                    "provider": settings.provider.as_str(),
                    "configured_keys": configured,
                    "access_token_set": settings.access_token.is_some(),
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("provider:     {}", settings.provider);
                if settings.api_keys.is_empty() {
                    println!("api keys:     none configured");
                } else {
                    let mut names: Vec<&str> =
                        settings.api_keys.keys().map(String::as_str).collect();
                    names.sort_unstable();
                    println!("api keys:     {}", names.join(", "));
                }
                println!(
                    "access token: {}",
                    if settings.access_token.is_some() {
                        "set"
                    } else {
                        "not set"
                    }
                );
            }
            return Ok(());
        }

        Commands::Provider { name } => {
            let kind: ProviderKind = name
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            settings.provider = kind;
            service.store().write_settings(&settings).await?;
            println!("provider set to {}", kind);

            if kind != ProviderKind::Mock && settings.api_key(kind.as_str()).is_none() {
                eprintln!(
                    "note: no API key stored for {kind} yet; add one with `quill-setup key {kind} <secret>`"
                );
            }
        }

        Commands::Key { provider, secret } => {
            // Validate the name so typos don't silently configure nothing
            let kind: ProviderKind = provider
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            if kind == ProviderKind::Mock {
                anyhow::bail!("the mock provider does not take an API key");
            }

            settings.api_keys.insert(kind.as_str().to_string(), secret);
            service.store().write_settings(&settings).await?;
            println!("stored API key for {}", kind);
        }

        Commands::Token { secret, clear } => {
            if clear {
                settings.access_token = None;
                service.store().write_settings(&settings).await?;
                println!("access token cleared");
            } else if let Some(secret) = secret {
                settings.access_token = Some(secret);
                service.store().write_settings(&settings).await?;
                println!("access token stored");
            } else {
                anyhow::bail!("provide a token value or --clear");
            }
        }
    }

    Ok(())
}
