//! quill-post - Draft, generate, and schedule social posts

use std::io::Read;
use std::path::Path;

use clap::Parser;
use libquillcast::logging::{LogFormat, LoggingConfig};
use libquillcast::service::{PostDraft, QuillcastService};
use libquillcast::{scheduling, MediaFile, Post, QuillcastError, Result};

#[derive(Parser, Debug)]
#[command(name = "quill-post")]
#[command(version)]
#[command(about = "Draft, generate, and schedule social posts", long_about = "\
quill-post - Draft, generate, and schedule social posts

DESCRIPTION:
    quill-post composes posts in the local Quillcast queue. Content comes from
    the command line, from stdin, or from the configured AI provider with
    --generate. Posts are saved as drafts or committed to the schedule;
    publishing itself is a manual hand-off.

USAGE EXAMPLES:
    # Save a draft
    quill-post --topic \"Rust\" --draft \"Working on a new crate...\"

    # Generate content and schedule it at the suggested time
    quill-post --topic \"AI Automation\" --generate

    # Schedule piped content for tomorrow morning
    echo \"Release day!\" | quill-post --schedule \"tomorrow 9am\"

    # Attach an image
    quill-post --media ./chart.png --schedule 2h \"Numbers are in\"

CONFIGURATION:
    Configuration file: ~/.config/quillcast/config.toml
    Database location:  ~/.local/share/quillcast/queue.db

    Override with environment variables:
        QUILLCAST_CONFIG    - Path to config file
        QUILLCAST_DB_PATH   - Path to database file

EXIT CODES:
    0 - Success
    1 - Generation or storage failure
    2 - Configuration error (e.g. missing API key)
    3 - Invalid input
")]
struct Cli {
    /// Content to post (reads from stdin if not provided and not generating)
    content: Option<String>,

    /// Topic driving generation and display
    #[arg(short, long, default_value = "")]
    topic: String,

    /// Generate content and a suggested time with the configured AI provider
    #[arg(short, long)]
    generate: bool,

    /// Extra free-text context for the generator
    #[arg(short, long)]
    context: Option<String>,

    /// Attach a media file (image, video, or document)
    #[arg(short, long)]
    media: Option<String>,

    /// Save as draft instead of scheduling
    #[arg(short, long)]
    draft: bool,

    /// Schedule time (e.g. "2h", "tomorrow 9am"); defaults to 24 hours out
    #[arg(short, long)]
    schedule: Option<String>,

    /// Update an existing post by id instead of creating a new one
    #[arg(short, long)]
    edit: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "error" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let service = QuillcastService::new().await?;

    let mut content = cli.content.clone();
    let mut scheduled_at = match &cli.schedule {
        Some(input) => Some(scheduling::parse_schedule(input)?),
        None => None,
    };
    let mut provider_used = None;

    if cli.generate {
        let generation = service
            .composer()
            .generate(&cli.topic, cli.context.as_deref())
            .await?;

        content = Some(generation.content);
        provider_used = Some(generation.provider);
        if scheduled_at.is_none() {
            scheduled_at = Some(generation.suggested_time);
        }
    }

    let content = match content {
        Some(content) => content,
        None => read_stdin()?,
    };

    if content.trim().is_empty() && cli.topic.trim().is_empty() {
        return Err(QuillcastError::Validation(
            "Nothing to save: provide content, a topic, or --generate".to_string(),
        ));
    }

    let media = match &cli.media {
        Some(path) => Some(MediaFile::from_path(Path::new(path))?),
        None => None,
    };

    let draft = PostDraft {
        id: cli.edit.clone(),
        topic: cli.topic.clone(),
        content,
        media,
        scheduled_at,
        provider_used,
    };

    let post = if cli.draft {
        service.composer().save_draft(draft).await?
    } else {
        service.composer().schedule(draft).await?
    };

    print_post(&post, &cli.format)?;
    Ok(())
}

fn read_stdin() -> Result<String> {
    if atty::is(atty::Stream::Stdin) {
        return Err(QuillcastError::Validation(
            "No content provided (pass it as an argument, pipe it in, or use --generate)"
                .to_string(),
        ));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| QuillcastError::Validation(format!("Failed to read stdin: {}", e)))?;

    Ok(buffer.trim_end().to_string())
}

fn print_post(post: &Post, format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(post)
                .map_err(|e| QuillcastError::Validation(format!("JSON encoding failed: {}", e)))?;
            println!("{}", json);
        }
        _ => {
            println!("{} [{}]", post.id, post.status);
            if let Some(when) = post.scheduled_at {
                println!(
                    "scheduled for {}",
                    when.with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M %Z")
                );
            }
            if let Some(provider) = &post.provider_used {
                println!("generated by {}", provider);
            }
        }
    }

    Ok(())
}
