//! quill-queue - Manage the local post queue

use clap::{Parser, Subcommand};
use libquillcast::logging::{LogFormat, LoggingConfig};
use libquillcast::service::QuillcastService;
use libquillcast::{Post, PostStatus, QuillcastError, Result};

#[derive(Parser, Debug)]
#[command(name = "quill-queue")]
#[command(version)]
#[command(about = "Manage the local post queue", long_about = "\
quill-queue - Manage the local post queue

DESCRIPTION:
    quill-queue lists and prunes posts in the Quillcast queue. Posts are
    created with quill-post; deleting here is the only way one leaves the
    collection.

USAGE EXAMPLES:
    # List everything
    quill-queue list

    # Only drafts, as JSON
    quill-queue list --status draft --format json

    # Inspect one post
    quill-queue show <POST_ID>

    # Remove a post
    quill-queue delete <POST_ID>

EXIT CODES:
    0 - Success
    1 - Storage failure
    2 - Configuration error
    3 - Invalid input (unknown id or status)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List posts in the queue
    List {
        /// Filter by status: draft, scheduled, posted, failed
        #[arg(short, long)]
        status: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show a single post
    Show {
        /// Post id
        id: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: String,
    },
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

    match cli.command {
        Commands::List { status, format } => {
            let status = match status {
                Some(raw) => Some(
                    raw.parse::<PostStatus>()
                        .map_err(QuillcastError::Validation)?,
                ),
                None => None,
            };

            let posts = service.queue().list(status).await?;
            print_posts(&posts, &format)?;
        }

        Commands::Show { id, format } => {
            let post = service
                .queue()
                .get(&id)
                .await?
                .ok_or_else(|| QuillcastError::Validation(format!("Post not found: {}", id)))?;

            print_post(&post, &format)?;
        }

        Commands::Delete { id } => {
            service.queue().delete(&id).await?;
            println!("deleted {}", id);
        }
    }

    Ok(())
}

fn print_posts(posts: &[Post], format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", to_json(posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("queue is empty");
        return Ok(());
    }

    for post in posts {
        println!("{}  {:9}  {}", post.id, post.status.as_str(), summary(post));
    }

    Ok(())
}

fn print_post(post: &Post, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", to_json(post)?);
        return Ok(());
    }

    println!("id:        {}", post.id);
    println!("status:    {}", post.status);
    if !post.topic.is_empty() {
        println!("topic:     {}", post.topic);
    }
    if let Some(when) = post.scheduled_at {
        println!(
            "scheduled: {}",
            when.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M %Z")
        );
    }
    if let Some(provider) = &post.provider_used {
        println!("provider:  {}", provider);
    }
    if let Some(media) = &post.media {
        println!("media:     {} ({}, {} bytes)", media.name, media.kind, media.size);
    }
    println!("---");
    println!("{}", post.content);

    Ok(())
}

fn summary(post: &Post) -> String {
    let source = if post.content.is_empty() {
        &post.topic
    } else {
        &post.content
    };

    let line = source.lines().next().unwrap_or_default();
    if line.chars().count() > 60 {
        let truncated: String = line.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        line.to_string()
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| QuillcastError::Validation(format!("JSON encoding failed: {}", e)))
}
