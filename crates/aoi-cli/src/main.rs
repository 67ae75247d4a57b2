#![deny(unsafe_code)]

//! AOI CLI: tokenizer, highlighter, completion, and help lookups from the
//! command line.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aoi_config::AppConfig;
use aoi_core::{
    Assistant, Catalogs, CompletionItem, FallbackError, Reply, Theme, Token, WordAtCursor,
    render_highlighted, suggest, tokenize, word_at_cursor,
};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// AOI: editor and help tooling for the AOI teaching language.
#[derive(Parser)]
#[command(name = "aoi", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "aoi.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tokens of a source file.
    Tokenize {
        /// Source file, or `-` for stdin.
        file: PathBuf,

        /// Print tokens as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a source file as highlighted HTML.
    Highlight {
        /// Source file, or `-` for stdin.
        file: PathBuf,

        /// Color theme; defaults to the configured theme.
        #[arg(long)]
        theme: Option<Theme>,
    },

    /// Suggest completions for the word at a cursor position.
    Complete {
        /// Source file, or `-` for stdin.
        file: PathBuf,

        /// Byte offset of the cursor; defaults to end of input.
        #[arg(long)]
        cursor: Option<usize>,
    },

    /// Answer a help question from the knowledge base.
    Ask {
        /// The question, in plain words.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config).await?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tokenize { file, json } => cmd_tokenize(&config, &file, json).await?,
        Commands::Highlight { file, theme } => cmd_highlight(&config, &file, theme).await?,
        Commands::Complete { file, cursor } => cmd_complete(&config, &file, cursor).await?,
        Commands::Ask { question } => cmd_ask(&config, &question.join(" ")).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

async fn cmd_tokenize(config: &AppConfig, file: &Path, json: bool) -> Result<()> {
    let catalogs = Catalogs::load(&config.catalog).await?;
    let source = read_source(file).await?;
    let tokens = tokenize(&source, &catalogs.vocabulary);
    debug!(count = tokens.len(), "tokenized");

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print!("{}", format_tokens(&tokens));
    }
    Ok(())
}

async fn cmd_highlight(config: &AppConfig, file: &Path, theme: Option<Theme>) -> Result<()> {
    let theme = match theme {
        Some(theme) => theme,
        None => config.highlight.theme.parse()?,
    };
    let catalogs = Catalogs::load(&config.catalog).await?;
    let source = read_source(file).await?;
    println!("{}", render_highlighted(&source, &catalogs.vocabulary, theme));
    Ok(())
}

async fn cmd_complete(config: &AppConfig, file: &Path, cursor: Option<usize>) -> Result<()> {
    let catalogs = Catalogs::load(&config.catalog).await?;
    let source = read_source(file).await?;
    let cursor = cursor.unwrap_or(source.len());

    let word = word_at_cursor(&source, cursor)?;
    let items = suggest(&catalogs.completions, &source, cursor)?;
    print!("{}", format_suggestions(&word, &items));
    Ok(())
}

async fn cmd_ask(config: &AppConfig, question: &str) -> Result<()> {
    let catalogs = Catalogs::load(&config.catalog).await?;
    // No fallback transport is wired into the CLI; a miss is reported as
    // needing escalation.
    let assistant = Assistant::from_config(catalogs.knowledge, &config.assistant);

    match assistant.respond(question).await {
        Ok(reply) => print!("{}", format_reply(&reply)),
        Err(FallbackError::NotConfigured) => {
            info!("no predefined answer");
            println!("No predefined answer. This question needs the fallback assistant.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path)
            .await
            .with_context(|| format!("invalid config '{}'", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

async fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        tokio::io::stdin()
            .read_to_string(&mut source)
            .await
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read '{}'", file.display()))
    }
}

fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{:>4}..{:<4} {:<16} {:?}",
            token.span.start,
            token.span.end,
            token.kind.as_str(),
            token.value
        );
    }
    out
}

fn format_suggestions(word: &WordAtCursor<'_>, items: &[&CompletionItem]) -> String {
    let mut out = format!("word: {:?} at {}\n", word.word, word.start);
    if items.is_empty() {
        out.push_str("no suggestions\n");
    }
    for item in items {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {}",
            item.label,
            item.kind.as_str(),
            item.detail
        );
    }
    out
}

fn format_reply(reply: &Reply<'_>) -> String {
    match reply {
        Reply::Empty => String::new(),
        Reply::Predefined(entry) => {
            let mut out = format!("{}\n\n{}\n", entry.question, entry.answer);
            if let Some(code) = &entry.code_example {
                let _ = write!(out, "\n{code}\n");
            }
            out
        }
        Reply::Generated { provider, text } => format!("[{provider}] {text}\n"),
    }
}
