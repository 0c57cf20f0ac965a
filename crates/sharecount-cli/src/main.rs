//! ShareCount CLI - look up or serve social share counts

mod server;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sharecount::{Provider, ShareCountResponse, ShareCounter};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for count subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Bare count
    #[default]
    Text,
    /// JSON object with url and count
    Json,
}

/// ShareCount - social share counts for a URL
#[derive(Parser, Debug)]
#[command(name = "sharecount")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    fetch: FetchArgs,
}

/// Options applied to every provider request
#[derive(Args, Debug)]
struct FetchArgs {
    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    /// Maximum accepted provider response size in bytes
    #[arg(long, global = true, default_value_t = 1024 * 1024)]
    max_body_bytes: usize,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one share count and print it
    Count {
        /// Provider: googlePlus, stumbleupon, pinterest, vkontakte or reddit
        provider: Provider,

        /// Target page URL
        url: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Serve `GET ?type=<provider>&url=<target>` over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8000")]
        listen: SocketAddr,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let counter = build_counter(&cli.fetch);

    match cli.command {
        Commands::Count {
            provider,
            url,
            output,
        } => {
            run_count(&counter, provider, &url, output).await;
        }
        Commands::Serve { listen } => {
            if let Err(e) = server::run_server(listen, counter).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn build_counter(args: &FetchArgs) -> ShareCounter {
    let mut builder = ShareCounter::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .max_body_bytes(args.max_body_bytes);

    if let Some(ref ua) = args.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    builder.build()
}

async fn run_count(counter: &ShareCounter, provider: Provider, url: &str, output: OutputFormat) {
    match counter.count(provider, url).await {
        Ok(response) => writeln_safe(&format_response(&response, output)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn format_response(response: &ShareCountResponse, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => response.count.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(response).unwrap_or_else(|e| {
            eprintln!("Error serializing response: {}", e);
            std::process::exit(1);
        }),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text() {
        let response = ShareCountResponse::new("https://example.com", 42);
        assert_eq!(format_response(&response, OutputFormat::Text), "42");
    }

    #[test]
    fn test_format_json() {
        let response = ShareCountResponse::new("https://example.com", 7);
        let output = format_response(&response, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["count"], 7);
    }

    #[test]
    fn test_parse_count_command() {
        let cli = Cli::try_parse_from([
            "sharecount",
            "count",
            "pinterest",
            "http://www.stopfake.org",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.fetch.timeout_secs, 3);
        match cli.command {
            Commands::Count { provider, url, .. } => {
                assert_eq!(provider, Provider::Pinterest);
                assert_eq!(url, "http://www.stopfake.org");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["sharecount", "count", "myspace", "http://x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["sharecount", "serve"]).unwrap();
        assert_eq!(cli.fetch.max_body_bytes, 1024 * 1024);
        assert!(cli.fetch.user_agent.is_none());
        match cli.command {
            Commands::Serve { listen } => assert_eq!(listen.port(), 8000),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_build_counter_applies_flags() {
        let counter = build_counter(&FetchArgs {
            timeout_secs: 4,
            max_body_bytes: 2048,
            user_agent: Some("ua/1".to_string()),
        });
        let options = counter.options();
        assert_eq!(options.timeout, Duration::from_secs(4));
        assert_eq!(options.max_body_bytes, 2048);
        assert_eq!(options.user_agent.as_deref(), Some("ua/1"));
    }
}
