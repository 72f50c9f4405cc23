//! minireq CLI
//!
//! Usage:
//!   mrq get <URL>                       Fetch a URL and print the body
//!   mrq get <URL> -H 'X-Test: 1'        Add a request header (repeatable)
//!   mrq get <URL> --cookie 'id=42'      Send a cookie
//!   mrq get <URL> --param q=rust        Append an encoded query parameter
//!   mrq get <URL> --json                Print the whole response as JSON
//!   mrq send MKCOL <URL>                Send any supported method
//!   mrq encode <TEXT>                   Percent-encode text
//!   mrq decode <TEXT>                   Percent-decode text

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use minireq_http::{HttpMethod, Request, Transfer, TransferConfig};

#[derive(Parser)]
#[command(name = "mrq")]
#[command(about = "minireq one-shot HTTP client", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform a GET request
    Get {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Perform a request with an explicit method
    Send {
        /// HTTP method (GET, POST, PUT, DELETE, HEAD, TRACE, OPTIONS, LOCK, MKCOL, COPY, MOVE)
        method: HttpMethod,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Percent-encode text
    Encode {
        text: String,
    },

    /// Percent-decode text
    Decode {
        text: String,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Target URL
    url: String,

    /// Request header as 'Name: value'
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Cookie string ('name=value; other=value')
    #[arg(long)]
    cookie: Option<String>,

    /// Query parameter as 'name=value'
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Abort if the body grows past this many bytes
    #[arg(long)]
    max_body_bytes: Option<usize>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

impl RequestArgs {
    fn into_parts(self, method: HttpMethod) -> (Transfer, Request, bool) {
        let mut request = Request::new(method, self.url);
        for (name, value) in self.headers {
            request = request.header(name, value);
        }
        for (name, value) in self.params {
            request = request.param(name, value);
        }
        if let Some(cookie) = self.cookie {
            request = request.cookie(cookie);
        }

        let mut config = TransferConfig::new();
        if let Some(max) = self.max_body_bytes {
            config = config.max_body_bytes(max);
        }

        (Transfer::with_config(config), request, self.json)
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected 'name=value', got '{}'", raw))?;
    Ok((name.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Get { request } => {
            let (transfer, request, json) = request.into_parts(HttpMethod::Get);
            exit_on_failure(run(&transfer, &request, json)?);
        }

        Commands::Send { method, request } => {
            let (transfer, request, json) = request.into_parts(method);
            exit_on_failure(run(&transfer, &request, json)?);
        }

        Commands::Encode { text } => {
            println!("{}", minireq_common::encode(&text));
        }

        Commands::Decode { text } => {
            let decoded = minireq_common::decode(&text)
                .with_context(|| format!("Failed to decode '{}'", text))?;
            println!("{}", decoded);
        }
    }

    Ok(())
}

fn exit_on_failure(exit_code: i32) {
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Run one request and print it; returns the process exit code
fn run(transfer: &Transfer, request: &Request, json: bool) -> Result<i32> {
    tracing::debug!(method = %request.method, url = %request.url, json, "Running request");
    let response = transfer.request(request);

    if json {
        let rendered =
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        println!("{}", rendered);
    } else if response.reason.is_empty() {
        eprintln!("{} ({:.3?})", response.status_code, response.elapsed_duration());
        print!("{}", response.text());
    } else {
        tracing::debug!(status = response.status_code, "Request failed");
        eprintln!("error: {}", response.reason);
    }

    Ok(if response.reason.is_empty() { 0 } else { 1 })
}

/// Initialize logging based on log level
fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok(); // Ignore error if already initialized

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Test: 1").unwrap(),
            ("X-Test".to_string(), "1".to_string())
        );
        assert_eq!(
            parse_header("Accept:text/plain").unwrap(),
            ("Accept".to_string(), "text/plain".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("q=rust lang").unwrap(),
            ("q".to_string(), "rust lang".to_string())
        );
        assert_eq!(
            parse_param("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_param("flag").is_err());
    }

    #[test]
    fn test_cli_get_arguments() {
        let cli = Cli::try_parse_from([
            "mrq",
            "get",
            "http://example.com/",
            "-H",
            "X-Test: 1",
            "--param",
            "q=rust",
            "--cookie",
            "id=42",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "warn");
        let Commands::Get { request } = cli.command else {
            panic!("expected get command");
        };
        assert_eq!(request.max_body_bytes, None);

        let (_, request, json) = request.into_parts(HttpMethod::Get);
        assert!(json);
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://example.com/");
        assert_eq!(request.header_lines(), vec!["X-Test:1"]);
        assert_eq!(request.params.get("q").map(String::as_str), Some("rust"));
        assert_eq!(request.effective_cookie(), Some("id=42"));
    }

    #[test]
    fn test_cli_send_parses_method() {
        let cli = Cli::try_parse_from(["mrq", "send", "mkcol", "http://example.com/dav/"]).unwrap();
        let Commands::Send { method, request } = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(method, HttpMethod::Mkcol);

        let (_, request, json) = request.into_parts(method);
        assert_eq!(request.method, HttpMethod::Mkcol);
        assert!(!json);
    }

    #[test]
    fn test_cli_send_rejects_unknown_method() {
        assert!(Cli::try_parse_from(["mrq", "send", "PATCH", "http://x/"]).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_header() {
        assert!(Cli::try_parse_from(["mrq", "get", "http://x/", "-H", "broken"]).is_err());
    }

    #[test]
    fn test_run_get_invalid_url_exit_code() {
        let code = run(&Transfer::new(), &Request::get("not a url"), true).unwrap();
        assert_eq!(code, 1);
    }
}
