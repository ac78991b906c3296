use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nagira::{Format, OutputMode};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but unreserved characters; `.` included so a name cannot
/// be mistaken for a format suffix.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

#[derive(Parser)]
#[command(name = "nagira-cli")]
#[command(about = "Query a nagira monitoring API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4567")]
    url: String,

    /// Response format (json, yaml, xml); server default when omitted.
    #[arg(short, long)]
    format: Option<Format>,

    /// Output mode (full, list, state).
    #[arg(short, long, default_value = "full")]
    mode: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configured objects, optionally of one class or a single object
    Objects { class: Option<String>, name: Option<String> },
    /// Status of every host or of a single host
    Status { host: Option<String> },
    /// Service status of a host, optionally a single service
    Services { host: String, service: Option<String> },
}

impl Cli {
    fn request_path(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        match &self.command {
            Commands::Objects { class, name } => {
                segments.push("objects".into());
                segments.extend(class.iter().chain(name.iter()).map(|s| encode(s)));
            }
            Commands::Status { host } => {
                segments.push("status".into());
                segments.extend(host.iter().map(|s| encode(s)));
            }
            Commands::Services { host, service } => {
                segments.extend(["status".to_string(), encode(host), "services".to_string()]);
                segments.extend(service.iter().map(|s| encode(s)));
            }
        }
        if self.mode != OutputMode::Full {
            segments.push(self.mode.as_str().to_string());
        }

        let mut path = format!("/{}", segments.join("/"));
        if let Some(format) = self.format {
            path.push('.');
            path.push_str(format.extension());
        }
        path
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.request_path());
    let res = client.get(&url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", text.trim_end());
    Ok(ExitCode::SUCCESS)
}
