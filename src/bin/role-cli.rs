use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use role_gateway::http::middleware::X_API_KEY;
use role_gateway::http::Envelope;
use url::Url;

#[derive(Parser)]
#[command(name = "role-cli")]
#[command(about = "Management CLI for the Discord Role Gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:2209")]
    url: String,

    #[arg(short, long, env = "API_SECRET")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant a role to a guild member
    Add { user_id: String, role_id: String },
    /// Revoke a role from a guild member
    Remove { user_id: String, role_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(X_API_KEY, HeaderValue::from_str(&cli.key)?);

    let (action, user_id, role_id) = match &cli.command {
        Commands::Add { user_id, role_id } => ("add", user_id, role_id),
        Commands::Remove { user_id, role_id } => ("remove", user_id, role_id),
    };

    let res = client
        .post(role_url(&cli.url, action, user_id, role_id)?)
        .headers(headers)
        .send()
        .await?;

    print_response(res).await
}

/// `{base}/api/role/{action}/{user_id}/{role_id}` with each segment percent-encoded.
fn role_url(base: &str, action: &str, user_id: &str, role_id: &str) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("gateway URL '{}' cannot carry a path", base))?
        .pop_if_empty()
        .extend(["api", "role", action, user_id, role_id]);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let envelope: Envelope = res.json().await?;

    if envelope.error {
        eprintln!("Error ({}): {}", status, envelope.message);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
