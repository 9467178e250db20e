use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Management CLI for the supply-chain route registry", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check registry system status and counter positions
    Status,
    /// List cities with populated route caches
    Cities,
    /// Fetch the route list for a city
    Routes {
        /// City to look up
        city: String,
        /// Include multi-hop routes
        #[arg(long)]
        multihop: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Cities => {
            let res = client.get(format!("{}/cities", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Routes { city, multihop } => {
            let res = client
                .get(format!("{}/routes/{}", cli.url, city))
                .query(&[("include_multihop", multihop)])
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: registry API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
