//! clusterview - scatter charts for a clustering aggregation API.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use clusterview::{
    ApiClient, ChartArea, ChartSpec, Config, HtmlArea, MemoryArea, Outcome, UiEvent,
    ViewController,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Fetch clustering results and render one scatter chart per dataset.
///
/// Settings are read from ~/.clusterview/config.yaml when present; flags
/// given here take precedence.
#[derive(Parser)]
#[command(name = "clusterview")]
#[command(about = "Scatter charts for clustering API results")]
#[command(version)]
struct Cli {
    /// Config file (default is ~/.clusterview/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Aggregation API base URL
    #[arg(long, global = true)]
    api: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch results for k and render them
    Fetch {
        /// Cluster count, as typed into the k input
        #[arg(short = 'k')]
        k: Option<String>,
        /// Page to write (default from config)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        /// Print chart specs as JSON instead of writing a page
        #[arg(long)]
        json: bool,
    },
    /// Regenerate the server's source data, then fetch and render
    Generate {
        #[arg(short = 'k')]
        k: Option<String>,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Interactive session: type k and press Enter, `f` to fetch, `g` to generate, `q` to quit
    Watch {
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Check that the API is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api) = &cli.api {
        config.api_base_url = api.clone();
    }
    let client = config.api_client()?;

    match cli.command {
        Commands::Fetch { k, json: true, .. } => fetch_json(client, &config, k).await,
        Commands::Fetch { k, output, .. } => {
            let controller = html_controller(client, &config, output, k);
            let outcome = controller.dispatch(UiEvent::FetchClicked).await.outcome;
            finish(&controller, outcome)
        }
        Commands::Generate { k, output } => {
            let controller = html_controller(client, &config, output, k);
            let outcome = controller.dispatch(UiEvent::GenerateClicked).await.outcome;
            finish(&controller, outcome)
        }
        Commands::Watch { output } => watch(html_controller(client, &config, output, None)).await,
        Commands::Health => {
            let body = client.health_check().await?;
            println!("{} is up: {}", client.endpoint(), body.trim());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn html_controller(
    client: ApiClient,
    config: &Config,
    output: Option<PathBuf>,
    k: Option<String>,
) -> ViewController<ApiClient, HtmlArea> {
    let path = output.unwrap_or_else(|| config.output.clone());
    let controller = ViewController::new(client, HtmlArea::new(path))
        .chart_builder(config.chart_builder())
        .default_k(config.default_k);
    if let Some(k) = k {
        controller.set_k_input(k);
    }
    controller
}

async fn fetch_json(client: ApiClient, config: &Config, k: Option<String>) -> Result<()> {
    let controller = ViewController::new(client, MemoryArea::new())
        .chart_builder(config.chart_builder())
        .default_k(config.default_k);
    if let Some(k) = k {
        controller.set_k_input(k);
    }

    match controller.dispatch(UiEvent::FetchClicked).await.outcome {
        Some(Outcome::Rendered { .. }) => {
            let specs: Vec<ChartSpec> = controller
                .with_area(|area| area.charts().iter().map(|c| c.spec.clone()).collect());
            println!("{}", serde_json::to_string_pretty(&specs)?);
            Ok(())
        }
        _ => bail!("{}", clusterview::controller::FETCH_ERROR_MESSAGE),
    }
}

/// Report a one-shot cycle; errors become a non-zero exit
fn finish(controller: &ViewController<ApiClient, HtmlArea>, outcome: Option<Outcome>) -> Result<()> {
    let (path, alerts) =
        controller.with_area(|area| (area.path().display().to_string(), area.take_alerts()));
    for alert in &alerts {
        eprintln!("! {}", alert);
    }

    match outcome {
        Some(Outcome::Rendered { charts }) => {
            println!("Rendered {} chart(s) to {}", charts, path);
            Ok(())
        }
        Some(Outcome::Alerted) => bail!("generation failed; nothing was fetched"),
        _ => bail!("fetch failed; error page written to {}", path),
    }
}

async fn watch(controller: ViewController<ApiClient, HtmlArea>) -> Result<()> {
    let path = controller.with_area(|area| area.path().display().to_string());
    println!("Writing charts to {}", path);
    println!("Type k and press Enter to fetch, `f` fetch, `g` generate, `q` quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let dispatch = match input {
            "" => continue,
            "q" | "quit" => break,
            "f" | "fetch" => controller.dispatch(UiEvent::FetchClicked).await,
            "g" | "generate" => controller.dispatch(UiEvent::GenerateClicked).await,
            k => {
                controller.dispatch(UiEvent::KInput(k.to_string())).await;
                controller.dispatch(UiEvent::key("Enter")).await
            }
        };

        for alert in controller.with_area(|area| area.take_alerts()) {
            eprintln!("! {}", alert);
        }
        match dispatch.outcome {
            Some(Outcome::Rendered { charts }) => {
                println!("k={}: {} chart(s)", controller.selected_k(), charts)
            }
            Some(Outcome::ErrorDisplayed) => println!("fetch failed (k={})", controller.selected_k()),
            _ => {}
        }
    }

    let charts = controller.with_area(|area| area.chart_count());
    println!("Bye ({} chart(s) on screen)", charts);
    Ok(())
}
