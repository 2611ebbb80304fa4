use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use greenguide_core::App;
use greenguide_services::Clients;
use greenguide_ui::{Action, Page, Session, Shell, ShellInput, SoilView, TerminalSurface};

#[derive(Parser)]
#[command(name = "greenguide")]
#[command(version, about = "Urban Green Guide: where to plant, what to plant, and how to grow it")]
struct Cli {
    /// Use this config file instead of the default one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// City to look up (defaults to defaults.city from the config)
    #[arg(long, global = true, env = "GREENGUIDE_CITY")]
    city: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the Guide page with planting options
    Guide,
    /// Ask the gardening chatbot one question
    Chat {
        /// Question to send
        question: String,
    },
    /// Geocode the city and show its soil
    Soil,
}

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may come from a .env file in the working directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app = App::new(cli.config.as_deref())?;
    greenguide_core::init(&app.config().logging.level)?;
    for warning in &app.validation().warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let clients = Clients::new(app.config())?;
    let city = cli
        .city
        .unwrap_or_else(|| app.config().defaults.city.clone());
    let mut surface = TerminalSurface::stdout();

    tracing::info!("Green Guide started for {}", city);

    match cli.command {
        Some(Commands::Guide) => {
            let input = ShellInput::new(city).with_action(Action::FindPlantingOptions);
            Shell::new(&clients).evaluate(&mut surface, &input).await;
        }
        Some(Commands::Chat { question }) => {
            let input = ShellInput::new(city)
                .with_page(Page::Chatbot)
                .with_action(Action::SendQuestion(question));
            Shell::new(&clients).evaluate(&mut surface, &input).await;
        }
        Some(Commands::Soil) => {
            SoilView::new(&clients).render(&mut surface, &city).await;
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            Session::new(&clients, city).run(&mut surface, stdin).await?;
        }
    }

    app.shutdown();
    Ok(())
}
