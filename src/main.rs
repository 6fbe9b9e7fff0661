//! Hanip Cinema: desktop browser for the movie catalog API
//!
//! Usage:
//!   cinema                - Open the catalog window
//!   cinema open <path>    - Open the window at a route path
//!   cinema search <query> - Print matching movies
//!   cinema movie <id>     - Print a movie and its reviews
//!   cinema help           - Show help

mod app;
mod backend;
mod catalog;
mod commands;
mod config;
mod history;
mod search;
mod ui;

use app::Cinema;
use backend::api::CatalogClient;
use commands::Command;
use config::Config;
use iced::{window, Size};
use search::ResultFetcher;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // Initialize logging (use try_init to avoid panic if already initialized)
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args);

    if let Command::Help = command {
        println!("{}", Command::help_text());
        return Ok(());
    }
    if let Command::Invalid { message } = &command {
        eprintln!("{}", message);
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    };

    match command {
        Command::Browse => start_app(config, None),
        Command::Open { path } => start_app(config, Some(path)),
        Command::Search { query } => {
            print_search(&config, &query);
            Ok(())
        }
        Command::Movie { id } => {
            print_movie(&config, id);
            Ok(())
        }
        Command::Help | Command::Invalid { .. } => Ok(()),
    }
}

fn print_search(config: &Config, query: &str) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let client = CatalogClient::new(&config.api_url);
    let mut fetcher = ResultFetcher::new();

    let outcome = rt.block_on(fetcher.fetch(&client, query));
    if let Some(message) = outcome.error_message() {
        eprintln!("{}", message);
        return;
    }
    for movie in outcome.items() {
        println!("{:>5}  {} ({})", movie.id, movie.title, movie.release_date);
    }
}

fn print_movie(config: &Config, id: u64) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let client = CatalogClient::new(&config.api_url);

    let (movie, reviews) = rt.block_on(async { tokio::join!(client.movie(id), client.reviews(id)) });

    match catalog::DetailState::from(movie) {
        catalog::DetailState::Loaded(movie) => {
            println!("{}", movie.title);
            println!("{}", movie.summary());
            if !movie.company.is_empty() {
                println!("{}", movie.company);
            }
            if !movie.sub_title.is_empty() {
                println!("\n{}", movie.sub_title);
            }
            println!("{}", movie.description);
        }
        catalog::DetailState::NotFound => {
            eprintln!("Movie {} not found", id);
            return;
        }
        catalog::DetailState::Loading | catalog::DetailState::Failed => {
            eprintln!("{}", catalog::MOVIE_ERROR_MESSAGE);
            return;
        }
    }

    match catalog::ReviewsState::from(reviews) {
        catalog::ReviewsState::Loaded(reviews) => {
            println!("\nReviews ({}):", reviews.len());
            for review in reviews {
                println!("  {} - {}: {}", review.created_date(), review.author, review.content);
            }
        }
        _ => eprintln!("{}", catalog::REVIEWS_ERROR_MESSAGE),
    }
}

fn start_app(config: Config, start_path: Option<String>) -> iced::Result {
    tracing::info!("Starting Hanip Cinema...");

    iced::application(Cinema::title, Cinema::update, Cinema::view)
        .subscription(Cinema::subscription)
        .theme(Cinema::theme)
        .window(window::Settings {
            size: Size::new(960.0, 720.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Cinema::new(config, start_path.as_deref()))
}
