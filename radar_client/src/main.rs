//! Radar Client: a terminal dashboard of near-real-time stock quotes.
//!
//! It polls a quote API (or the built-in mock data) on a fixed interval, prints one card
//! per symbol and an expanded view of the selected one, and redraws on every change.
//! Failed refreshes keep the previous data on screen and show a short notice.
//!
//! Usage example (CLI):
//! ```bash
//! radar_client --base-url http://localhost:5000/ --interval-ms 30000
//! ```
//!
//! While running, type a card number or symbol to select it, `r` to refresh now and
//! `q` to quit.
#![warn(missing_docs)]
use clap::Parser;
use log::info;
use radar_client::args::Args;
use radar_client::command::{HELP, UserCommand};
use radar_client::config::DashboardConfig;
use radar_client::render::render_dashboard;
use radar_client::{DashboardSession, Notice};
use radar_common::RadarError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<(), RadarError> {
    init_logger();
    let args = Args::parse();
    let config = DashboardConfig::try_from(args)?;
    let source = config.build_source()?;
    info!("Reading quotes from {}", source.describe());

    let mut session = DashboardSession::start(source, config.refresh_interval);
    let mut notices = session.store().notices();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut completed = 0u64;
    let mut rng = rand::rng();

    println!("{}", HELP);
    loop {
        tokio::select! {
            changed = session.changed() => {
                if !changed {
                    break;
                }
                println!("\n{}", render_dashboard(&session.view(), &mut rng));
                if !session.state().is_loading {
                    completed += 1;
                    if config.iterations > 0 && completed >= config.iterations {
                        info!("Completed {} refreshes, exiting", completed);
                        break;
                    }
                }
            }
            notice = notices.recv() => match notice {
                Ok(Notice::FetchFailed { message }) => eprintln!("! {}", message),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            line = input.next_line(), if input_open => match line? {
                Some(line) => match UserCommand::parse(&line) {
                    Some(UserCommand::Quit) => break,
                    Some(UserCommand::Refresh) => {
                        let store = session.store().clone();
                        tokio::spawn(async move { store.refresh().await });
                    }
                    Some(UserCommand::Help) => println!("{}", HELP),
                    Some(UserCommand::Select(target)) => match session.select_input(&target) {
                        Some(_) => println!("\n{}", render_dashboard(&session.view(), &mut rng)),
                        None => println!("Unknown symbol: {}", target),
                    },
                    None => {}
                },
                None => input_open = false,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received. Shutting down dashboard...");
                break;
            }
        }
    }

    session.shutdown();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
