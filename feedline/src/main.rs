//! Feedline
//!
//! A paginated social feed driven from the console. A view model owns the
//! feed state and notifies subscribed views on every change; post bodies
//! are rendered by plugins chosen per post type.

use std::io;
use std::rc::Rc;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod view;

#[cfg(test)]
mod test_utils;

use adapters::InMemoryPostRepository;
use app::FeedViewModel;
use config::Config;
use domain::entities::User;
use feed::PluginRegistry;
use view::{parse_command, FeedCommand, FeedView, Flow};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing. Stdout belongs to the feed.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,feedline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!(
        page_size = config.page_size,
        seed_posts = config.seed_posts,
        latency_ms = config.latency.as_millis() as u64,
        "Starting feedline..."
    );

    let current_user = Arc::new(User::new(&config.user_name, &config.username));
    let repository = Arc::new(
        InMemoryPostRepository::seeded(config.seed_posts, current_user.id)
            .with_user(current_user.clone())
            .with_latency(config.latency),
    );

    let view_model = Rc::new(FeedViewModel::new(
        repository,
        current_user,
        config.page_size,
    ));
    let plugins = Rc::new(PluginRegistry::with_builtin_plugins());
    let view = FeedView::new(view_model, plugins, io::stdout());

    view.handle(FeedCommand::Help).await?;
    view.handle(FeedCommand::Load).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                view.message(&format!("{}. Type `help` for commands.", e))?;
                continue;
            }
        };
        if view.handle(command).await? == Flow::Quit {
            break;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
