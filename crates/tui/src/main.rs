mod app;
mod clipboard;
mod render;
mod theme;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use diamonds_core::{
    config::{self, AppConfig},
    JsonFileStore, Navigator,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{app::DiamondsApp, clipboard::SystemClipboard, theme::Theme};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let root = config::ensure_default_config().context("could not prepare config directory")?;
    let config = AppConfig::load_from(&root.path).context("could not load configuration")?;
    init_logging(&config.log_file)?;
    if root.created_default {
        info!(
            "wrote default config to {}",
            root.path.join(config::CONFIG_FILE_NAME).display()
        );
    }

    let store = JsonFileStore::new(&config.data_file);
    let navigator =
        Navigator::new(store, SystemClipboard::new()).context("Error loading projects")?;
    info!(
        projects = navigator.projects().len(),
        "starting with data file {}",
        config.data_file.display()
    );

    let mut app = DiamondsApp::new(navigator, Theme::from_config(&config.theme));
    app.run().await
}

fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the alternate screen, so only the file layer is installed.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
