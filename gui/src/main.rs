// Grid Studio desktop entry point
use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use studio_gui::app::App;
use studio_gui::config::AppConfig;
use tracing_subscriber::EnvFilter;

const STYLESHEET: &str = include_str!("../assets/style.css");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = match AppConfig::load() {
        Ok(cfg) => {
            tracing::info!(version = %cfg.version, "Loaded configuration");
            cfg
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration. Exiting.");
            std::process::exit(1);
        }
    };

    tracing::info!(
        endpoint = %app_config.engine.endpoint(),
        table = %format!("{}.{}", app_config.grid.schema, app_config.grid.table),
        "Starting Grid Studio"
    );

    let desktop_config = DesktopConfig::new()
        .with_window(
            WindowBuilder::new()
                .with_title(app_config.app.title.clone())
                .with_inner_size(LogicalSize::new(1280.0, 800.0)),
        )
        .with_custom_head(format!("<style>{}</style>", STYLESHEET));

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(app_config)
        .launch(App);
}
