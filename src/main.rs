mod app;
mod attachments;
mod auth;
mod event;
mod generation;
mod route;
mod store;
mod theme;
mod ui;

use app::PromptForgeApp;
use auth::IdentityClient;
use eframe::egui;
use generation::GenerationController;
use route::AppRoute;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("promptforge-runtime")
        .build()?;

    let identity = IdentityClient::new(tx.clone(), runtime.handle().clone());
    let generation = GenerationController::new(tx, runtime.handle().clone());
    let mut app = PromptForgeApp::new(rx, identity, generation);
    let _runtime = runtime;

    // Optional start path, e.g. `promptforge /pricing`. Guarded routes
    // still require a session, so those fall through to the default.
    if let Some(path) = std::env::args().nth(1) {
        match AppRoute::from_path(&path) {
            Some(start) if !start.requires_auth() => app.route = start,
            _ => tracing::warn!(target: "promptforge", "ignoring start path {path:?}"),
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PromptForge",
        native_options,
        Box::new(move |creation_context| {
            app.theme.apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
