#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use cohort_business::BusinessConfig;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let config = BusinessConfig::from_env().unwrap_or_else(|e| {
        log::error!("invalid dashboard configuration, using defaults: {e}");
        BusinessConfig::default()
    });
    if config.session_token().is_none() {
        log::warn!("COHORT_SESSION_TOKEN is not set, data routes will answer 401");
    }

    // Network I/O runs here; the egui loop owns the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("cohort-io")
        .build()?;
    let handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cohort Dashboard",
        native_options,
        Box::new(move |_cc| Ok(Box::new(cohort_ui::CohortApp::new(config, handle)))),
    )?;

    Ok(())
}
