mod app;

fn init_logging() {
    // Default to info level, override with RUST_LOG
    // Example: RUST_LOG=globetrotter_core::view=debug,globetrotter_gui=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "globetrotter_core=info,globetrotter_gui=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let result = iced::application("Favorite Countries", app::update, app::view)
        .subscription(app::subscription)
        .window_size(iced::Size::new(
            app::DEFAULT_WINDOW_WIDTH,
            app::DEFAULT_WINDOW_HEIGHT,
        ))
        .run_with(app::initialize);

    log::info!("Window closed, favorites view released");
    result
}
