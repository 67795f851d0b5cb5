//! Dial Timer - A single-session countdown timer driven by a circular dial
//!
//! This is the main entry point for the dial-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::{info, warn};

use dial_timer::{
    config::Config,
    state::{AppState, SessionHooks, TimerEngine},
    dial::DialInteraction,
    api::create_router,
    services::{
        check_command_available, AlarmStatus, DesktopHooks, LogHooks, ALARM_PROGRAM,
        NOTIFY_PROGRAM,
    },
    tasks::timer_loop,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dial_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting dial-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s, dial={}px, high_contrast={}",
          config.host, config.port, config.total_seconds(), config.dial_size, config.high_contrast);

    let (command_tx, command_rx) = mpsc::channel(32);
    let alarm = AlarmStatus::new();

    let hooks: Box<dyn SessionHooks> = if config.quiet {
        info!("Quiet mode, alarm and notifications are logged only");
        Box::new(LogHooks::new(alarm.clone()))
    } else {
        // Missing desktop tools only degrade the session end, they are not fatal
        for program in [NOTIFY_PROGRAM, ALARM_PROGRAM] {
            if let Err(e) = check_command_available(program).await {
                warn!("{}", e);
            }
        }
        Box::new(DesktopHooks::new(alarm.clone(), command_tx.downgrade()))
    };

    let engine = TimerEngine::new(i64::from(config.total_seconds()), hooks);
    let timer_rx = engine.watch();
    let (width, height) = config.dial_dimensions();
    let dial = DialInteraction::new(width, height);

    // Start the timer loop that owns the engine
    tokio::spawn(timer_loop(engine, dial, command_rx));

    // Create application state
    let state = Arc::new(AppState::new(
        command_tx,
        timer_rx,
        alarm,
        config.dial_style(),
        (width, height),
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start|stop|toggle  - Control the countdown");
    info!("  POST /timer/add|remove         - Step the duration by 30 seconds");
    info!("  POST /timer/duration           - Set the duration");
    info!("  POST /alarm/stop               - Silence the alarm");
    info!("  POST /dial/press|drag-*|resize - Pointer input for the dial");
    info!("  GET  /dial.svg | /dial/scene   - Render the dial");
    info!("  GET  /status                   - Check current status");
    info!("  GET  /health                   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
