//! Timer event loop background task

use std::time::Duration;
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    dial::DialInteraction,
    state::{TickHandle, TimerCommand, TimerEngine, TimerRequest},
};

/// Period of the countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Interval currently driving the engine, tagged with the handle it serves
type Ticker = Option<(TickHandle, Interval)>;

/// Background task that owns the engine and the dial and applies every
/// request and tick in order.
///
/// Runs until all request senders are dropped.
pub async fn timer_loop(
    mut engine: TimerEngine,
    mut dial: DialInteraction,
    mut requests: mpsc::Receiver<TimerRequest>,
) {
    info!("Starting timer loop");

    let mut ticker: Ticker = None;

    loop {
        sync_ticker(&engine, &mut ticker);

        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else {
                    info!("Request channel closed, stopping timer loop");
                    break;
                };

                apply_command(&mut engine, &mut dial, request.command);

                if let Some(reply) = request.reply {
                    if reply.send(engine.state()).is_err() {
                        debug!("Requester went away before the reply");
                    }
                }
            }

            _ = next_tick(&mut ticker) => {
                engine.tick();
            }
        }
    }

    engine.stop();
}

/// Apply one shell command to the engine
pub fn apply_command(engine: &mut TimerEngine, dial: &mut DialInteraction, command: TimerCommand) {
    debug!("Applying {:?}", command);

    match command {
        TimerCommand::Start => engine.start(),
        TimerCommand::Stop => engine.stop(),
        TimerCommand::Toggle => engine.toggle(),
        TimerCommand::AddTime => engine.add_time(),
        TimerCommand::RemoveTime => engine.remove_time(),
        TimerCommand::SetDuration { intervals } => engine.set_duration(intervals),
        TimerCommand::SetTotalSeconds { seconds } => engine.set_total_seconds(seconds),
        TimerCommand::StopAlarm => engine.request_stop_alarm(),
        TimerCommand::Press { x, y } => {
            dial.on_press(engine, x, y);
        }
        TimerCommand::DragBegin { x, y } => dial.on_drag_begin(engine, x, y),
        TimerCommand::DragUpdate { x, y } => dial.on_drag_update(engine, x, y),
        TimerCommand::DragEnd => dial.on_drag_end(engine),
        TimerCommand::Resize { width, height } => {
            if width > 0.0 && height > 0.0 {
                dial.resize(width, height);
            } else {
                warn!("Ignoring invalid dial size {}x{}", width, height);
            }
        }
    }
}

/// Keep exactly one interval alive for the engine's armed handle
fn sync_ticker(engine: &TimerEngine, ticker: &mut Ticker) {
    let current = ticker.as_ref().map(|(handle, _)| *handle);

    match (engine.active_tick(), current) {
        (Some(armed), Some(held)) if armed == held => {}
        (Some(armed), _) => {
            debug!("Scheduling {} every {:?}", armed, TICK_PERIOD);
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some((armed, interval));
        }
        (None, Some(held)) => {
            debug!("Cancelling {}", held);
            *ticker = None;
        }
        (None, None) => {}
    }
}

async fn next_tick(ticker: &mut Ticker) {
    match ticker {
        Some((_, interval)) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
