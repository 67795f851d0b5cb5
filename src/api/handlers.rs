//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info, warn};

use crate::{
    dial::{render, render_svg, Scene},
    state::{AppState, TimerCommand},
};
use super::responses::{
    ApiResponse, DurationRequest, HealthResponse, PointerRequest, RenderQuery, ResizeRequest,
    StatusResponse,
};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

/// Dispatch a command and wrap the resulting state
async fn respond(state: &AppState, action: &str, command: TimerCommand, message: &str) -> ApiResult {
    match state.dispatch(action, command).await {
        Ok(timer_state) => {
            info!("{} endpoint called - {}", action, message);
            Ok(Json(ApiResponse::new(message, timer_state)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "start", TimerCommand::Start, "Timer started").await
}

/// Handle POST /timer/stop - Stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "stop", TimerCommand::Stop, "Timer stopped").await
}

/// Handle POST /timer/toggle - Start or stop the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "toggle", TimerCommand::Toggle, "Timer toggled").await
}

/// Handle POST /timer/add - Add one interval
pub async fn add_time_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "add", TimerCommand::AddTime, "Time added").await
}

/// Handle POST /timer/remove - Remove one interval
pub async fn remove_time_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "remove", TimerCommand::RemoveTime, "Time removed").await
}

/// Handle POST /timer/duration - Set the duration in intervals or seconds
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> ApiResult {
    let command = match request {
        DurationRequest::Intervals { intervals } => TimerCommand::SetDuration { intervals },
        DurationRequest::Seconds { seconds } => TimerCommand::SetTotalSeconds { seconds },
    };
    respond(&state, "duration", command, "Duration set").await
}

/// Handle POST /alarm/stop - Silence the alarm
pub async fn stop_alarm_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "stop-alarm", TimerCommand::StopAlarm, "Alarm stopped").await
}

/// Handle POST /dial/press - Single press on the dial
pub async fn press_handler(
    State(state): State<Arc<AppState>>,
    Json(PointerRequest { x, y }): Json<PointerRequest>,
) -> ApiResult {
    respond(&state, "press", TimerCommand::Press { x, y }, "Dial pressed").await
}

/// Handle POST /dial/drag-begin - Start dragging the dial
pub async fn drag_begin_handler(
    State(state): State<Arc<AppState>>,
    Json(PointerRequest { x, y }): Json<PointerRequest>,
) -> ApiResult {
    respond(&state, "drag-begin", TimerCommand::DragBegin { x, y }, "Drag started").await
}

/// Handle POST /dial/drag-update - Move the drag to an absolute position
pub async fn drag_update_handler(
    State(state): State<Arc<AppState>>,
    Json(PointerRequest { x, y }): Json<PointerRequest>,
) -> ApiResult {
    respond(&state, "drag-update", TimerCommand::DragUpdate { x, y }, "Drag updated").await
}

/// Handle POST /dial/drag-end - Release the dial
pub async fn drag_end_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, "drag-end", TimerCommand::DragEnd, "Drag ended").await
}

/// Handle POST /dial/resize - Change the dial widget size
pub async fn resize_handler(
    State(state): State<Arc<AppState>>,
    Json(ResizeRequest { width, height }): Json<ResizeRequest>,
) -> ApiResult {
    if !valid_dimension(width) || !valid_dimension(height) {
        warn!("Rejecting dial size {}x{}", width, height);
        return Err(StatusCode::BAD_REQUEST);
    }
    respond(&state, "resize", TimerCommand::Resize { width, height }, "Dial resized").await
}

/// Handle GET /dial.svg - Current dial as an SVG document
pub async fn dial_svg_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let (width, height) = render_size(&state, query)?;
    let svg = render_svg(&state.get_timer_state(), width, height, &state.style);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Handle GET /dial/scene - Current dial as a list of drawing operations
pub async fn dial_scene_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<Scene>, StatusCode> {
    let (width, height) = render_size(&state, query)?;
    Ok(Json(render(&state.get_timer_state(), width, height, &state.style)))
}

/// Handle GET /status - Timer, alarm and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let (dial_width, dial_height) = state.get_dial_size().map_err(|e| {
        error!("Failed to get dial size: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.get_timer_state().into(),
        alarm_playing: state.alarm.is_playing(),
        dial_width,
        dial_height,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Requested render size, falling back to the dial widget size
fn render_size(state: &AppState, query: RenderQuery) -> Result<(f64, f64), StatusCode> {
    let (dial_width, dial_height) = state.get_dial_size().map_err(|e| {
        error!("Failed to get dial size: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let width = query.width.unwrap_or(dial_width);
    let height = query.height.unwrap_or(dial_height);

    if !valid_dimension(width) || !valid_dimension(height) {
        warn!("Rejecting render size {}x{}", width, height);
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok((width, height))
}

fn valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
