use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use tracing::{debug, info, instrument};

use crate::{
    dto::{SetResolverRequest, SetStrategyRequest, StartTunnelRequest, TunnelStatusResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tunnel/status", get(get_status))
        .route("/tunnel/start", post(start_tunnel))
        .route("/tunnel/stop", post(stop_tunnel))
        .route("/tunnel/resolver", put(set_resolver))
        .route("/tunnel/strategy", put(set_strategy))
}

fn current_status(state: &AppState) -> Json<TunnelStatusResponse> {
    Json(state.tunnel.get_status.execute().into())
}

async fn get_status(State(state): State<AppState>) -> Json<TunnelStatusResponse> {
    current_status(&state)
}

#[instrument(skip(state, request), name = "api_start_tunnel")]
async fn start_tunnel(
    State(state): State<AppState>,
    request: Option<Json<StartTunnelRequest>>,
) -> Result<Json<TunnelStatusResponse>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    debug!(
        resolver = ?request.resolver_url,
        strategy = ?request.strategy_id,
        "Start requested"
    );

    state
        .tunnel
        .start
        .execute(request.resolver_url, request.strategy_id)
        .await?;

    Ok(current_status(&state))
}

#[instrument(skip(state), name = "api_stop_tunnel")]
async fn stop_tunnel(State(state): State<AppState>) -> Json<TunnelStatusResponse> {
    state.tunnel.stop.execute().await;
    current_status(&state)
}

async fn set_resolver(
    State(state): State<AppState>,
    Json(request): Json<SetResolverRequest>,
) -> Result<Json<TunnelStatusResponse>, ApiError> {
    let url = state.tunnel.set_resolver.execute(&request.url)?;
    info!(resolver = %url, "Resolver changed via API");
    Ok(current_status(&state))
}

async fn set_strategy(
    State(state): State<AppState>,
    Json(request): Json<SetStrategyRequest>,
) -> Result<Json<TunnelStatusResponse>, ApiError> {
    let strategy = state.tunnel.set_strategy.execute(&request.strategy_id)?;
    info!(strategy = %strategy, "Strategy changed via API");
    Ok(current_status(&state))
}
