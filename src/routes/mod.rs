pub mod requests;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new().route(
        "/api/v1/requests",
        get(requests::list).post(requests::create),
    )
}
