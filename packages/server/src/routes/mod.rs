use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let router = OpenApiRouter::new()
        .routes(routes!(handlers::health::health))
        .routes(routes!(handlers::video::create_video))
        .routes(routes!(handlers::video::get_video))
        .merge(upload_routes(state));

    // Stores that hand out URLs are fetched through `/assets` instead.
    if state.thumbnails.store().serves_retrieval() {
        router.routes(routes!(handlers::thumbnail::get_thumbnail))
    } else {
        router
    }
}

fn upload_routes(state: &AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::thumbnail::upload_thumbnail))
        .layer(handlers::thumbnail::upload_body_limit(
            state.thumbnails.validator().max_size(),
        ))
}
