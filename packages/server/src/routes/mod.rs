use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(jewellery_routes())
        .merge(image_routes(config))
        .routes(routes!(handlers::health::health))
}

fn jewellery_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::jewellery::create_jewellery,
            handlers::jewellery::list_jewellery
        ))
        .routes(routes!(
            handlers::jewellery::get_jewellery,
            handlers::jewellery::update_jewellery
        ))
        // Trailing-slash form of the collection, kept out of the OpenAPI document.
        .route(
            "/jewellery/",
            get(handlers::jewellery::list_jewellery).post(handlers::jewellery::create_jewellery),
        )
}

fn image_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_image))
        .layer(handlers::upload::upload_body_limit(
            config.storage.max_image_size,
        ));

    upload.routes(routes!(handlers::upload::get_image))
}
