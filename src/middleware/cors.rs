// CORS configuration
// Any origin, method and header, with credentials. A wildcard cannot be
// combined with credentials, so each is mirrored from the request instead.

use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn apply_cors(router: Router) -> Router {
    router.layer(cors_layer())
}
