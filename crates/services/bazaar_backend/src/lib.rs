// File: crates/services/bazaar_backend/src/lib.rs
use axum::{routing::get, Router};
use bazaar_config::AppConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Prefix the hosted platform serves functions under.
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

/// Builds the complete application router.
pub fn app(config: Arc<AppConfig>) -> Router {
    let functions = bazaar_payments::routes(config);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the Bazaar API!" }))
        .nest(FUNCTIONS_PREFIX, functions);

    #[cfg(feature = "openapi")]
    {
        use bazaar_payments::doc::PaymentsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bazaar API",
                version = "0.1.0",
                description = "Bazaar backend functions",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/functions/v1", description = "Functions prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(PaymentsApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /docs");
        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http())
}
