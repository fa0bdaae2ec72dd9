use crate::{
    api::users,
    auth::basic::docs_basic_auth,
    config::Config,
    docs::ApiDoc,
    error::{AppError, error_envelope},
    service::UserService,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    App, Error, HttpRequest, HttpResponse, Scope,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Logger, NormalizePath, from_fn},
    web::{self, Data},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// The whole application: middleware stack, shared state and routes.
pub fn app(
    config: Data<Config>,
    service: Data<UserService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let route_config = config.clone();
    let cors = cors(&config.cors_origins);

    App::new()
        .app_data(config)
        .app_data(service)
        .wrap(from_fn(error_envelope))
        .wrap(from_fn(docs_basic_auth))
        .wrap(NormalizePath::trim())
        .wrap(cors)
        .wrap(Logger::default())
        .configure(move |cfg| configure(cfg, &route_config))
}

// Credentialed CORS; `*` in the list allows any origin
fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();

    if origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build the per-peer limiter, None when turned off
    fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
        if requests_per_min == 0 {
            return None;
        }
        let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
        GovernorConfigBuilder::default()
            .milliseconds_per_request(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .map(|cfg| Governor::new(&cfg))
    }

    match build_limiter(config.rate_users_per_min) {
        Some(limiter) => cfg.service(users_scope().wrap(limiter)),
        None => cfg.service(users_scope()),
    };

    // /docs/ and /docs-json, guarded by docs_basic_auth.
    // NormalizePath turns /docs/ into /docs, so the entry point redirects.
    cfg.service(web::redirect("/docs", "/docs/index.html"));
    cfg.service(
        SwaggerUi::new("/docs/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
            .url("/docs-json", ApiDoc::openapi()),
    );

    cfg.default_service(web::to(unknown_route));
}

fn users_scope() -> Scope {
    web::scope("/users")
        .app_data(users::json_config())
        // /users
        .service(
            web::resource("")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user))
                .default_service(web::to(unknown_route)),
        )
        // /users/{id}
        .service(
            web::resource("/{id}")
                .route(web::get().to(users::get_user))
                .route(web::delete().to(users::delete_user))
                .default_service(web::to(unknown_route)),
        )
}

async fn unknown_route(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::UnknownRoute {
        method: req.method().to_string(),
        path: req.path().to_string(),
    })
}
