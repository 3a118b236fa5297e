use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use linkup_service::handlers;
use linkup_service::metrics;
use linkup_service::middleware::JwtAuthMiddleware;
use linkup_service::openapi::ApiDoc;
use linkup_service::security::jwt;
use linkup_service::services::MediaStorage;
use linkup_service::Config;

async fn health_summary(pool: web::Data<sqlx::PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "linkup-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "linkup-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting linkup-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if let Err(e) = jwt::initialize(&config.auth.jwt_secret) {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize token keys: {e}"),
        ));
    }

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {e}")))?;

    tracing::info!("Connected to database, migrations applied");

    let media_storage = Arc::new(MediaStorage::from_config(&config.media).await);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(media_storage.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", openapi_doc.clone()),
            )
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(metrics::metrics_handler))
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login)),
            )
            .service(
                web::scope("/api/v1/users")
                    .wrap(JwtAuthMiddleware)
                    .route("/profile", web::get().to(handlers::get_profile))
                    .route("/profile", web::put().to(handlers::update_profile))
                    .route(
                        "/profile/image",
                        web::post().to(handlers::upload_profile_image),
                    ),
            )
            .service(
                web::scope("/api/v1/posts")
                    .wrap(JwtAuthMiddleware)
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::get_feed))
                            .route(web::post().to(handlers::create_post)),
                    )
                    .service(
                        web::resource("/user/{user_id}")
                            .route(web::get().to(handlers::get_user_posts)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::put().to(handlers::update_post))
                            .route(web::delete().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/{post_id}/like")
                            .route(web::post().to(handlers::like_post))
                            .route(web::delete().to(handlers::unlike_post)),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
