mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{
    self, routes as auth_routes, AuthService, PgUserRepository, TokenService,
};
use crate::features::chat::{routes as chat_routes, ChatService};
use crate::features::habits::{routes as habits_routes, HabitService, PgHabitRepository};
use crate::features::reports::{routes as reports_routes, PgReportRepository, ReportService};
use crate::features::trucks::routes as trucks_routes;
use crate::modules::gemini::{ChatModel, GeminiClient};
use crate::modules::mail::{Notifier, SmtpNotifier};
use crate::modules::storage::MinIOClient;
use crate::modules::vision::VisionClient;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Database
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.jwt_leeway,
    ));
    let token_service = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.access_token_ttl,
        config.auth.refresh_token_ttl,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::clone(&token_service),
        Arc::clone(&jwt_validator),
    ));
    tracing::info!("Auth service initialized");

    // Report image storage
    let minio_client = Arc::new(
        MinIOClient::new(config.minio.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?,
    );
    tracing::info!(
        "MinIO client initialized for bucket: {}",
        minio_client.bucket_name()
    );

    // Label detection
    if config.vision.api_key.is_none() {
        tracing::warn!("GOOGLE_CLOUD_VISION_API_KEY not set, reports will not be verified");
    }
    let vision_client = Arc::new(
        VisionClient::new(config.vision.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize label detection: {}", e))?,
    );

    // Notification email
    let notifier: Option<Arc<dyn Notifier>> = match config.mail.clone() {
        Some(mail) => {
            let smtp: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(mail).map_err(|e| {
                anyhow::anyhow!("Failed to initialize SMTP notifier: {}", e)
            })?);
            Some(smtp)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, notification emails are disabled");
            None
        }
    };

    let report_service = Arc::new(ReportService::new(
        Arc::new(PgReportRepository::new(pool.clone())),
        minio_client.clone(),
        vision_client,
        notifier,
        config.notifications.clone(),
        config.minio.report_prefix.clone(),
    ));
    tracing::info!("Report service initialized");

    // GreenBot
    let gemini_client = GeminiClient::new(config.gemini.clone());
    let chat_model: Option<Arc<dyn ChatModel>> = if gemini_client.is_configured() {
        tracing::info!("Chat model configured: {}", config.gemini.model);
        let model: Arc<dyn ChatModel> = Arc::new(gemini_client);
        Some(model)
    } else {
        tracing::warn!("GEMINI_API_KEY not set, chat endpoint will be unavailable");
        None
    };
    let chat_service = Arc::new(ChatService::new(chat_model));

    let habit_service = Arc::new(HabitService::new(Arc::new(PgHabitRepository::new(
        pool.clone(),
    ))));

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(reports_routes::routes(report_service))
        .merge(chat_routes::routes(chat_service))
        .merge(trucks_routes::routes())
        .merge(habits_routes::routes(habit_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new().merge(auth_routes::public_routes(auth_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
