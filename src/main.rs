use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use expense_tracker::config::Config;
use expense_tracker::handlers::ErrorResponse;
use expense_tracker::handlers::auth_handlers::{login_handler, signup_handler};
use expense_tracker::handlers::expense_handlers::{
    create_expense_handler, delete_expense_handler, list_expenses_handler,
};
use expense_tracker::middleware::auth_middleware::auth_middleware;
use expense_tracker::models::auth::{LoginRequest, LoginResponse, SignupResponse};
use expense_tracker::models::expense::{CreateExpenseRequest, Expense};
use expense_tracker::models::user::{CreateUserRequest, User};
use expense_tracker::repositories::expense_repository::PostgresExpenseRepository;
use expense_tracker::repositories::user_repository::PostgresUserRepository;
use expense_tracker::schema;
use expense_tracker::services::auth_service::{AuthService, AuthServiceImpl};
use expense_tracker::services::expense_service::{ExpenseService, ExpenseServiceImpl};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        expense_tracker::handlers::auth_handlers::signup_handler,
        expense_tracker::handlers::auth_handlers::login_handler,
        expense_tracker::handlers::expense_handlers::list_expenses_handler,
        expense_tracker::handlers::expense_handlers::create_expense_handler,
        expense_tracker::handlers::expense_handlers::delete_expense_handler,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            LoginRequest,
            LoginResponse,
            SignupResponse,
            Expense,
            CreateExpenseRequest,
            ErrorResponse
        )
    ),
    tags(
        (name = "auth", description = "Signup and login endpoints"),
        (name = "expenses", description = "Expense endpoints")
    ),
    info(
        title = "Expense Tracker API",
        version = "0.1.0",
        description = "REST API for tracking personal expenses",
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("connected to database");

    // Create tables if they do not exist
    schema::create_tables(&pool).await?;

    tracing::info!("schema ready");

    // Initialize repositories
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let expense_repository = Arc::new(PostgresExpenseRepository::new(pool.clone()));

    // Initialize services
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        user_repository,
        config.jwt_secret.clone(),
    ));
    let expense_service: Arc<dyn ExpenseService> =
        Arc::new(ExpenseServiceImpl::new(expense_repository));

    // Public routes
    let auth_routes = Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .with_state(auth_service.clone());

    // Protected routes behind the token verification gate
    let expense_routes = Router::new()
        .route(
            "/expenses",
            get(list_expenses_handler).post(create_expense_handler),
        )
        .route("/expenses/:id", delete(delete_expense_handler))
        .layer(middleware::from_fn_with_state(
            auth_service.clone(),
            auth_middleware,
        ))
        .with_state(expense_service);

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(expense_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server running");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
