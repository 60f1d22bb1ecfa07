//! Route definitions for the packaging production tracking server

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        // Session
        .route("/auth/me", get(handlers::me))
        .route("/auth/change-password", post(handlers::change_password))
        // User management
        .nest("/users", user_routes())
        // Record streams
        .nest("/production", production_routes())
        .nest("/shipment", shipment_routes())
        .nest("/cut-product", cut_product_routes())
        // Derived stock
        .route("/stock", get(handlers::get_stock))
        // Purchasing and consumption
        .route(
            "/currency-rates",
            get(handlers::get_currency_rates).post(handlers::set_currency_rates),
        )
        .nest("/raw-materials", raw_material_routes())
        .nest("/daily-consumption", consumption_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Login (public)
        .route("/auth/login", post(handlers::login))
        .merge(protected)
}

/// User management routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/:user_id", delete(handlers::delete_user))
}

/// Production routes
fn production_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_productions).post(handlers::create_production),
        )
        .route(
            "/:id",
            get(handlers::get_production)
                .put(handlers::update_production)
                .delete(handlers::delete_production),
        )
}

/// Shipment routes
fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_shipments).post(handlers::create_shipment))
        .route(
            "/:id",
            get(handlers::get_shipment)
                .put(handlers::update_shipment)
                .delete(handlers::delete_shipment),
        )
}

/// Cutting job routes
fn cut_product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_cut_products).post(handlers::create_cut_product),
        )
        .route(
            "/:id",
            get(handlers::get_cut_product)
                .put(handlers::update_cut_product)
                .delete(handlers::delete_cut_product),
        )
}

/// Raw material purchase routes
fn raw_material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_raw_materials).post(handlers::create_raw_material),
        )
        .route(
            "/:id",
            get(handlers::get_raw_material)
                .put(handlers::update_raw_material)
                .delete(handlers::delete_raw_material),
        )
}

/// Daily consumption routes
fn consumption_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_consumptions).post(handlers::create_consumption),
        )
        .route(
            "/:id",
            get(handlers::get_consumption)
                .put(handlers::update_consumption)
                .delete(handlers::delete_consumption),
        )
}
