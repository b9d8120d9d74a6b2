//! HTTP routes for the admin API

use axum::{
    Json, Router,
    extract::{Extension, FromRequest, Multipart, Path, Request, State},
    http::{StatusCode, Uri, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    forms::{self, UpdateProductRequest},
    middleware::{AuthAdmin, auth_middleware},
    models::{AdminInfo, DashboardStats, ImageUpdate, LoginRequest, LoginResponse, NewAdmin,
        RegisterRequest},
    repositories::admin::verify_password,
    state::AppState,
    validation,
};

/// Create the router for the admin API
///
/// Every product route sits behind the bearer-token middleware; admin
/// login/registration and the health endpoints are public.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/products", post(add_product).get(get_products))
        .route("/api/products/dashboard/stats", get(dashboard_stats))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The admin UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/admin/register", post(register))
        .route("/api/admin/login", post(login))
        .merge(protected_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "ProductHub API is running",
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    common::database::health_check(&state.db_pool).await?;

    Ok(Json(json!({
        "status": "healthy",
        "database": "connected",
    })))
}

/// One-time admin registration
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let existing = state
        .admin_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up admin: {}", e);
            ApiError::internal(e)
        })?;
    if existing.is_some() {
        return Err(ApiError::AlreadyExists("Admin already exists".to_string()));
    }

    state
        .admin_repository
        .create(&NewAdmin {
            email: payload.email,
            password: payload.password,
        })
        .await
        .map_err(|e| {
            error!("Failed to create admin: {}", e);
            ApiError::internal(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Admin created successfully"})),
    ))
}

/// Admin login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for {}", payload.email);

    let admin = state
        .admin_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up admin: {}", e);
            ApiError::internal(e)
        })?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify_password(&admin.password_hash, &payload.password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::internal(e)
    })?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.generate_token(&admin).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::internal(e)
    })?;

    Ok(Json(LoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            email: admin.email,
        },
    }))
}

/// Create a product from a multipart form, uploading any attached images
pub async fn add_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = forms::collect_product_form(multipart).await?;
    let (new_product, files) = form.into_new_product(admin.id)?;

    let images = state.image_store.upload_all(&files).await?;

    let product = state
        .product_repository
        .insert(&new_product, &images)
        .await
        .map_err(|e| {
            error!("Failed to create product: {}", e);
            ApiError::internal(e)
        })?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get all products, newest first
pub async fn get_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_repository.find_all().await.map_err(|e| {
        error!("Failed to list products: {}", e);
        ApiError::internal(e)
    })?;

    Ok(Json(products))
}

/// Get a single product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .product_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get product: {}", e);
            ApiError::internal(e)
        })?
        .ok_or(ApiError::NotFound("Product"))?;

    Ok(Json(product))
}

/// Update a product from a multipart form or a JSON body
///
/// Provided fields are merged over the existing record; the image list
/// follows the three-way policy decided in `forms`.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Request,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let (patch, image_update) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart request: {e}")))?;
        forms::collect_product_form(multipart).await?.into_update()?
    } else {
        let Json(payload) = Json::<UpdateProductRequest>::from_request(req, &())
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed JSON body: {e}")))?;
        payload.into_update()?
    };

    let mut product = state
        .product_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get product: {}", e);
            ApiError::internal(e)
        })?
        .ok_or(ApiError::NotFound("Product"))?;

    let images = match image_update {
        ImageUpdate::NewFiles(files) => state.image_store.upload_all(&files).await?,
        ImageUpdate::Retain(urls) => urls,
        ImageUpdate::Unchanged => product.images.clone(),
    };

    patch.apply(&mut product);
    product.images = images;

    let updated = state
        .product_repository
        .update(&product)
        .await
        .map_err(|e| {
            error!("Failed to update product: {}", e);
            ApiError::internal(e)
        })?
        .ok_or(ApiError::NotFound("Product"))?;

    Ok(Json(updated))
}

/// Delete a product by ID
///
/// Hosted images are not cleaned up; orphaned uploads are accepted.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.product_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete product: {}", e);
        ApiError::internal(e)
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Product"));
    }

    Ok(Json(json!({"message": "Product deleted successfully"})))
}

/// Dashboard aggregates over the full product set
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_repository.find_all().await.map_err(|e| {
        error!("Failed to compute dashboard stats: {}", e);
        ApiError::internal(e)
    })?;

    Ok(Json(DashboardStats::compute(&products)))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Route not found",
            "path": uri.path(),
        })),
    )
}
