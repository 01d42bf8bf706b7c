//! services/api/src/web/admin.rs
//!
//! The authenticated admin surface: dashboard stats, full CRUD over the
//! content collections, and the settings singleton. All of these sit behind
//! the `require_auth` middleware; none re-check the token themselves.
//!
//! Deleting a missing id deliberately succeeds while updating one is a 404 —
//! observed behavior of the system this replaces, kept as-is.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use dairy_cms_core::domain::{
    Banner, Category, DashboardStats, Faq, Inquiry, NewBanner, NewCategory, NewFaq,
    NewProduct, NewTestimonial, Product, ProductWithCategory, Settings, Testimonial,
};
use dairy_cms_core::patch::{BannerPatch, FaqPatch, InquiryPatch, ProductPatch, TestimonialPatch};

use crate::web::state::AppState;
use crate::web::{store_error, validation_error};

/// The body returned by every delete endpoint, hit or miss.
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

const DELETED: DeleteResponse = DeleteResponse { success: true };

//=========================================================================================
// Dashboard
//=========================================================================================

/// GET /admin/stats - Collection counts for the dashboard
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Collection counts", body = DashboardStats)),
    security(("bearer_token" = []))
)]
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let stats = state.engine.stats().await.map_err(store_error)?;
    Ok(Json(stats))
}

//=========================================================================================
// Products
//=========================================================================================

/// GET /admin/products - All products (published or not), enriched
#[utoipa::path(
    get,
    path = "/admin/products",
    responses((status = 200, description = "All products", body = [ProductWithCategory])),
    security(("bearer_token" = []))
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let products = state.engine.list::<Product>().await.map_err(store_error)?;
    let categories = state.engine.list::<Category>().await.map_err(store_error)?;
    let enriched: Vec<ProductWithCategory> = products
        .into_iter()
        .map(|p| ProductWithCategory::resolve(p, &categories))
        .collect();
    Ok(Json(enriched))
}

/// POST /admin/products - Create a product
#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProduct>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let product = req.into_record().map_err(validation_error)?;
    let created = state.engine.insert(product).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /admin/products/{id} - Patch a product
#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "No product with this id")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .engine
        .update::<Product, _>(&id, patch)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /admin/products/{id} - Delete a product (idempotent)
#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = 200, description = "Deleted (or already absent)", body = DeleteResponse)),
    security(("bearer_token" = []))
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.engine.remove::<Product>(&id).await.map_err(store_error)?;
    Ok(Json(DELETED))
}

//=========================================================================================
// Banners
//=========================================================================================

/// GET /admin/banners - All banners, active or not
#[utoipa::path(
    get,
    path = "/admin/banners",
    responses((status = 200, description = "All banners", body = [Banner])),
    security(("bearer_token" = []))
)]
pub async fn list_banners(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let banners = state.engine.list::<Banner>().await.map_err(store_error)?;
    Ok(Json(banners))
}

/// POST /admin/banners - Create a banner
#[utoipa::path(
    post,
    path = "/admin/banners",
    request_body = NewBanner,
    responses(
        (status = 201, description = "Banner created", body = Banner),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_banner(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBanner>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let banner = req.into_record().map_err(validation_error)?;
    let created = state.engine.insert(banner).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /admin/banners/{id} - Patch a banner
#[utoipa::path(
    put,
    path = "/admin/banners/{id}",
    params(("id" = String, Path, description = "Banner id")),
    request_body = BannerPatch,
    responses(
        (status = 200, description = "Updated banner", body = Banner),
        (status = 404, description = "No banner with this id")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<BannerPatch>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .engine
        .update::<Banner, _>(&id, patch)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /admin/banners/{id} - Delete a banner (idempotent)
#[utoipa::path(
    delete,
    path = "/admin/banners/{id}",
    params(("id" = String, Path, description = "Banner id")),
    responses((status = 200, description = "Deleted (or already absent)", body = DeleteResponse)),
    security(("bearer_token" = []))
)]
pub async fn delete_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.engine.remove::<Banner>(&id).await.map_err(store_error)?;
    Ok(Json(DELETED))
}

//=========================================================================================
// Testimonials
//=========================================================================================

/// GET /admin/testimonials - All testimonials
#[utoipa::path(
    get,
    path = "/admin/testimonials",
    responses((status = 200, description = "All testimonials", body = [Testimonial])),
    security(("bearer_token" = []))
)]
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let testimonials = state
        .engine
        .list::<Testimonial>()
        .await
        .map_err(store_error)?;
    Ok(Json(testimonials))
}

/// POST /admin/testimonials - Create a testimonial
#[utoipa::path(
    post,
    path = "/admin/testimonials",
    request_body = NewTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTestimonial>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let testimonial = req.into_record().map_err(validation_error)?;
    let created = state
        .engine
        .insert(testimonial)
        .await
        .map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /admin/testimonials/{id} - Patch a testimonial
#[utoipa::path(
    put,
    path = "/admin/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial id")),
    request_body = TestimonialPatch,
    responses(
        (status = 200, description = "Updated testimonial", body = Testimonial),
        (status = 404, description = "No testimonial with this id")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TestimonialPatch>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .engine
        .update::<Testimonial, _>(&id, patch)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /admin/testimonials/{id} - Delete a testimonial (idempotent)
#[utoipa::path(
    delete,
    path = "/admin/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial id")),
    responses((status = 200, description = "Deleted (or already absent)", body = DeleteResponse)),
    security(("bearer_token" = []))
)]
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .engine
        .remove::<Testimonial>(&id)
        .await
        .map_err(store_error)?;
    Ok(Json(DELETED))
}

//=========================================================================================
// FAQs
//=========================================================================================

/// GET /admin/faqs - All FAQs
#[utoipa::path(
    get,
    path = "/admin/faqs",
    responses((status = 200, description = "All FAQs", body = [Faq])),
    security(("bearer_token" = []))
)]
pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let faqs = state.engine.list::<Faq>().await.map_err(store_error)?;
    Ok(Json(faqs))
}

/// POST /admin/faqs - Create a FAQ
#[utoipa::path(
    post,
    path = "/admin/faqs",
    request_body = NewFaq,
    responses(
        (status = 201, description = "FAQ created", body = Faq),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewFaq>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let faq = req.into_record().map_err(validation_error)?;
    let created = state.engine.insert(faq).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /admin/faqs/{id} - Patch a FAQ
#[utoipa::path(
    put,
    path = "/admin/faqs/{id}",
    params(("id" = String, Path, description = "FAQ id")),
    request_body = FaqPatch,
    responses(
        (status = 200, description = "Updated FAQ", body = Faq),
        (status = 404, description = "No FAQ with this id")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<FaqPatch>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .engine
        .update::<Faq, _>(&id, patch)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /admin/faqs/{id} - Delete a FAQ (idempotent)
#[utoipa::path(
    delete,
    path = "/admin/faqs/{id}",
    params(("id" = String, Path, description = "FAQ id")),
    responses((status = 200, description = "Deleted (or already absent)", body = DeleteResponse)),
    security(("bearer_token" = []))
)]
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.engine.remove::<Faq>(&id).await.map_err(store_error)?;
    Ok(Json(DELETED))
}

//=========================================================================================
// Categories (create-only; no update/delete surface)
//=========================================================================================

/// GET /admin/categories - All categories
#[utoipa::path(
    get,
    path = "/admin/categories",
    responses((status = 200, description = "All categories", body = [Category])),
    security(("bearer_token" = []))
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let categories = state.engine.list::<Category>().await.map_err(store_error)?;
    Ok(Json(categories))
}

/// POST /admin/categories - Create a category
#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_token" = []))
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewCategory>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let category = req.into_record().map_err(validation_error)?;
    let created = state.engine.insert(category).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

//=========================================================================================
// Inquiries (no create here; submission is the public endpoint)
//=========================================================================================

/// GET /admin/inquiries - All inquiries, newest first
#[utoipa::path(
    get,
    path = "/admin/inquiries",
    responses((status = 200, description = "All inquiries, newest first", body = [Inquiry])),
    security(("bearer_token" = []))
)]
pub async fn list_inquiries(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut inquiries = state.engine.list::<Inquiry>().await.map_err(store_error)?;
    inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(inquiries))
}

/// PUT /admin/inquiries/{id} - Patch an inquiry (usually its status)
#[utoipa::path(
    put,
    path = "/admin/inquiries/{id}",
    params(("id" = String, Path, description = "Inquiry id")),
    request_body = InquiryPatch,
    responses(
        (status = 200, description = "Updated inquiry", body = Inquiry),
        (status = 404, description = "No inquiry with this id")
    ),
    security(("bearer_token" = []))
)]
pub async fn update_inquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<InquiryPatch>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let updated = state
        .engine
        .update::<Inquiry, _>(&id, patch)
        .await
        .map_err(store_error)?;
    Ok(Json(updated))
}

/// DELETE /admin/inquiries/{id} - Delete an inquiry (idempotent)
#[utoipa::path(
    delete,
    path = "/admin/inquiries/{id}",
    params(("id" = String, Path, description = "Inquiry id")),
    responses((status = 200, description = "Deleted (or already absent)", body = DeleteResponse)),
    security(("bearer_token" = []))
)]
pub async fn delete_inquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.engine.remove::<Inquiry>(&id).await.map_err(store_error)?;
    Ok(Json(DELETED))
}

//=========================================================================================
// Settings
//=========================================================================================

/// GET /admin/settings - The settings singleton
#[utoipa::path(
    get,
    path = "/admin/settings",
    responses((status = 200, description = "Site settings", body = Settings)),
    security(("bearer_token" = []))
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let settings = state.engine.settings().await.map_err(store_error)?;
    Ok(Json(settings))
}

/// PUT /admin/settings - Replace the settings singleton wholesale
#[utoipa::path(
    put,
    path = "/admin/settings",
    request_body = Settings,
    responses((status = 200, description = "The stored settings", body = Settings)),
    security(("bearer_token" = []))
)]
pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .engine
        .put_settings(&settings)
        .await
        .map_err(store_error)?;
    Ok(Json(settings))
}
