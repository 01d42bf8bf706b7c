//! services/api/src/web/public.rs
//!
//! The unauthenticated read API consumed by the storefront, plus the one
//! public write (inquiry submission). Every listing applies the entity's
//! visibility predicate before returning.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use dairy_cms_core::domain::{
    Banner, Category, Faq, Inquiry, NewInquiry, Product, ProductWithCategory, Settings,
    Testimonial,
};

use crate::web::state::AppState;
use crate::web::{store_error, validation_error};

/// GET /products - Published products, each with its resolved category
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Published products", body = [ProductWithCategory])
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let products = state.engine.list::<Product>().await.map_err(store_error)?;
    let categories = state.engine.list::<Category>().await.map_err(store_error)?;
    let enriched: Vec<ProductWithCategory> = products
        .into_iter()
        .filter(|p| p.is_published)
        .map(|p| ProductWithCategory::resolve(p, &categories))
        .collect();
    Ok(Json(enriched))
}

/// GET /products/{slug} - One published product by slug
#[utoipa::path(
    get,
    path = "/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "The product", body = ProductWithCategory),
        (status = 404, description = "No published product with this slug")
    )
)]
pub async fn get_product_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let product = state
        .engine
        .find::<Product, _>(|p| p.slug == slug && p.is_published)
        .await
        .map_err(store_error)?
        .ok_or((StatusCode::NOT_FOUND, "Product not found".to_string()))?;
    let categories = state.engine.list::<Category>().await.map_err(store_error)?;
    Ok(Json(ProductWithCategory::resolve(product, &categories)))
}

/// GET /categories - All categories
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "All categories", body = [Category]))
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let categories = state.engine.list::<Category>().await.map_err(store_error)?;
    Ok(Json(categories))
}

#[derive(Deserialize, IntoParams)]
pub struct BannerQuery {
    /// Restrict to banners tagged with this page ("home", "products", ...).
    pub page: Option<String>,
}

/// GET /banners - Active banners, ascending by sortOrder
#[utoipa::path(
    get,
    path = "/banners",
    params(BannerQuery),
    responses((status = 200, description = "Active banners", body = [Banner]))
)]
pub async fn list_banners(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BannerQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut banners: Vec<Banner> = state
        .engine
        .list::<Banner>()
        .await
        .map_err(store_error)?
        .into_iter()
        .filter(|b| b.is_active)
        .filter(|b| query.page.as_deref().map_or(true, |page| b.page == page))
        .collect();
    banners.sort_by_key(|b| b.sort_order);
    Ok(Json(banners))
}

/// GET /testimonials - Published testimonials
#[utoipa::path(
    get,
    path = "/testimonials",
    responses((status = 200, description = "Published testimonials", body = [Testimonial]))
)]
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let testimonials: Vec<Testimonial> = state
        .engine
        .list::<Testimonial>()
        .await
        .map_err(store_error)?
        .into_iter()
        .filter(|t| t.is_published)
        .collect();
    Ok(Json(testimonials))
}

/// GET /faqs - Published FAQs, ascending by sortOrder
#[utoipa::path(
    get,
    path = "/faqs",
    responses((status = 200, description = "Published FAQs", body = [Faq]))
)]
pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut faqs: Vec<Faq> = state
        .engine
        .list::<Faq>()
        .await
        .map_err(store_error)?
        .into_iter()
        .filter(|f| f.is_published)
        .collect();
    faqs.sort_by_key(|f| f.sort_order);
    Ok(Json(faqs))
}

/// GET /settings - The site settings singleton
#[utoipa::path(
    get,
    path = "/settings",
    responses((status = 200, description = "Site settings", body = Settings))
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let settings = state.engine.settings().await.map_err(store_error)?;
    Ok(Json(settings))
}

/// POST /inquiries - Submit a customer inquiry
///
/// The only public write. The server stamps id, status "new", and createdAt.
#[utoipa::path(
    post,
    path = "/inquiries",
    request_body = NewInquiry,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewInquiry>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let inquiry = req.into_record().map_err(validation_error)?;
    let created = state.engine.insert(inquiry).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}
