//! services/api/src/web/mod.rs
//!
//! Router assembly, the OpenAPI master definition, and the shared
//! error-to-response mapping used by all handlers.

pub mod admin;
pub mod auth;
pub mod middleware;
pub mod public;
pub mod state;
pub mod token;
pub mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tracing::error;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use dairy_cms_core::domain::ValidationError;
use dairy_cms_core::ports::StoreError;

use crate::web::state::AppState;

pub use middleware::{require_admin, require_auth};

//=========================================================================================
// Error mapping
//=========================================================================================

/// Maps a store failure onto the HTTP surface: lookup misses become 404,
/// everything else is logged and hidden behind a generic 500.
pub(crate) fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        other => {
            error!("Store failure: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal storage error".to_string(),
            )
        }
    }
}

pub(crate) fn validation_error(e: ValidationError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

//=========================================================================================
// Router
//=========================================================================================

/// Builds the full application router. CORS, static upload serving, and the
/// Swagger UI are layered on by the binary; tests drive this router directly.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/products", get(public::list_products))
        .route("/products/{slug}", get(public::get_product_by_slug))
        .route("/categories", get(public::list_categories))
        .route("/banners", get(public::list_banners))
        .route("/testimonials", get(public::list_testimonials))
        .route("/faqs", get(public::list_faqs))
        .route("/settings", get(public::get_settings))
        .route("/inquiries", post(public::create_inquiry));

    // Any valid token may ask who it belongs to.
    let identity_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let admin_routes = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route(
            "/admin/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route(
            "/admin/banners",
            get(admin::list_banners).post(admin::create_banner),
        )
        .route(
            "/admin/banners/{id}",
            put(admin::update_banner).delete(admin::delete_banner),
        )
        .route(
            "/admin/testimonials",
            get(admin::list_testimonials).post(admin::create_testimonial),
        )
        .route(
            "/admin/testimonials/{id}",
            put(admin::update_testimonial).delete(admin::delete_testimonial),
        )
        .route("/admin/faqs", get(admin::list_faqs).post(admin::create_faq))
        .route(
            "/admin/faqs/{id}",
            put(admin::update_faq).delete(admin::delete_faq),
        )
        .route(
            "/admin/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route("/admin/inquiries", get(admin::list_inquiries))
        .route(
            "/admin/inquiries/{id}",
            put(admin::update_inquiry).delete(admin::delete_inquiry),
        )
        .route(
            "/admin/settings",
            get(admin::get_settings).put(admin::put_settings),
        )
        .route("/admin/upload", post(upload::upload_handler))
        // Layers run outermost-last: token verification first, then the
        // explicit role check on the decoded claims.
        .layer(axum_middleware::from_fn(middleware::require_admin))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(identity_routes)
        .merge(admin_routes)
        .layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES))
        .with_state(state)
}

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_handler,
        auth::me_handler,
        public::list_products,
        public::get_product_by_slug,
        public::list_categories,
        public::list_banners,
        public::list_testimonials,
        public::list_faqs,
        public::get_settings,
        public::create_inquiry,
        admin::stats,
        admin::list_products,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_banners,
        admin::create_banner,
        admin::update_banner,
        admin::delete_banner,
        admin::list_testimonials,
        admin::create_testimonial,
        admin::update_testimonial,
        admin::delete_testimonial,
        admin::list_faqs,
        admin::create_faq,
        admin::update_faq,
        admin::delete_faq,
        admin::list_categories,
        admin::create_category,
        admin::list_inquiries,
        admin::update_inquiry,
        admin::delete_inquiry,
        admin::get_settings,
        admin::put_settings,
        upload::upload_handler,
    ),
    components(schemas(
        auth::LoginRequest,
        auth::LoginResponse,
        admin::DeleteResponse,
        upload::UploadResponse,
        dairy_cms_core::domain::UserProfile,
        dairy_cms_core::domain::Category,
        dairy_cms_core::domain::NewCategory,
        dairy_cms_core::domain::Product,
        dairy_cms_core::domain::ProductVariant,
        dairy_cms_core::domain::ProductWithCategory,
        dairy_cms_core::domain::VariantInput,
        dairy_cms_core::domain::NewProduct,
        dairy_cms_core::domain::Testimonial,
        dairy_cms_core::domain::NewTestimonial,
        dairy_cms_core::domain::Banner,
        dairy_cms_core::domain::NewBanner,
        dairy_cms_core::domain::Faq,
        dairy_cms_core::domain::NewFaq,
        dairy_cms_core::domain::Inquiry,
        dairy_cms_core::domain::InquiryStatus,
        dairy_cms_core::domain::NewInquiry,
        dairy_cms_core::domain::Settings,
        dairy_cms_core::domain::SocialLinks,
        dairy_cms_core::domain::DashboardStats,
        dairy_cms_core::patch::ProductPatch,
        dairy_cms_core::patch::BannerPatch,
        dairy_cms_core::patch::TestimonialPatch,
        dairy_cms_core::patch::FaqPatch,
        dairy_cms_core::patch::InquiryPatch,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dairy CMS API", description = "Content management and public content API for the dairy storefront.")
    )
)]
pub struct ApiDoc;
