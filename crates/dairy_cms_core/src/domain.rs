//! crates/dairy_cms_core/src/domain.rs
//!
//! Defines the entity types for every stored collection, plus the typed
//! create-request forms that carry the validation boundary. All wire JSON is
//! camelCase; the same shape is used for the persisted documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::engine::Resource;
use crate::ports::Collection;

/// A failed required-field check on a create request.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{field} is required")));
    }
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

//=========================================================================================
// Users
//=========================================================================================

/// A stored user record. The `password` field holds an argon2 hash and must
/// never leave the process; responses use [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// The sanitized view of a user returned by auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

impl Resource for User {
    const COLLECTION: Collection = Collection::Users;
    fn id(&self) -> &str {
        &self.id
    }
}

//=========================================================================================
// Categories
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sort_order: i64,
}

impl Resource for Category {
    const COLLECTION: Collection = Collection::Categories;
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sort_order: i64,
}

impl NewCategory {
    pub fn into_record(self) -> Result<Category, ValidationError> {
        require(&self.name, "name")?;
        require(&self.slug, "slug")?;
        Ok(Category {
            id: new_id(),
            name: self.name,
            slug: self.slug,
            sort_order: self.sort_order,
        })
    }
}

//=========================================================================================
// Products
//=========================================================================================

fn default_stock_status() -> String {
    "in_stock".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub size: String,
    pub price: f64,
    pub unit: String,
    #[serde(default = "default_stock_status")]
    pub stock_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub tagline: String,
    /// Soft link to a [`Category`]; may dangle, resolved at read time.
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amazon_link: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_stock_status")]
    pub stock_status: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Product {
    const COLLECTION: Collection = Collection::Products;
    fn id(&self) -> &str {
        &self.id
    }
    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A product joined with its resolved category for read responses.
/// A dangling `categoryId` resolves to `category: null`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

impl ProductWithCategory {
    pub fn resolve(product: Product, categories: &[Category]) -> Self {
        let category = product
            .category_id
            .as_deref()
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .cloned();
        Self { product, category }
    }
}

/// The variant shape accepted on create/update; ids are assigned server-side
/// when absent so the admin UI can send new variants without ids.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VariantInput {
    #[serde(default)]
    pub id: Option<String>,
    pub size: String,
    pub price: f64,
    pub unit: String,
    #[serde(default = "default_stock_status")]
    pub stock_status: String,
}

impl VariantInput {
    pub fn into_variant(self) -> ProductVariant {
        ProductVariant {
            id: self.id.unwrap_or_else(new_id),
            size: self.size,
            price: self.price,
            unit: self.unit,
            stock_status: self.stock_status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub variants: Vec<VariantInput>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amazon_link: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_stock_status")]
    pub stock_status: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u64,
}

impl NewProduct {
    pub fn into_record(self) -> Result<Product, ValidationError> {
        require(&self.name, "name")?;
        let now = Utc::now();
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.name)
        } else {
            self.slug
        };
        Ok(Product {
            id: new_id(),
            name: self.name,
            slug,
            tagline: self.tagline,
            category_id: self.category_id,
            short_description: self.short_description,
            long_description: self.long_description,
            variants: self.variants.into_iter().map(VariantInput::into_variant).collect(),
            images: self.images,
            amazon_link: self.amazon_link,
            benefits: self.benefits,
            is_featured: self.is_featured,
            is_published: self.is_published,
            stock_status: self.stock_status,
            rating: self.rating,
            review_count: self.review_count,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Lowercases and hyphenates a name into a URL slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

//=========================================================================================
// Testimonials
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    pub quote: String,
    /// Free-text product name, not a foreign key.
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Resource for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTestimonial {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    pub quote: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
}

impl NewTestimonial {
    pub fn into_record(self) -> Result<Testimonial, ValidationError> {
        require(&self.name, "name")?;
        require(&self.quote, "quote")?;
        Ok(Testimonial {
            id: new_id(),
            name: self.name,
            location: self.location,
            image: self.image,
            quote: self.quote,
            product: self.product,
            rating: self.rating,
            is_featured: self.is_featured,
            is_published: self.is_published,
            created_at: Utc::now(),
        })
    }
}

//=========================================================================================
// Banners
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: String,
    /// Free-text page tag ("home", "products", ...), not a foreign key.
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Resource for Banner {
    const COLLECTION: Collection = Collection::Banners;
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBanner {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: String,
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl NewBanner {
    pub fn into_record(self) -> Result<Banner, ValidationError> {
        require(&self.title, "title")?;
        Ok(Banner {
            id: new_id(),
            title: self.title,
            subtitle: self.subtitle,
            background_image: self.background_image,
            cta_text: self.cta_text,
            cta_link: self.cta_link,
            page: self.page,
            sort_order: self.sort_order,
            is_active: self.is_active,
            created_at: Utc::now(),
        })
    }
}

//=========================================================================================
// FAQs
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_published: bool,
}

impl Resource for Faq {
    const COLLECTION: Collection = Collection::Faqs;
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_published: bool,
}

impl NewFaq {
    pub fn into_record(self) -> Result<Faq, ValidationError> {
        require(&self.question, "question")?;
        require(&self.answer, "answer")?;
        Ok(Faq {
            id: new_id(),
            question: self.question,
            answer: self.answer,
            category: self.category,
            sort_order: self.sort_order,
            is_published: self.is_published,
        })
    }
}

//=========================================================================================
// Inquiries
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Replied,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub inquiry_type: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

impl Resource for Inquiry {
    const COLLECTION: Collection = Collection::Inquiries;
    fn id(&self) -> &str {
        &self.id
    }
}

/// The one public-facing write: anyone may submit an inquiry.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub inquiry_type: String,
}

impl NewInquiry {
    pub fn into_record(self) -> Result<Inquiry, ValidationError> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        require(&self.message, "message")?;
        Ok(Inquiry {
            id: new_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            inquiry_type: self.inquiry_type,
            status: InquiryStatus::New,
            created_at: Utc::now(),
        })
    }
}

//=========================================================================================
// Settings (singleton)
//=========================================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub twitter: String,
}

/// Site-wide settings. Stored as a singleton document; updates replace the
/// whole document, there is no field-level merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub phone2: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub amazon_store_url: String,
    #[serde(default)]
    pub fssai: String,
    #[serde(default)]
    pub social_links: SocialLinks,
}

//=========================================================================================
// Dashboard stats
//=========================================================================================

/// Derived collection counts for the admin dashboard; computed on demand.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products: usize,
    pub inquiries: usize,
    pub banners: usize,
    pub testimonials: usize,
    pub new_inquiries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Fresh Cow's Milk"), "fresh-cow-s-milk");
        assert_eq!(slugify("Pure Desi Ghee"), "pure-desi-ghee");
        assert_eq!(slugify("  Lassi!  "), "lassi");
    }

    #[test]
    fn new_product_requires_a_name() {
        let req: NewProduct = serde_json::from_value(serde_json::json!({ "name": "  " })).unwrap();
        assert!(req.into_record().is_err());
    }

    #[test]
    fn new_product_fills_slug_and_variant_ids() {
        let req: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Test Milk",
            "variants": [{ "size": "1L", "price": 50, "unit": "pouch", "stockStatus": "in_stock" }]
        }))
        .unwrap();
        let product = req.into_record().unwrap();
        assert_eq!(product.slug, "test-milk");
        assert!(!product.variants[0].id.is_empty());
        assert!(!product.is_published);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<NewInquiry, _> = serde_json::from_value(serde_json::json!({
            "name": "A", "email": "a@b.c", "message": "hi", "isAdmin": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn entities_round_trip_as_camel_case() {
        let req: NewBanner = serde_json::from_value(serde_json::json!({
            "title": "Hero", "sortOrder": 2, "isActive": true, "page": "home"
        }))
        .unwrap();
        let banner = req.into_record().unwrap();
        let value = serde_json::to_value(&banner).unwrap();
        assert_eq!(value["sortOrder"], 2);
        assert_eq!(value["isActive"], true);
        assert!(value.get("createdAt").is_some());
    }
}
