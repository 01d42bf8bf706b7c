//! crates/dairy_cms_core/src/patch.rs
//!
//! Typed partial-update forms, one per mutable entity. Every field is
//! optional; a present field replaces the stored value at the top level.
//! Nested values (`variants`, `images`, `benefits`) are replaced wholesale
//! when present, never deep-merged. Unknown fields are rejected at
//! deserialization time instead of being stored verbatim.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    Banner, Faq, Inquiry, InquiryStatus, Product, Testimonial, VariantInput,
};

/// A partial update that can be applied over an existing record.
pub trait Patch<R>: Send {
    fn apply(self, record: &mut R);
}

macro_rules! set {
    ($record:ident, $patch:ident, { $($field:ident),+ $(,)? }) => {
        $(
            if let Some(value) = $patch.$field {
                $record.$field = value;
            }
        )+
    };
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub tagline: Option<String>,
    /// Replaces the soft link; there is no way to clear it short of pointing
    /// it at another category (matching the admin UI, which always sends one).
    pub category_id: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub variants: Option<Vec<VariantInput>>,
    pub images: Option<Vec<String>>,
    pub amazon_link: Option<String>,
    pub benefits: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub stock_status: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
}

impl Patch<Product> for ProductPatch {
    fn apply(self, record: &mut Product) {
        let patch = self;
        if let Some(variants) = patch.variants {
            record.variants = variants.into_iter().map(VariantInput::into_variant).collect();
        }
        if let Some(category_id) = patch.category_id {
            record.category_id = Some(category_id);
        }
        set!(record, patch, {
            name, slug, tagline, short_description, long_description, images,
            amazon_link, benefits, is_featured, is_published, stock_status,
            rating, review_count,
        });
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BannerPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub page: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl Patch<Banner> for BannerPatch {
    fn apply(self, record: &mut Banner) {
        let patch = self;
        set!(record, patch, {
            title, subtitle, background_image, cta_text, cta_link, page,
            sort_order, is_active,
        });
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub quote: Option<String>,
    pub product: Option<String>,
    pub rating: Option<u8>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
}

impl Patch<Testimonial> for TestimonialPatch {
    fn apply(self, record: &mut Testimonial) {
        let patch = self;
        set!(record, patch, {
            name, location, image, quote, product, rating, is_featured,
            is_published,
        });
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub sort_order: Option<i64>,
    pub is_published: Option<bool>,
}

impl Patch<Faq> for FaqPatch {
    fn apply(self, record: &mut Faq) {
        let patch = self;
        set!(record, patch, {
            question, answer, category, sort_order, is_published,
        });
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InquiryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: Option<String>,
    pub status: Option<InquiryStatus>,
}

impl Patch<Inquiry> for InquiryPatch {
    fn apply(self, record: &mut Inquiry) {
        let patch = self;
        set!(record, patch, {
            name, email, phone, subject, message, inquiry_type, status,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewInquiry, NewProduct};

    #[test]
    fn product_patch_replaces_variants_wholesale() {
        let req: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Milk",
            "variants": [
                { "size": "500ml", "price": 35, "unit": "pouch" },
                { "size": "1L", "price": 65, "unit": "pouch" }
            ]
        }))
        .unwrap();
        let mut product = req.into_record().unwrap();

        let patch: ProductPatch = serde_json::from_value(serde_json::json!({
            "variants": [{ "size": "2L", "price": 125, "unit": "pack" }]
        }))
        .unwrap();
        patch.apply(&mut product);

        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].size, "2L");
        // Untouched fields survive.
        assert_eq!(product.name, "Milk");
    }

    #[test]
    fn inquiry_patch_rejects_unknown_status() {
        let result: Result<InquiryPatch, _> =
            serde_json::from_value(serde_json::json!({ "status": "spam" }));
        assert!(result.is_err());

        let patch: InquiryPatch =
            serde_json::from_value(serde_json::json!({ "status": "replied" })).unwrap();
        let req: NewInquiry = serde_json::from_value(serde_json::json!({
            "name": "A", "email": "a@b.c", "message": "hello"
        }))
        .unwrap();
        let mut inquiry = req.into_record().unwrap();
        patch.apply(&mut inquiry);
        assert_eq!(inquiry.status, InquiryStatus::Replied);
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let result: Result<BannerPatch, _> =
            serde_json::from_value(serde_json::json!({ "titel": "typo" }));
        assert!(result.is_err());
    }
}
