//! services/api/src/seed.rs
//!
//! First-run data bootstrap. Each collection is seeded only if its document
//! has never been written; an existing collection is never touched, even
//! partially, so restarts are safe.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use dairy_cms_core::domain::{
    Banner, Category, Faq, Product, ProductVariant, Settings, SocialLinks, Testimonial, User,
};
use dairy_cms_core::ports::{Collection, CollectionStore};
use dairy_cms_core::Resource;

use crate::error::ApiError;

pub const ADMIN_EMAIL: &str = "admin@gaushalafresh.com";
const ADMIN_DEFAULT_PASSWORD: &str = "admin123";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

async fn write_records<R: Resource>(
    store: &Arc<dyn CollectionStore>,
    records: &[R],
) -> Result<(), ApiError> {
    let value = serde_json::to_value(records)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize seed data: {e}")))?;
    store.write(R::COLLECTION, &value).await?;
    Ok(())
}

/// Populates the default dataset for any collection that does not exist yet.
/// Runs at startup, before the service accepts requests.
pub async fn run(store: &Arc<dyn CollectionStore>) -> Result<(), ApiError> {
    if !store.exists(Collection::Users).await? {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(ADMIN_DEFAULT_PASSWORD.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash seed password: {e}")))?
            .to_string();
        write_records(
            store,
            &[User {
                id: new_id(),
                email: ADMIN_EMAIL.to_string(),
                password: password_hash,
                name: "Admin".to_string(),
                role: "admin".to_string(),
                created_at: Utc::now(),
            }],
        )
        .await?;
        info!("Seeded default admin user ({})", ADMIN_EMAIL);
    }

    if !store.exists(Collection::Categories).await? {
        let category = |name: &str, slug: &str, sort_order: i64| Category {
            id: new_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            sort_order,
        };
        write_records(
            store,
            &[
                category("Milk", "milk", 1),
                category("Ghee", "ghee", 2),
                category("Dahi", "dahi", 3),
                category("Lassi", "lassi", 4),
            ],
        )
        .await?;
        info!("Seeded default categories");
    }

    if !store.exists(Collection::Products).await? {
        // Resolve category ids from whatever the categories collection holds
        // now, which may predate this run.
        let categories: Vec<Category> =
            serde_json::from_value(store.read(Collection::Categories).await?)
                .map_err(|e| ApiError::Internal(format!("Failed to read categories: {e}")))?;
        let category_id = |slug: &str| {
            categories
                .iter()
                .find(|c| c.slug == slug)
                .map(|c| c.id.clone())
        };
        let variant = |size: &str, price: f64, unit: &str| ProductVariant {
            id: new_id(),
            size: size.to_string(),
            price,
            unit: unit.to_string(),
            stock_status: "in_stock".to_string(),
        };
        let now = Utc::now();
        let product = |name: &str,
                       slug: &str,
                       tagline: &str,
                       category: Option<String>,
                       short: &str,
                       long: &str,
                       variants: Vec<ProductVariant>,
                       image: &str,
                       benefits: &[&str],
                       rating: f64,
                       review_count: u64| Product {
            id: new_id(),
            name: name.to_string(),
            slug: slug.to_string(),
            tagline: tagline.to_string(),
            category_id: category,
            short_description: short.to_string(),
            long_description: long.to_string(),
            variants,
            images: vec![image.to_string()],
            amazon_link: "https://amazon.in".to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
            is_featured: true,
            is_published: true,
            stock_status: "in_stock".to_string(),
            rating,
            review_count,
            created_at: now,
            updated_at: now,
        };
        write_records(
            store,
            &[
                product(
                    "Fresh Cow's Milk",
                    "fresh-cows-milk",
                    "Pure milk from happy cows",
                    category_id("milk"),
                    "Farm-fresh cow's milk from our grass-fed, free-range cows.",
                    "Collected fresh every morning and delivered within 24 hours. No preservatives, no additives, just pure wholesome milk the way nature intended.",
                    vec![
                        variant("500ml", 35.0, "pouch"),
                        variant("1 Liter", 65.0, "pouch"),
                        variant("2 Liter", 125.0, "pack"),
                    ],
                    "https://images.unsplash.com/photo-1563636619-e9143da7973b?w=800",
                    &["Farm Fresh", "No Preservatives", "Rich in Calcium"],
                    4.9,
                    2340,
                ),
                product(
                    "Pure Desi Ghee",
                    "pure-desi-ghee",
                    "The golden essence of tradition",
                    category_id("ghee"),
                    "Made using the traditional Bilona method.",
                    "Slow-churned to perfection with the rich aroma of grandmother's kitchen.",
                    vec![
                        variant("200g", 250.0, "jar"),
                        variant("500g", 550.0, "jar"),
                        variant("1kg", 999.0, "jar"),
                    ],
                    "https://images.unsplash.com/photo-1631452180519-c014fe946bc7?w=800",
                    &["Bilona Method", "High Smoke Point", "Omega-3 Rich"],
                    4.95,
                    1856,
                ),
                product(
                    "Fresh Dahi",
                    "fresh-dahi",
                    "Set curd with cultured taste",
                    category_id("dahi"),
                    "Thick, creamy dahi made from fresh cow's milk.",
                    "Perfect consistency, mildly tangy, and incredibly smooth.",
                    vec![
                        variant("200g", 30.0, "cup"),
                        variant("400g", 55.0, "cup"),
                        variant("1kg", 120.0, "pack"),
                    ],
                    "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=800",
                    &["Probiotics", "Aids Digestion", "No Preservatives"],
                    4.8,
                    1234,
                ),
                product(
                    "Fresh Lassi",
                    "fresh-lassi",
                    "Refreshing tradition in every sip",
                    category_id("lassi"),
                    "Signature lassi made fresh from thick dahi.",
                    "Churned to creamy perfection. Available in sweet and salted variants.",
                    vec![
                        variant("200ml Sweet", 35.0, "bottle"),
                        variant("200ml Salted", 35.0, "bottle"),
                        variant("500ml Sweet", 75.0, "bottle"),
                    ],
                    "https://images.unsplash.com/photo-1587304801900-75dee63b6ea0?w=800",
                    &["Cooling Effect", "Probiotic Rich", "Energy Booster"],
                    4.85,
                    987,
                ),
            ],
        )
        .await?;
        info!("Seeded sample products");
    }

    if !store.exists(Collection::Testimonials).await? {
        let testimonial = |name: &str, location: &str, image: &str, quote: &str, product: &str| {
            Testimonial {
                id: new_id(),
                name: name.to_string(),
                location: location.to_string(),
                image: image.to_string(),
                quote: quote.to_string(),
                product: product.to_string(),
                rating: 5,
                is_featured: true,
                is_published: true,
                created_at: Utc::now(),
            }
        };
        write_records(
            store,
            &[
                testimonial(
                    "Priya Sharma",
                    "Mumbai",
                    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=200",
                    "The taste of GauShala Fresh milk takes me back to my grandmother's village.",
                    "Fresh Milk",
                ),
                testimonial(
                    "Rajesh Patel",
                    "Ahmedabad",
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200",
                    "The ghee is absolutely incredible. The aroma is heavenly!",
                    "Pure Desi Ghee",
                ),
            ],
        )
        .await?;
        info!("Seeded testimonials");
    }

    if !store.exists(Collection::Banners).await? {
        write_records(
            store,
            &[Banner {
                id: new_id(),
                title: "Farm Fresh, Heart Blessed".to_string(),
                subtitle: "Experience the pure taste of tradition".to_string(),
                background_image:
                    "https://images.unsplash.com/photo-1500595046743-cd271d694d30?w=2000"
                        .to_string(),
                cta_text: "Explore Products".to_string(),
                cta_link: "/products".to_string(),
                page: "home".to_string(),
                sort_order: 1,
                is_active: true,
                created_at: Utc::now(),
            }],
        )
        .await?;
        info!("Seeded banners");
    }

    if !store.exists(Collection::Faqs).await? {
        write_records(
            store,
            &[
                Faq {
                    id: new_id(),
                    question: "How fresh is your milk?".to_string(),
                    answer: "Our milk is collected fresh every morning and delivered within 24 hours."
                        .to_string(),
                    category: "products".to_string(),
                    sort_order: 1,
                    is_published: true,
                },
                Faq {
                    id: new_id(),
                    question: "Do you deliver to my area?".to_string(),
                    answer: "We currently deliver across major cities. Contact us on WhatsApp to check availability."
                        .to_string(),
                    category: "delivery".to_string(),
                    sort_order: 2,
                    is_published: true,
                },
            ],
        )
        .await?;
        info!("Seeded FAQs");
    }

    if !store.exists(Collection::Inquiries).await? {
        store
            .write(Collection::Inquiries, &serde_json::Value::Array(Vec::new()))
            .await?;
    }

    if !store.exists(Collection::Settings).await? {
        let settings = Settings {
            site_name: "Shudh Dudh".to_string(),
            tagline: "100% Unadulterated".to_string(),
            phone: "+91-9815987765".to_string(),
            phone2: "+91-9988250038".to_string(),
            email: "jindal.dairy@gmail.com".to_string(),
            address: "House No. 43-A, Gian Colony, Sant Nagar, Patiala, Punjab - 147001"
                .to_string(),
            whatsapp_number: "919815987765".to_string(),
            amazon_store_url: String::new(),
            fssai: "12125681000197".to_string(),
            social_links: SocialLinks::default(),
        };
        let value = serde_json::to_value(&settings)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize settings: {e}")))?;
        store.write(Collection::Settings, &value).await?;
        info!("Seeded site settings");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{password_hash::PasswordHash, PasswordVerifier};
    use dairy_cms_core::{Inquiry, MemoryStore};

    #[tokio::test]
    async fn seed_populates_every_collection() {
        let store: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
        run(&store).await.unwrap();

        for name in Collection::ALL {
            assert!(store.exists(name).await.unwrap(), "{name} missing");
        }

        let users: Vec<User> =
            serde_json::from_value(store.read(Collection::Users).await.unwrap()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, ADMIN_EMAIL);
        assert_eq!(users[0].role, "admin");

        let parsed = PasswordHash::new(&users[0].password).unwrap();
        assert!(Argon2::default()
            .verify_password(b"admin123", &parsed)
            .is_ok());

        let categories: Vec<Category> =
            serde_json::from_value(store.read(Collection::Categories).await.unwrap()).unwrap();
        assert_eq!(categories.len(), 4);

        let products: Vec<Product> =
            serde_json::from_value(store.read(Collection::Products).await.unwrap()).unwrap();
        assert_eq!(products.len(), 4);
        assert!(products.iter().all(|p| p.variants.len() == 3));
        // Every seed product links to a real category.
        for product in &products {
            let id = product.category_id.as_deref().unwrap();
            assert!(categories.iter().any(|c| c.id == id));
        }

        let inquiries: Vec<Inquiry> =
            serde_json::from_value(store.read(Collection::Inquiries).await.unwrap()).unwrap();
        assert!(inquiries.is_empty());
    }

    #[tokio::test]
    async fn seed_never_overwrites_an_existing_collection() {
        let store: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
        store
            .write(
                Collection::Faqs,
                &serde_json::json!([{
                    "id": "kept", "question": "Q", "answer": "A",
                    "category": "", "sortOrder": 9, "isPublished": false
                }]),
            )
            .await
            .unwrap();

        run(&store).await.unwrap();
        run(&store).await.unwrap();

        let faqs: Vec<Faq> =
            serde_json::from_value(store.read(Collection::Faqs).await.unwrap()).unwrap();
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].id, "kept");

        let users: Vec<User> =
            serde_json::from_value(store.read(Collection::Users).await.unwrap()).unwrap();
        assert_eq!(users.len(), 1);
    }
}
