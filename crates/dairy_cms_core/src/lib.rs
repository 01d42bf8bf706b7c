pub mod domain;
pub mod engine;
pub mod memory;
pub mod patch;
pub mod ports;

pub use domain::{
    Banner, Category, DashboardStats, Faq, Inquiry, InquiryStatus, NewBanner, NewCategory,
    NewFaq, NewInquiry, NewProduct, NewTestimonial, Product, ProductVariant,
    ProductWithCategory, Settings, SocialLinks, Testimonial, User, UserProfile,
    ValidationError, VariantInput,
};
pub use engine::{Engine, Resource};
pub use memory::MemoryStore;
pub use patch::{BannerPatch, FaqPatch, InquiryPatch, Patch, ProductPatch, TestimonialPatch};
pub use ports::{Collection, CollectionStore, StoreError, StoreResult};
