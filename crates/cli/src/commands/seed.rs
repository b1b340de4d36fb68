//! Seed the catalog with the starter caps.
//!
//! Idempotent: if the caps table already has rows, the seed is skipped.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default: sqlite://caps_store.db)

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

use caps_store_api::db::{self, CapRepository};
use caps_store_api::models::NewCap;

/// Seed the catalog.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_or_else(|_| SecretString::from("sqlite://caps_store.db"), SecretString::from);

    let pool = db::create_pool(&database_url).await?;
    let caps = CapRepository::new(&pool);

    if caps.count().await? > 0 {
        info!("Caps already exist, skipping seed");
        return Ok(());
    }

    let starter_caps = starter_caps();
    let total = starter_caps.len();

    for cap in &starter_caps {
        caps.create(cap).await?;
    }

    info!("Added {total} caps to the database");
    Ok(())
}

/// The starter catalog.
fn starter_caps() -> Vec<NewCap> {
    vec![
        NewCap {
            name: "Classic Baseball Cap".to_owned(),
            name_ar: "قبعة بيسبول كلاسيكية".to_owned(),
            description: "Premium cotton baseball cap with adjustable strap. Perfect for casual wear and sports activities.".to_owned(),
            description_ar: "قبعة بيسبول قطنية فاخرة مع حزام قابل للتعديل. مثالية للارتداء اليومي والأنشطة الرياضية.".to_owned(),
            price: Decimal::new(4599, 2),
            image_url: "https://images.unsplash.com/photo-1521369909029-2afed882baee?w=500".to_owned(),
            category: "baseball".to_owned(),
            brand: "Sleven".to_owned(),
            color: "Navy Blue".to_owned(),
            size: "Adjustable".to_owned(),
            stock_quantity: 50,
            is_featured: true,
        },
        NewCap {
            name: "Luxury Leather Cap".to_owned(),
            name_ar: "قبعة جلدية فاخرة".to_owned(),
            description: "Handcrafted genuine leather cap with premium finish. Elegant design for sophisticated style.".to_owned(),
            description_ar: "قبعة جلدية أصلية مصنوعة يدوياً بلمسة نهائية فاخرة. تصميم أنيق لإطلالة متطورة.".to_owned(),
            price: Decimal::new(12999, 2),
            image_url: "https://images.unsplash.com/photo-1588850561407-ed78c282e89b?w=500".to_owned(),
            category: "luxury".to_owned(),
            brand: "Sleven".to_owned(),
            color: "Black".to_owned(),
            size: "L".to_owned(),
            stock_quantity: 25,
            is_featured: true,
        },
        NewCap {
            name: "Snapback Cap".to_owned(),
            name_ar: "قبعة سناب باك".to_owned(),
            description: "Modern snapback cap with flat brim. Street style meets comfort in this trendy design.".to_owned(),
            description_ar: "قبعة سناب باك عصرية بحافة مسطحة. أسلوب الشارع يلتقي بالراحة في هذا التصميم العصري.".to_owned(),
            price: Decimal::new(3999, 2),
            image_url: "https://images.unsplash.com/photo-1575428652377-a2d80e2040ae?w=500".to_owned(),
            category: "snapback".to_owned(),
            brand: "Sleven".to_owned(),
            color: "White".to_owned(),
            size: "Adjustable".to_owned(),
            stock_quantity: 75,
            is_featured: false,
        },
        NewCap {
            name: "Trucker Hat".to_owned(),
            name_ar: "قبعة ترابر".to_owned(),
            description: "Mesh back trucker hat with foam front panel. Breathable and comfortable for outdoor activities.".to_owned(),
            description_ar: "قبعة ترابر بظهر شبكي ولوحة أمامية إسفنجية. قابلة للتنفس ومريحة للأنشطة الخارجية.".to_owned(),
            price: Decimal::new(3299, 2),
            image_url: "https://images.unsplash.com/photo-1586790170083-2f9ceadc732d?w=500".to_owned(),
            category: "trucker".to_owned(),
            brand: "Sleven".to_owned(),
            color: "Red".to_owned(),
            size: "Adjustable".to_owned(),
            stock_quantity: 60,
            is_featured: false,
        },
        NewCap {
            name: "Beanie Cap".to_owned(),
            name_ar: "قبعة بيني".to_owned(),
            description: "Soft knitted beanie perfect for cold weather. Warm, comfortable, and stylish.".to_owned(),
            description_ar: "قبعة بيني محبوكة ناعمة مثالية للطقس البارد. دافئة ومريحة وأنيقة.".to_owned(),
            price: Decimal::new(2499, 2),
            image_url: "https://images.unsplash.com/photo-1576871337632-b9aef4c17ab9?w=500".to_owned(),
            category: "beanie".to_owned(),
            brand: "Sleven".to_owned(),
            color: "Gray".to_owned(),
            size: "One Size".to_owned(),
            stock_quantity: 100,
            is_featured: true,
        },
        NewCap {
            name: "Bucket Hat".to_owned(),
            name_ar: "قبعة باكت".to_owned(),
            description: "Classic bucket hat with wide brim for sun protection. Perfect for summer adventures.".to_owned(),
            description_ar: "قبعة باكت كلاسيكية بحافة عريضة للحماية من الشمس. مثالية لمغامرات الصيف.".to_owned(),
            price: Decimal::new(3599, 2),
            image_url: "https://images.unsplash.com/photo-1567393528677-d6adae7d4a0a?w=500".to_owned(),
            category: "bucket".to_owned(),
            brand: "Sleven".to_owned(),
            color: "Khaki".to_owned(),
            size: "M".to_owned(),
            stock_quantity: 40,
            is_featured: false,
        },
    ]
}
