//! Seed command - Populates the store with demo users and products.
//!
//! Skips users whose email is already present, so reseeding an existing
//! database only tops up what is missing.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::{Credential, NewProduct, ProductKind};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, ProductRepository, ProductStore, UserRepository, UserStore};

/// Demo accounts created by the seed
const DEMO_USERS: &[(&str, &str)] = &[
    ("admin@colchoneria.test", "CambiamePronto1!"),
    ("demo@colchoneria.test", "DemoPassword1!"),
];

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Seeding demo data...");

    let db = Arc::new(Database::connect(&config).await);
    let users = UserStore::new(db.get_connection());
    let products = ProductStore::new(db.get_connection());

    let seeded_users = seed_users(&users).await?;
    let seeded_products = seed_products(&products).await?;

    tracing::info!(
        "Seed complete: {} users, {} products inserted",
        seeded_users,
        seeded_products
    );

    Ok(())
}

async fn seed_users(users: &UserStore) -> AppResult<u64> {
    let mut batch = Vec::new();
    for (email, password) in DEMO_USERS {
        if users.find_by_email(email).await?.is_some() {
            tracing::debug!("User {} already present, skipping", email);
            continue;
        }
        batch.push((email.to_string(), Credential::new(password)));
    }

    users.insert_many(batch).await
}

async fn seed_products(products: &ProductStore) -> AppResult<u64> {
    let demo_products = vec![
        NewProduct {
            kind: ProductKind::Colchon,
            name: "Colchón Viscoelástico 150x190".to_string(),
            price: "299.99".to_string(),
            image: "https://cdn.colchoneria.test/colchon-visco.jpg".to_string(),
            description: "Núcleo de espuma HR con capa viscoelástica de 5 cm.".to_string(),
            is_featured: true,
        },
        NewProduct {
            kind: ProductKind::Colchon,
            name: "Colchón de Muelles Ensacados 135x190".to_string(),
            price: "249.50".to_string(),
            image: "https://cdn.colchoneria.test/colchon-muelles.jpg".to_string(),
            description: "Muelles ensacados con refuerzo lumbar.".to_string(),
            is_featured: false,
        },
        NewProduct {
            kind: ProductKind::Somier,
            name: "Somier Láminas de Haya 150x190".to_string(),
            price: "129.00".to_string(),
            image: "https://cdn.colchoneria.test/somier-laminas.jpg".to_string(),
            description: "Láminas de haya vaporizada sobre estructura de acero.".to_string(),
            is_featured: true,
        },
    ];

    let mut inserted = 0;
    for product in demo_products {
        match products.insert(product).await {
            Ok(_) => inserted += 1,
            Err(AppError::StoreUnavailable(e)) => return Err(AppError::StoreUnavailable(e)),
            Err(e) => {
                tracing::warn!("Skipping demo product: {}", e);
            }
        }
    }

    Ok(inserted)
}
