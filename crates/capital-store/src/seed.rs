//! # Demo Catalog
//!
//! Starter data for a new installation: three departments, nine products
//! and one partly-sold batch each. No bills are seeded, so the counter
//! starts at `INV-000001`.

use capital_core::{Batch, Category, Money, Product, ProductStatus, ProductVariant};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::catalog::Catalog;

const CATEGORIES: &[(&str, &str)] = &[
    ("Men's Wear", "Traditional and modern menswear collection"),
    ("Ladies' Wear", "Elegant ladies ethnic and designer wear"),
    ("Kids' Wear", "Comfortable and stylish clothing for children"),
];

struct SeedProduct {
    category: usize,
    name: &'static str,
    sku: &'static str,
    /// (size, color, design)
    variants: &'static [(&'static str, &'static str, &'static str)],
    batch: SeedBatch,
}

struct SeedBatch {
    purchase: i64,
    sale: i64,
    quantity: i64,
    remaining: i64,
    supplier: &'static str,
    /// (month, day) in 2025
    received: (u32, u32),
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        category: 0,
        name: "White Cotton Kurta Pajama",
        sku: "MW-001",
        variants: &[
            ("M", "White", "Plain"),
            ("L", "White", "Plain"),
            ("XL", "White", "Plain"),
        ],
        batch: SeedBatch {
            purchase: 450,
            sale: 799,
            quantity: 50,
            remaining: 32,
            supplier: "Surat Cotton Mills",
            received: (10, 15),
        },
    },
    SeedProduct {
        category: 0,
        name: "Silk Pathani Suit",
        sku: "MW-002",
        variants: &[("M", "Beige", "Traditional"), ("L", "Brown", "Traditional")],
        batch: SeedBatch {
            purchase: 720,
            sale: 1299,
            quantity: 40,
            remaining: 28,
            supplier: "Banarasi Silk House",
            received: (10, 18),
        },
    },
    SeedProduct {
        category: 0,
        name: "Linen Nehru Jacket",
        sku: "MW-003",
        variants: &[("M", "Navy Blue", "Printed"), ("L", "Black", "Solid")],
        batch: SeedBatch {
            purchase: 580,
            sale: 999,
            quantity: 35,
            remaining: 8,
            supplier: "Rajasthan Linen Traders",
            received: (10, 20),
        },
    },
    SeedProduct {
        category: 1,
        name: "Pakistani Suit (Georgette)",
        sku: "LW-001",
        variants: &[
            ("M", "Pink", "Embroidered"),
            ("L", "Peach", "Embroidered"),
            ("XL", "Red", "Heavy Work"),
        ],
        batch: SeedBatch {
            purchase: 750,
            sale: 1499,
            quantity: 60,
            remaining: 35,
            supplier: "Mumbai Georgette Fabrics",
            received: (10, 12),
        },
    },
    SeedProduct {
        category: 1,
        name: "Rayon Anarkali Suit",
        sku: "LW-002",
        variants: &[("S", "Blue", "Floral Print"), ("M", "Green", "Block Print")],
        batch: SeedBatch {
            purchase: 480,
            sale: 899,
            quantity: 45,
            remaining: 6,
            supplier: "Delhi Rayon Textiles",
            received: (10, 16),
        },
    },
    SeedProduct {
        category: 1,
        name: "Crepe Palazzo Suit Set",
        sku: "LW-003",
        variants: &[("M", "Yellow", "Contemporary"), ("L", "Mint Green", "Modern")],
        batch: SeedBatch {
            purchase: 550,
            sale: 999,
            quantity: 50,
            remaining: 36,
            supplier: "Jaipur Crepe Collection",
            received: (10, 22),
        },
    },
    SeedProduct {
        category: 2,
        name: "Cotton Kids Kurta Set",
        sku: "KW-001",
        variants: &[
            ("2-3 Years", "White", "Traditional"),
            ("4-5 Years", "Cream", "Traditional"),
            ("6-7 Years", "White", "Traditional"),
        ],
        batch: SeedBatch {
            purchase: 280,
            sale: 549,
            quantity: 55,
            remaining: 38,
            supplier: "Surat Cotton Mills",
            received: (10, 10),
        },
    },
    SeedProduct {
        category: 2,
        name: "Silk Kids Sherwani",
        sku: "KW-002",
        variants: &[
            ("3-4 Years", "Maroon", "Embroidered"),
            ("5-6 Years", "Golden", "Designer"),
        ],
        batch: SeedBatch {
            purchase: 520,
            sale: 999,
            quantity: 30,
            remaining: 5,
            supplier: "Banarasi Silk House",
            received: (10, 14),
        },
    },
    SeedProduct {
        category: 2,
        name: "Net Fabric Kids Lehenga",
        sku: "KW-003",
        variants: &[
            ("3-4 Years", "Pink", "Party Wear"),
            ("5-6 Years", "Purple", "Festive"),
        ],
        batch: SeedBatch {
            purchase: 580,
            sale: 1099,
            quantity: 35,
            remaining: 25,
            supplier: "Ludhiana Net Fabrics",
            received: (10, 19),
        },
    },
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the demo catalog with fresh ids.
pub fn demo_catalog() -> Catalog {
    let now = Utc::now();
    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|(name, description)| Category {
            id: new_id(),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .collect();

    let mut products = Vec::with_capacity(PRODUCTS.len());
    let mut batches = Vec::with_capacity(PRODUCTS.len());

    for seed in PRODUCTS {
        let product = Product {
            id: new_id(),
            name: seed.name.to_string(),
            category_id: categories[seed.category].id.clone(),
            sku: seed.sku.to_string(),
            status: ProductStatus::Active,
            variants: seed
                .variants
                .iter()
                .map(|(size, color, design)| ProductVariant {
                    id: new_id(),
                    size: size.to_string(),
                    color: color.to_string(),
                    design: Some(design.to_string()),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };

        let b = &seed.batch;
        let (month, day) = b.received;
        batches.push(Batch {
            id: new_id(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            purchase_price: Money::from_major(b.purchase),
            sale_price: Money::from_major(b.sale),
            quantity: b.quantity,
            remaining: b.remaining,
            supplier: b.supplier.to_string(),
            date: NaiveDate::from_ymd_opt(2025, month, day).unwrap_or_default(),
            profit: Money::from_major(b.sale - b.purchase),
        });
        products.push(product);
    }

    Catalog {
        categories,
        products,
        batches,
        bills: Vec::new(),
        last_bill_number: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capital_core::validation::validate_sku;

    #[test]
    fn test_demo_catalog_is_consistent() {
        let catalog = demo_catalog();
        assert_eq!(catalog.categories.len(), 3);
        assert_eq!(catalog.products.len(), 9);
        assert_eq!(catalog.batches.len(), 9);
        assert!(catalog.bills.is_empty());

        for product in &catalog.products {
            assert!(validate_sku(&product.sku).is_ok());
            assert!(catalog.category(&product.category_id).is_some());
        }
        for batch in &catalog.batches {
            let product = catalog.product(&batch.product_id).unwrap();
            assert_eq!(batch.product_name, product.name);
            assert!(batch.remaining <= batch.quantity);
            assert_eq!(batch.profit, batch.sale_price - batch.purchase_price);
        }
    }

    #[test]
    fn test_demo_georgette_batch() {
        let catalog = demo_catalog();
        let product = catalog.product_with_sku("LW-001", None).unwrap();
        let batch = catalog
            .batches
            .iter()
            .find(|b| b.product_id == product.id)
            .unwrap();
        assert_eq!(batch.sale_price, Money::from_major(1499));
        assert_eq!(batch.sold(), 25);
        assert_eq!(batch.date, NaiveDate::from_ymd_opt(2025, 10, 12).unwrap());
    }
}
