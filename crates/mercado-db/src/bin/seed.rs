//! # Seed Data Generator
//!
//! Populates the database with development data: a handful of customers,
//! a product catalog with stock, and the common payment methods.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p mercado-db --bin seed
//!
//! # Specify database path
//! cargo run -p mercado-db --bin seed -- --db ./data/mercado.db
//! ```

use std::env;

use mercado_core::{Money, NewCustomer, NewPaymentMethod, NewProduct};
use mercado_db::{Database, DbConfig};

/// Seed customers: name, email, city.
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ana Souza", "ana.souza@example.com", "São Paulo"),
    ("Bruno Lima", "bruno.lima@example.com", "Curitiba"),
    ("Carla Mendes", "carla.mendes@example.com", "Recife"),
    ("Diego Alves", "diego.alves@example.com", "Porto Alegre"),
    ("Elisa Castro", "elisa.castro@example.com", "Belo Horizonte"),
];

/// Seed products: name, whole-unit price, stock quantity.
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Rice 5kg", 24, 120),
    ("Black Beans 1kg", 9, 200),
    ("Olive Oil 500ml", 32, 60),
    ("Ground Coffee 500g", 18, 150),
    ("Sugar 1kg", 5, 300),
    ("Wheat Flour 1kg", 6, 180),
    ("Spaghetti 500g", 4, 250),
    ("Tomato Sauce 340g", 3, 400),
    ("Whole Milk 1L", 6, 220),
    ("Butter 200g", 12, 90),
];

/// Seed payment methods: name, max installments.
const PAYMENT_METHODS: &[(&str, i64)] = &[
    ("Cash", 1),
    ("Debit Card", 1),
    ("Credit Card", 12),
    ("Bank Transfer", 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mercado_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mercado Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mercado_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mercado Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed on top of existing data
    let existing = db.customers().list().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} customers", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding customers...");
    for (name, email, city) in CUSTOMERS {
        db.customers()
            .insert(&NewCustomer {
                name: name.to_string(),
                email: Some(email.to_string()),
                postal_code: None,
                street: None,
                number: None,
                complement: None,
                neighborhood: None,
                city: Some(city.to_string()),
                state: None,
            })
            .await?;
    }
    println!("  {} customers", CUSTOMERS.len());

    println!("Seeding products...");
    for (name, price_units, quantity) in PRODUCTS {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                price: Money::from_units(*price_units),
                quantity: *quantity,
            })
            .await?;
    }
    println!("  {} products", PRODUCTS.len());

    println!("Seeding payment methods...");
    for (name, installments) in PAYMENT_METHODS {
        db.payment_methods()
            .insert(&NewPaymentMethod {
                name: name.to_string(),
                installments: *installments,
            })
            .await?;
    }
    println!("  {} payment methods", PAYMENT_METHODS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
