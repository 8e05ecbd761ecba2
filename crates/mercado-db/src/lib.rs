//! # mercado-db: Database Layer for the Mercado Back Office
//!
//! SQLite persistence via sqlx: connection pool, embedded migrations and
//! one repository per aggregate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Back Office Data Flow                           │
//! │                                                                     │
//! │  mercado-service (workflows, registries)                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                  mercado-db (THIS CRATE)                    │    │
//! │  │                                                             │    │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌──────────────┐   │    │
//! │  │   │  Database  │   │  Repositories  │   │  Migrations  │   │    │
//! │  │   │ (pool.rs)  │◄──│ customer.rs    │   │  (embedded)  │   │    │
//! │  │   │            │   │ product.rs     │   │ 001_init.sql │   │    │
//! │  │   │ SqlitePool │   │ payment_…rs    │   │              │   │    │
//! │  │   │            │   │ sale.rs        │   │              │   │    │
//! │  │   └────────────┘   └────────────────┘   └──────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode, foreign keys ON)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercado_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/mercado.db")).await?;
//! let customers = db.customers().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::payment_method::PaymentMethodRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
