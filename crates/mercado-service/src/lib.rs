//! # mercado-service: Workflow Layer for the Mercado Back Office
//!
//! The orchestration layer a transport (HTTP, CLI, desktop shell) calls
//! into. Pure types live in `mercado-core`, SQL lives in `mercado-db`;
//! this crate owns the decisions in between.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 mercado-service (THIS CRATE)                        │
//! │                                                                     │
//! │  ┌─────────────┐  ┌──────────────────────┐  ┌──────────────────┐   │
//! │  │ Registries  │  │    SalesService      │  │    SaleView      │   │
//! │  │ (registry)  │  │    (sales)           │  │    (view)        │   │
//! │  │             │  │                      │  │                  │   │
//! │  │ validation  │  │ reference resolution │  │ header + refs +  │   │
//! │  │ delete guard│  │ derived totals       │  │ joined lines     │   │
//! │  │             │  │ stock decrement      │  │                  │   │
//! │  └──────┬──────┘  └──────────┬───────────┘  └────────┬─────────┘   │
//! │         │                    │                       │             │
//! │         └────────────────────┼───────────────────────┘             │
//! │                              ▼                                     │
//! │                    mercado-db (repositories)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercado_db::{Database, DbConfig};
//! use mercado_service::Services;
//!
//! let db = Database::new(DbConfig::new("./mercado.db")).await?;
//! let services = Services::new(db);
//!
//! let sale = services.sales.create(new_sale).await?;
//! ```

pub mod error;
pub mod registry;
pub mod sales;
pub mod view;

pub use error::{ServiceError, ServiceResult};
pub use registry::{CustomerService, PaymentMethodService, ProductService};
pub use sales::SalesService;
pub use view::{LineItemView, SaleView};

use mercado_db::Database;

/// Composition root: one instance of every service, wired by hand from a
/// shared database handle. Cheap to clone; the pool inside is shared.
#[derive(Clone)]
pub struct Services {
    pub customers: CustomerService,
    pub products: ProductService,
    pub payment_methods: PaymentMethodService,
    pub sales: SalesService,
}

impl Services {
    /// Wires every service to the given database.
    pub fn new(db: Database) -> Self {
        Services {
            customers: CustomerService::new(db.clone()),
            products: ProductService::new(db.clone()),
            payment_methods: PaymentMethodService::new(db.clone()),
            sales: SalesService::new(db),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
