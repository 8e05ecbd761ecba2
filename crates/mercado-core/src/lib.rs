//! # mercado-core: Pure Business Logic for the Mercado Back Office
//!
//! This crate is the heart of the back office. It contains the domain
//! types and business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Mercado Back Office Layers                        │
//! │                                                                     │
//! │  HTTP transport (external collaborator, not in this workspace)     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  mercado-service  ── sales workflow, registries, read composer     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  mercado-db       ── SQLite repositories, migrations               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ★ mercado-core (THIS CRATE) ★                                     │
//! │                                                                     │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐                      │
//! │   │   types   │  │   money   │  │ validation│                      │
//! │   │ Customer  │  │   Money   │  │   rules   │                      │
//! │   │  Product  │  │ 4-decimal │  │  checks   │                      │
//! │   │   Sale    │  │fixed point│  │           │                      │
//! │   └───────────┘  └───────────┘  └───────────┘                      │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, PaymentMethod, Sale, ...)
//! - [`money`] - Money type with 4-decimal fixed-point arithmetic
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, no side effects
//! 2. **No I/O**: database, network and file access are FORBIDDEN here
//! 3. **Fixed-Point Money**: all monetary values are scaled i64, never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

/// Maximum accepted length for entity names (customers, products,
/// payment methods). Longer input is rejected before it reaches the store.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum quantity accepted for a single sale line.
///
/// Guards against obvious typos (1000 instead of 10) before the stock
/// check runs.
pub const MAX_LINE_QUANTITY: i64 = 9_999;
