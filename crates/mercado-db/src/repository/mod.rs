//! # Repository Implementations
//!
//! One repository per aggregate, each owning its SQL. Repositories hold a
//! cloned pool handle and are cheap to construct; the service layer asks
//! [`crate::Database`] for a fresh one per call.
//!
//! Methods that must participate in a caller-owned transaction take a
//! `&mut SqliteConnection` instead of using the pool. The sales workflow
//! relies on this to keep header, line item and stock writes atomic.

pub mod customer;
pub mod payment_method;
pub mod product;
pub mod sale;
