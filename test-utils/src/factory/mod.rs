//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let profile = factory::profile::create_profile(&db).await?;
//!     let verified = factory::profile::create_verified_profile(&db, "42").await?;
//!
//!     // Customize through the builder
//!     let ticket = factory::ticket::TicketFactory::new(&db)
//!         .owner_id("42")
//!         .role("Coach")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `profile` - Create student profile entities
//! - `ticket` - Create role request ticket entities
//! - `helpers` - Shared id generation

pub mod helpers;
pub mod profile;
pub mod ticket;

pub use profile::{create_profile, create_verified_profile};
pub use ticket::create_ticket;
