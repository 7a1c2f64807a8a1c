//! SkyAnswers Test Utils
//!
//! Provides shared testing utilities for the bot's unit and integration tests. This crate
//! offers a builder pattern for creating test contexts with in-memory SQLite databases,
//! factories for persisted records, and fixtures for in-memory test data such as mod
//! artifacts.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Inserts records with sensible defaults
//! - **fixture**: Builds in-memory data without touching the database
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Ticket;
//!
//! #[tokio::test]
//! async fn test_ticket_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Ticket)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
