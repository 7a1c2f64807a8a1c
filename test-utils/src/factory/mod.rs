//! Factory methods for creating persisted test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let ticket = factory::ticket::TicketFactory::new(&db)
//!     .state("open")
//!     .category("crash")
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod ticket;

pub use ticket::create_ticket;
