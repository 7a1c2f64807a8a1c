//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database.
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let jar = fixture::artifact::mod_jar("dungeons_guide_loader")?;
//! ```

pub mod artifact;
pub mod manifest;
