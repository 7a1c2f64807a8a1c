//! Persistence and remote storage layer.
//!
//! Repositories here perform database operations (via SeaORM entities) and remote
//! manifest reads/writes (via the GitHub contents API), converting raw records into
//! domain models at the boundary.

pub mod manifest;
pub mod ticket;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
mod test;
