//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! remote JSON at the manifest store boundary. Services work only with these types.

pub mod manifest;
pub mod ticket;
pub mod update;
