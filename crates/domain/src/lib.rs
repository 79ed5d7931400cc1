//! Domain layer for ChaosCart
//!
//! Contains the order entity, its status state machine, and domain errors.
//! This layer has no external dependencies beyond serialization and time.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
