//! Domain models and operation-specific parameter types.
//!
//! Models are plain data. Conversion from SeaORM entities happens at the repository
//! boundary through `from_entity`, which validates stored ids instead of casting.

pub mod audit;
pub mod discord;
pub mod profile;
pub mod role_gate;
pub mod ticket;
