pub mod identity;
pub mod pending;
