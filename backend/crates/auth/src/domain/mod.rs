//! Domain Layer
//!
//! Entities, value objects, and collaborator traits.

pub mod entity;
pub mod repository;
pub mod value_object;
