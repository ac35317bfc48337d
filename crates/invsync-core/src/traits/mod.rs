//! Core traits for the inventory canonicalization system

pub mod client;
pub mod collection;

pub use client::InventoryClient;
pub use collection::{CanonicalItem, Collection};
