/// Application layer - Use cases and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
mod asset_inventory;
pub mod dto;
pub mod factories;
pub mod use_cases;

pub use asset_inventory::AssetInventory;
