mod inventory_factory;

pub use inventory_factory::{ConfiguredInventory, InventoryFactory, PolicyClients, SearchClients};
