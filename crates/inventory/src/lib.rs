//! Inventory domain module.
//!
//! Business rules for the shop's stock, implemented purely as deterministic
//! domain logic (no IO, no file formats, no console).

pub mod inventory;
pub mod movement;
pub mod product;

pub use inventory::{
    AddProduct, AdjustQuantity, DEFAULT_LOW_STOCK_THRESHOLD, Inventory, InventoryCommand,
    InventoryEvent, Selection, Sell,
};
pub use movement::{Movement, MovementKind, TIMESTAMP_FORMAT};
pub use product::Product;
