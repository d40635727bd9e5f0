//! Inventory operation pipeline (application-level orchestration).
//!
//! Every mutating operation runs the same steps:
//!
//! ```text
//! Command
//!   ↓
//! 1. Handle command (pure decision logic, produces one event)
//!   ↓
//! 2. Apply the event to a copy of the inventory
//!   ↓
//! 3. Store::save(copy)        → name-sorted canonical inventory
//!   ↓
//! 4. Ledger::append(movement)
//!   ↓
//! 5. Commit the saved copy as the in-memory inventory
//! ```
//!
//! Rejected commands stop at step 1 with nothing written. A failed save stops at
//! step 3 with the in-memory inventory untouched. A failed append rewrites the
//! store with the previous inventory before reporting, so store, ledger and
//! memory stay in agreement.

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use minimart_core::{Aggregate, DomainError, Price, ProductCode};
use minimart_inventory::{
    AddProduct, AdjustQuantity, Inventory, InventoryCommand, Movement, Product, Selection, Sell,
};

use crate::ledger::{Ledger, LedgerError};
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Business rule or operator input rejection (deterministic).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading or rewriting the product store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Appending to the ledger failed; the store was rolled back to the previous state.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Owns the session's inventory together with its store and ledger.
#[derive(Debug)]
pub struct InventoryService<S, L> {
    inventory: Inventory,
    store: S,
    ledger: L,
    clock: fn() -> NaiveDateTime,
}

impl<S, L> InventoryService<S, L>
where
    S: Store,
    L: Ledger,
{
    /// Load the inventory from `store` (empty if nothing is persisted yet).
    pub fn open(store: S, ledger: L) -> Result<Self, ServiceError> {
        let inventory = store.load()?;
        tracing::info!(products = inventory.len(), "inventory loaded");
        Ok(Self {
            inventory,
            store,
            ledger,
            clock: local_now,
        })
    }

    /// Replace the wall clock used to timestamp movements.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_parts(self) -> (Inventory, S, L) {
        (self.inventory, self.store, self.ledger)
    }

    /// Register a new product; logs an `Entry` for its initial quantity.
    pub fn add_product(
        &mut self,
        code: ProductCode,
        name: &str,
        quantity: u64,
        price: Price,
    ) -> Result<Movement, ServiceError> {
        let occurred_at = (self.clock)();
        self.execute(InventoryCommand::AddProduct(AddProduct {
            code,
            name: name.to_string(),
            quantity,
            price,
            occurred_at,
        }))
    }

    /// Resolve an operator selector (exact code or name substring) for `adjust_quantity`.
    pub fn select(&self, selector: &str) -> Result<Selection, ServiceError> {
        Ok(self.inventory.select(selector)?)
    }

    /// Apply a signed manual change to a product's stock.
    pub fn adjust_quantity(
        &mut self,
        code: &ProductCode,
        delta: i64,
    ) -> Result<Movement, ServiceError> {
        let occurred_at = (self.clock)();
        self.execute(InventoryCommand::AdjustQuantity(AdjustQuantity {
            code: code.clone(),
            delta,
            occurred_at,
        }))
    }

    /// Record a sale of `quantity` units of the product with exactly this code.
    pub fn sell(&mut self, code: &ProductCode, quantity: i64) -> Result<Movement, ServiceError> {
        let occurred_at = (self.clock)();
        self.execute(InventoryCommand::Sell(Sell {
            code: code.clone(),
            quantity,
            occurred_at,
        }))
    }

    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.inventory.search(term)
    }

    pub fn low_stock_report(&self, threshold: u64) -> Vec<&Product> {
        self.inventory.low_stock(threshold)
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.inventory.sorted_by_name()
    }

    /// Final save at the end of a session.
    pub fn save(&mut self) -> Result<(), ServiceError> {
        let saved = self.store.save(self.inventory.clone())?;
        tracing::info!(products = saved.len(), "inventory saved");
        self.inventory = saved;
        Ok(())
    }

    fn execute(&mut self, command: InventoryCommand) -> Result<Movement, ServiceError> {
        let event = self.inventory.handle(&command).inspect_err(|err| {
            tracing::warn!(error = %err, "operation rejected");
        })?;

        let mut next = self.inventory.clone();
        next.apply(&event);

        let saved = self.store.save(next).inspect_err(|err| {
            tracing::error!(error = %err, "store save failed; inventory unchanged");
        })?;

        if let Err(err) = self.ledger.append(event.movement()) {
            tracing::error!(
                error = %err,
                "ledger append failed; restoring previous store contents"
            );
            if let Err(restore) = self.store.save(self.inventory.clone()) {
                tracing::error!(
                    error = %restore,
                    "store restore failed; store is ahead of the ledger"
                );
            }
            return Err(err.into());
        }

        self.inventory = saved;

        let movement = event.into_movement();
        tracing::info!(
            code = %movement.code,
            kind = %movement.kind,
            delta = movement.quantity_delta,
            "stock movement recorded"
        );
        Ok(movement)
    }
}
