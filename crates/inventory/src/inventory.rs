use chrono::NaiveDateTime;

use minimart_core::{Aggregate, DomainError, DomainResult, Entity, Price, ProductCode};

use crate::movement::{Movement, MovementKind, NOTE_MANUAL_UPDATE, NOTE_NEW_PRODUCT, NOTE_SALE};
use crate::product::Product;

/// Quantity at or below which a product shows up in the low-stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 15;

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProduct {
    pub code: ProductCode,
    pub name: String,
    pub quantity: u64,
    pub price: Price,
    pub occurred_at: NaiveDateTime,
}

/// Command: AdjustQuantity (signed manual change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustQuantity {
    pub code: ProductCode,
    pub delta: i64,
    pub occurred_at: NaiveDateTime,
}

/// Command: Sell.
///
/// `quantity` is signed so that zero or negative operator input is reported as
/// out of range rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sell {
    pub code: ProductCode,
    pub quantity: i64,
    pub occurred_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCommand {
    AddProduct(AddProduct),
    AdjustQuantity(AdjustQuantity),
    Sell(Sell),
}

/// Event emitted by a successful command. Each carries exactly one movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    ProductRegistered { product: Product, movement: Movement },
    StockChanged { movement: Movement },
}

impl InventoryEvent {
    /// The audit record for this event.
    pub fn movement(&self) -> &Movement {
        match self {
            InventoryEvent::ProductRegistered { movement, .. } => movement,
            InventoryEvent::StockChanged { movement } => movement,
        }
    }

    pub fn into_movement(self) -> Movement {
        match self {
            InventoryEvent::ProductRegistered { movement, .. } => movement,
            InventoryEvent::StockChanged { movement } => movement,
        }
    }
}

/// Result of resolving an operator selector against the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Unique(Product),
    /// Several products matched; the operator picks one by 1-based ordinal.
    Ambiguous(Vec<Product>),
}

impl Selection {
    pub fn candidates(&self) -> &[Product] {
        match self {
            Selection::Unique(p) => core::slice::from_ref(p),
            Selection::Ambiguous(ps) => ps,
        }
    }

    /// Pick a candidate by its 1-based position in `candidates()`.
    pub fn choose(self, ordinal: usize) -> DomainResult<Product> {
        let mut candidates = match self {
            Selection::Unique(p) => vec![p],
            Selection::Ambiguous(ps) => ps,
        };
        let max = candidates.len();
        if ordinal == 0 || ordinal > max {
            return Err(DomainError::InvalidChoice {
                choice: ordinal,
                max,
            });
        }
        Ok(candidates.swap_remove(ordinal - 1))
    }
}

fn by_name(a: &Product, b: &Product) -> core::cmp::Ordering {
    a.name_key()
        .cmp(&b.name_key())
        .then_with(|| a.code().cmp(b.code()))
}

/// The in-memory product mapping (code → product).
///
/// Iteration order is the order products were loaded or saved in; after every
/// save it is the name order produced by [`Inventory::into_sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    products: Vec<Product>,
    version: u64,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an inventory from loaded products, rejecting duplicate codes.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut inventory = Self::empty();
        for product in products {
            inventory.insert(product)?;
        }
        Ok(inventory)
    }

    /// Append a loaded product. Does not count as an applied event.
    pub fn insert(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.code()) {
            return Err(DomainError::DuplicateCode(product.code().to_string()));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn get(&self, code: &ProductCode) -> Option<&Product> {
        self.products.iter().find(|p| p.code() == code)
    }

    pub fn contains(&self, code: &ProductCode) -> bool {
        self.get(code).is_some()
    }

    /// Same products, reordered by name (case-insensitive, code breaks ties).
    pub fn into_sorted(mut self) -> Self {
        self.products.sort_by(by_name);
        self
    }

    /// All products ordered by name, without touching the stored order.
    pub fn sorted_by_name(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| by_name(a, b));
        products
    }

    /// Case-insensitive substring match against code or name.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.code().as_str().to_lowercase().contains(&term) || p.name_key().contains(&term)
            })
            .collect()
    }

    /// Products with `quantity <= threshold`, in iteration order.
    pub fn low_stock(&self, threshold: u64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity() <= threshold)
            .collect()
    }

    /// Resolve a selector: exact code (case-insensitive) or substring of the name.
    pub fn select(&self, selector: &str) -> DomainResult<Selection> {
        let needle = selector.trim().to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.code().matches_ignore_case(&needle) || p.name_key().contains(&needle))
            .cloned()
            .collect();

        match matches.len() {
            0 => Err(DomainError::not_found(selector.trim())),
            1 => Ok(Selection::Unique(matches.remove(0))),
            _ => Ok(Selection::Ambiguous(matches)),
        }
    }

    fn require(&self, code: &ProductCode) -> DomainResult<&Product> {
        self.get(code)
            .ok_or_else(|| DomainError::not_found(code.as_str()))
    }

    fn handle_add(&self, cmd: &AddProduct) -> DomainResult<InventoryEvent> {
        if self.contains(&cmd.code) {
            return Err(DomainError::DuplicateCode(cmd.code.to_string()));
        }
        let delta = i64::try_from(cmd.quantity)
            .map_err(|_| DomainError::validation("initial quantity is too large"))?;
        let product = Product::new(cmd.code.clone(), cmd.name.clone(), cmd.quantity, cmd.price)?;

        let movement = Movement {
            occurred_at: cmd.occurred_at,
            kind: MovementKind::Entry,
            code: cmd.code.clone(),
            name: product.label().to_string(),
            quantity_delta: delta,
            note: NOTE_NEW_PRODUCT.to_string(),
        };
        Ok(InventoryEvent::ProductRegistered { product, movement })
    }

    fn handle_adjust(&self, cmd: &AdjustQuantity) -> DomainResult<InventoryEvent> {
        let product = self.require(&cmd.code)?;

        let new_quantity = i128::from(product.quantity()) + i128::from(cmd.delta);
        if new_quantity < 0 {
            return Err(DomainError::NegativeStock {
                current: product.quantity(),
                delta: cmd.delta,
            });
        }
        if new_quantity > i128::from(u64::MAX) {
            return Err(DomainError::OutOfRange {
                requested: cmd.delta,
                available: product.quantity(),
            });
        }

        Ok(InventoryEvent::StockChanged {
            movement: Movement {
                occurred_at: cmd.occurred_at,
                kind: MovementKind::for_manual_delta(cmd.delta),
                code: cmd.code.clone(),
                name: product.label().to_string(),
                quantity_delta: cmd.delta,
                note: NOTE_MANUAL_UPDATE.to_string(),
            },
        })
    }

    fn handle_sell(&self, cmd: &Sell) -> DomainResult<InventoryEvent> {
        let product = self.require(&cmd.code)?;

        let available = product.quantity();
        if cmd.quantity <= 0 || cmd.quantity.unsigned_abs() > available {
            return Err(DomainError::OutOfRange {
                requested: cmd.quantity,
                available,
            });
        }

        Ok(InventoryEvent::StockChanged {
            movement: Movement {
                occurred_at: cmd.occurred_at,
                kind: MovementKind::Sale,
                code: cmd.code.clone(),
                name: product.label().to_string(),
                quantity_delta: -cmd.quantity,
                note: NOTE_SALE.to_string(),
            },
        })
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ProductRegistered { product, .. } => {
                self.products.push(product.clone());
            }
            InventoryEvent::StockChanged { movement } => {
                let target = self.products.iter_mut().find(|p| p.code() == &movement.code);
                if let Some(product) = target {
                    let quantity = product
                        .quantity()
                        .saturating_add_signed(movement.quantity_delta);
                    product.set_quantity(quantity);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Self::Event, Self::Error> {
        match command {
            InventoryCommand::AddProduct(cmd) => self.handle_add(cmd),
            InventoryCommand::AdjustQuantity(cmd) => self.handle_adjust(cmd),
            InventoryCommand::Sell(cmd) => self.handle_sell(cmd),
        }
    }
}
