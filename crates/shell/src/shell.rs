//! Interactive menu loop.
//!
//! The shell only parses operator input and renders results; every rule lives
//! in the inventory domain and every write goes through `InventoryService`.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use minimart_core::{DomainError, Price, ProductCode};
use minimart_infra::{InventoryService, Ledger, ServiceError, Store};
use minimart_inventory::Selection;

use crate::input::{self, MenuOption};
use crate::render;

/// Failures that end the session. Operation errors never do.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("final save failed: {0}")]
    Save(#[from] ServiceError),
}

/// One operator session over `input`/`output`.
pub struct Shell<R, W, S, L> {
    service: InventoryService<S, L>,
    input: R,
    output: W,
    low_stock_threshold: u64,
}

impl<R, W, S, L> Shell<R, W, S, L>
where
    R: BufRead,
    W: Write,
    S: Store,
    L: Ledger,
{
    pub fn new(
        service: InventoryService<S, L>,
        input: R,
        output: W,
        low_stock_threshold: u64,
    ) -> Self {
        Self {
            service,
            input,
            output,
            low_stock_threshold,
        }
    }

    pub fn into_parts(self) -> (InventoryService<S, L>, W) {
        (self.service, self.output)
    }

    /// Run the menu until option 7 (or end of input), then save once more.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            render::menu(&mut self.output)?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                tracing::info!("input closed; exiting");
                break;
            };

            match MenuOption::parse(&choice) {
                Some(MenuOption::AddProduct) => self.add_product()?,
                Some(MenuOption::AdjustQuantity) => self.adjust_quantity()?,
                Some(MenuOption::Sell) => self.sell()?,
                Some(MenuOption::Search) => self.search()?,
                Some(MenuOption::List) => self.list()?,
                Some(MenuOption::LowStockReport) => self.low_stock_report()?,
                Some(MenuOption::Exit) => break,
                None => writeln!(self.output, "Invalid option, please try again.")?,
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "Saving inventory and closing...")?;
        self.service.save()?;
        self.output.flush()?;
        Ok(())
    }

    /// Print `message`, then read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &ServiceError) -> io::Result<()> {
        match err {
            ServiceError::Domain(e) => self.reject(e),
            ServiceError::Store(_) | ServiceError::Ledger(_) => {
                tracing::error!(error = %err, "operation could not be persisted");
                writeln!(self.output, "Error: {err}. The operation was not saved.")
            }
        }
    }

    fn reject(&mut self, err: &DomainError) -> io::Result<()> {
        writeln!(self.output, "Error: {err}.")
    }

    fn list(&mut self) -> io::Result<()> {
        let products = self.service.list_all();
        render::table(&mut self.output, &products)
    }

    fn add_product(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Enter the product code: ")? else {
            return Ok(());
        };
        let code = match ProductCode::new(&code) {
            Ok(code) => code,
            Err(e) => return self.reject(&e),
        };
        if self.service.inventory().contains(&code) {
            self.reject(&DomainError::DuplicateCode(code.to_string()))?;
            return self.list();
        }

        let Some(name) = self.prompt("Enter the product name: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt("Enter the initial quantity: ")? else {
            return Ok(());
        };
        let quantity = match input::parse_quantity(&quantity) {
            Ok(q) => q,
            Err(e) => return self.reject(&e),
        };
        let Some(price) = self.prompt("Enter the product price: ")? else {
            return Ok(());
        };
        let price: Price = match price.parse() {
            Ok(p) => p,
            Err(e) => return self.reject(&e),
        };

        match self.service.add_product(code, &name, quantity, price) {
            Ok(movement) => {
                writeln!(self.output, "Product '{}' added.", movement.name)?;
                self.list()
            }
            Err(e) => self.report(&e),
        }
    }

    fn adjust_quantity(&mut self) -> io::Result<()> {
        if self.service.inventory().is_empty() {
            writeln!(self.output)?;
            return writeln!(self.output, "No products registered.");
        }
        self.list()?;

        let selector = self.prompt("Enter the code or name of the product to update: ")?;
        let Some(selector) = selector else {
            return Ok(());
        };
        let selection = match self.service.select(&selector) {
            Ok(selection) => selection,
            Err(e) => return self.report(&e),
        };

        let product = match selection {
            Selection::Unique(product) => product,
            Selection::Ambiguous(candidates) => {
                render::candidates(&mut self.output, &candidates)?;
                let choice = self.prompt("Select the number of the product to update: ")?;
                let Some(choice) = choice else {
                    return Ok(());
                };
                let chosen = input::parse_ordinal(&choice)
                    .and_then(|ordinal| Selection::Ambiguous(candidates).choose(ordinal));
                match chosen {
                    Ok(product) => product,
                    Err(e) => return self.reject(&e),
                }
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "Selected product: {} (Code: {})", product.name(), product.code())?;
        writeln!(self.output, "Current quantity: {} units", product.quantity())?;

        let delta = self.prompt("Enter the change in quantity (negative to subtract): ")?;
        let Some(delta) = delta else {
            return Ok(());
        };
        let delta = match input::parse_integer(&delta) {
            Ok(d) => d,
            Err(e) => return self.reject(&e),
        };

        match self.service.adjust_quantity(product.code(), delta) {
            Ok(_) => {
                let quantity = self
                    .service
                    .inventory()
                    .get(product.code())
                    .map(|p| p.quantity())
                    .unwrap_or_default();
                writeln!(
                    self.output,
                    "Stock updated: '{}' now has {} units.",
                    product.name(),
                    quantity
                )
            }
            Err(e) => self.report(&e),
        }
    }

    fn sell(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Enter the code of the product sold: ")? else {
            return Ok(());
        };
        let code = match ProductCode::new(&code) {
            Ok(code) => code,
            Err(e) => return self.reject(&e),
        };
        if !self.service.inventory().contains(&code) {
            return self.reject(&DomainError::not_found(code.as_str()));
        }

        let Some(quantity) = self.prompt("Enter the quantity sold: ")? else {
            return Ok(());
        };
        let quantity = match input::parse_integer(&quantity) {
            Ok(q) => q,
            Err(e) => return self.reject(&e),
        };

        match self.service.sell(&code, quantity) {
            Ok(movement) => writeln!(
                self.output,
                "Sale registered. {} units of '{}' deducted.",
                -movement.quantity_delta,
                movement.name
            ),
            Err(e) => self.report(&e),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(term) = self.prompt("Enter the product name or code to search: ")? else {
            return Ok(());
        };
        let matches = self.service.search(&term);
        render::search_results(&mut self.output, &matches)
    }

    fn low_stock_report(&mut self) -> io::Result<()> {
        let threshold = self.low_stock_threshold;
        let products = self.service.low_stock_report(threshold);
        render::low_stock(&mut self.output, threshold, &products)
    }
}
