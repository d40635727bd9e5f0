//! Human-readable rendering of inventory listings.

use std::io::{self, Write};

use minimart_inventory::Product;

use crate::input::MenuOption;

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== INVENTORY SYSTEM - Minimarket ===")?;
    for option in MenuOption::ALL {
        writeln!(out, "{}. {}", option.number(), option.label())?;
    }
    Ok(())
}

/// Fixed-width table of products, in the order given.
pub fn table(out: &mut impl Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        writeln!(out)?;
        writeln!(out, "The inventory is empty.")?;
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "=== CURRENT INVENTORY ===")?;
    writeln!(out, "{:<10} {:<25} {:<10} {:<10}", "CODE", "PRODUCT", "QUANTITY", "PRICE")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for p in products {
        writeln!(
            out,
            "{:<10} {:<25} {:<10} {:<10}",
            p.code().as_str(),
            p.name(),
            p.quantity(),
            p.price().to_string()
        )?;
    }
    Ok(())
}

pub fn search_results(out: &mut impl Write, products: &[&Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No matches found.");
    }
    writeln!(out)?;
    writeln!(out, "=== SEARCH RESULTS ===")?;
    for p in products {
        writeln!(
            out,
            "Code: {} | Product: {} | Quantity: {} | Price: {}",
            p.code(),
            p.name(),
            p.quantity(),
            p.price()
        )?;
    }
    Ok(())
}

pub fn low_stock(out: &mut impl Write, threshold: u64, products: &[&Product]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== PRODUCTS WITH STOCK AT OR BELOW {threshold} ===")?;
    if products.is_empty() {
        return writeln!(out, "No low-stock products.");
    }
    for p in products {
        writeln!(out, "! {} ({}) - Quantity: {}", p.name(), p.code(), p.quantity())?;
    }
    Ok(())
}

/// Numbered candidates for disambiguation.
pub fn candidates(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Several products match:")?;
    for (i, p) in products.iter().enumerate() {
        writeln!(
            out,
            "{}. {} (Code: {}) | Quantity: {}",
            i + 1,
            p.name(),
            p.code(),
            p.quantity()
        )?;
    }
    Ok(())
}
