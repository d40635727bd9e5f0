//! Parsing of operator-typed values.

use minimart_core::{DomainError, DomainResult};

/// Menu entries, numbered as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddProduct,
    AdjustQuantity,
    Sell,
    Search,
    List,
    LowStockReport,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::AddProduct,
        MenuOption::AdjustQuantity,
        MenuOption::Sell,
        MenuOption::Search,
        MenuOption::List,
        MenuOption::LowStockReport,
        MenuOption::Exit,
    ];

    /// Unknown input yields `None`; the shell re-prompts.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "1" => Some(MenuOption::AddProduct),
            "2" => Some(MenuOption::AdjustQuantity),
            "3" => Some(MenuOption::Sell),
            "4" => Some(MenuOption::Search),
            "5" => Some(MenuOption::List),
            "6" => Some(MenuOption::LowStockReport),
            "7" => Some(MenuOption::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuOption::AddProduct => 1,
            MenuOption::AdjustQuantity => 2,
            MenuOption::Sell => 3,
            MenuOption::Search => 4,
            MenuOption::List => 5,
            MenuOption::LowStockReport => 6,
            MenuOption::Exit => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::AddProduct => "Add new product",
            MenuOption::AdjustQuantity => "Update existing stock",
            MenuOption::Sell => "Register sale",
            MenuOption::Search => "Search product",
            MenuOption::List => "Show inventory",
            MenuOption::LowStockReport => "Low-stock report",
            MenuOption::Exit => "Exit",
        }
    }
}

/// Signed whole number (stock deltas, sale quantities).
pub fn parse_integer(text: &str) -> DomainResult<i64> {
    let text = text.trim();
    text.parse()
        .map_err(|_| DomainError::parse(format!("'{text}' is not a whole number")))
}

/// Initial stock for a new product.
pub fn parse_quantity(text: &str) -> DomainResult<u64> {
    let value = parse_integer(text)?;
    u64::try_from(value).map_err(|_| DomainError::validation("quantity cannot be negative"))
}

/// 1-based position in a numbered list.
pub fn parse_ordinal(text: &str) -> DomainResult<usize> {
    let text = text.trim();
    text.parse()
        .map_err(|_| DomainError::parse(format!("'{text}' is not a list number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_round_trip() {
        for option in MenuOption::ALL {
            assert_eq!(MenuOption::parse(&option.number().to_string()), Some(option));
        }
        assert_eq!(MenuOption::parse(" 7\n"), Some(MenuOption::Exit));
        assert_eq!(MenuOption::parse("8"), None);
        assert_eq!(MenuOption::parse("add"), None);
    }

    #[test]
    fn numbers_are_validated() {
        assert_eq!(parse_integer(" -4 ").unwrap(), -4);
        assert!(matches!(parse_integer("4.5"), Err(DomainError::Parse(_))));
        assert_eq!(parse_quantity("10").unwrap(), 10);
        assert!(matches!(parse_quantity("-1"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_ordinal("-1"), Err(DomainError::Parse(_))));
        assert_eq!(parse_ordinal("2").unwrap(), 2);
    }
}
