use minimart_core::{DomainError, DomainResult, Entity, Price, ProductCode};

/// A stocked product.
///
/// `quantity` is unsigned, so "stock never negative" is a type-level fact; the
/// inventory rejects any change that would need it to be otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    code: ProductCode,
    name: String,
    quantity: u64,
    price: Price,
}

impl Product {
    pub fn new(
        code: ProductCode,
        name: impl Into<String>,
        quantity: u64,
        price: Price,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            code,
            name,
            quantity,
            price,
        })
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }

    pub(crate) fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name_and_rejects_blank() {
        let code = ProductCode::new("A1").unwrap();
        let p = Product::new(code.clone(), "  Soda ", 10, Price::from_cents(150)).unwrap();
        assert_eq!(p.name(), "Soda");
        assert_eq!(p.label(), "Soda");
        assert_eq!(p.id(), &code);

        let err = Product::new(code, " ", 1, Price::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
