use serde::Serialize;

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

/// Entity: Product.
///
/// Invariants (enforced by [`Product::new`]):
/// - `name` is non-empty after trimming
/// - `price` is finite and non-negative
/// - `inventory` is non-negative (stored as `i64`, the width of the SQLite column)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    inventory: i64,
    category: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        inventory: i64,
        category: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if inventory < 0 {
            return Err(DomainError::validation("inventory cannot be negative"));
        }

        Ok(Self {
            id,
            name,
            price,
            inventory,
            category: category.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn inventory(&self) -> i64 {
        self.inventory
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    #[test]
    fn new_keeps_all_fields() {
        let product = Product::new(id("p-1"), "Widget", 9.99, 50, "Hardware").unwrap();

        assert_eq!(product.id(), &id("p-1"));
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price(), 9.99);
        assert_eq!(product.inventory(), 50);
        assert_eq!(product.category(), "Hardware");
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Product::new(id("p-1"), "   ", 1.0, 1, "c").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn new_rejects_negative_price() {
        let err = Product::new(id("p-1"), "Widget", -0.01, 1, "c").unwrap_err();
        assert_eq!(err, DomainError::validation("price cannot be negative"));
    }

    #[test]
    fn new_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Product::new(id("p-1"), "Widget", price, 1, "c").is_err());
        }
    }

    #[test]
    fn new_rejects_negative_inventory() {
        let err = Product::new(id("p-1"), "Widget", 1.0, -1, "c").unwrap_err();
        assert_eq!(err, DomainError::validation("inventory cannot be negative"));
    }

    #[test]
    fn inventory_beyond_32_bits_is_allowed() {
        let product = Product::new(id("p-1"), "Bolt", 0.01, 5_000_000_000, "c").unwrap();
        assert_eq!(product.inventory(), 5_000_000_000);

        let product = Product::new(id("p-2"), "Bolt", 0.01, i64::MAX, "c").unwrap();
        assert_eq!(product.inventory(), i64::MAX);
    }

    #[test]
    fn zero_price_and_empty_category_are_allowed() {
        let product = Product::new(id("p-1"), "Freebie", 0.0, 0, "").unwrap();
        assert_eq!(product.price(), 0.0);
        assert_eq!(product.category(), "");
    }

    #[test]
    fn identity_is_by_id() {
        let a = Product::new(id("p-1"), "A", 1.0, 1, "c").unwrap();
        let b = Product::new(id("p-1"), "B", 2.0, 2, "d").unwrap();
        let c = Product::new(id("p-2"), "A", 1.0, 1, "c").unwrap();

        assert!(a.is_same_entity(&b));
        assert!(!a.is_same_entity(&c));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: any valid input round-trips into the entity unchanged.
            #[test]
            fn valid_inputs_are_preserved(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                price in 0.0f64..1_000_000.0,
                inventory in 0..=i64::MAX,
                category in "[A-Za-z ]{0,20}",
            ) {
                let product = Product::new(ProductId::generate(), name.clone(), price, inventory, category.clone()).unwrap();
                prop_assert_eq!(product.name(), name.as_str());
                prop_assert_eq!(product.price(), price);
                prop_assert_eq!(product.inventory(), inventory);
                prop_assert_eq!(product.category(), category.as_str());
            }

            /// Property: negative prices are always rejected.
            #[test]
            fn negative_prices_are_rejected(price in -1_000_000.0f64..-0.0001) {
                let result = Product::new(ProductId::generate(), "Widget", price, 1, "c");
                prop_assert!(matches!(result, Err(DomainError::Validation(_))));
            }
        }
    }
}
