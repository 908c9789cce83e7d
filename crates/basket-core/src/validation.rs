//! # Validation Module
//!
//! Input validation for everything a renderer can forward into the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validate-then-Mutate                               │
//! │                                                                         │
//! │  Renderer intent (name, price, raw quantity text)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: reject malformed input                                   │
//! │  ├── empty / oversized names                                           │
//! │  ├── NaN, infinite, zero, negative or oversized prices                 │
//! │  └── negative, fractional, non-numeric or oversized quantities         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  CartStore mutation (only reached with valid input)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{parse_quantity, validate_product_name};
//!
//! assert_eq!(validate_product_name("  Widget ").unwrap(), "Widget");
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("-1").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `MAX_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price and converts it to Money.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive once converted (so `0.00001` is rejected)
/// - Must not exceed `MAX_UNIT_PRICE`
///
/// ## Example
/// ```rust
/// use basket_core::money::Money;
/// use basket_core::validation::validate_unit_price;
///
/// assert_eq!(validate_unit_price(9.99).unwrap(), Money::from_cents(999));
/// assert!(validate_unit_price(0.0).is_err());
/// assert!(validate_unit_price(-1.0).is_err());
/// assert!(validate_unit_price(f64::NAN).is_err());
/// assert!(validate_unit_price(1.0e14).is_err());
/// ```
pub fn validate_unit_price(price: f64) -> ValidationResult<Money> {
    let money = Money::from_decimal(price).ok_or_else(|| ValidationError::NotFinite {
        field: "price".to_string(),
    })?;

    if !money.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if money > MAX_UNIT_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(money)
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be non-negative (zero is valid and means "remove")
/// - Must not exceed `MAX_ITEM_QUANTITY` (999)
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(0), Ok(0));
/// assert!(validate_quantity(999).is_ok());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(qty)
}

/// Parses a quantity typed into a renderer's input field.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must be a number (`"abc"` and `""` are rejected)
/// - Must be whole (`"2.0"` is accepted as 2, `"2.5"` is rejected)
/// - Must be non-negative
///
/// ## Example
/// ```rust
/// use basket_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 4 ").unwrap(), 4);
/// assert_eq!(parse_quantity("2.0").unwrap(), 2);
/// assert!(parse_quantity("2.5").is_err());
/// assert!(parse_quantity("abc").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let text = raw.trim();

    if let Ok(qty) = text.parse::<i64>() {
        return validate_quantity(qty);
    }

    let not_a_number = || ValidationError::NotANumber {
        field: "quantity".to_string(),
        value: text.to_string(),
    };

    let value = text.parse::<f64>().map_err(|_| not_a_number())?;
    if !value.is_finite() {
        return Err(not_a_number());
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAWholeNumber {
            field: "quantity".to_string(),
            value: text.to_string(),
        });
    }
    if value > MAX_ITEM_QUANTITY as f64 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    validate_quantity(value as i64)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks that one more entry fits in a cart holding `current_entries`.
///
/// ## Rules
/// - Must not exceed `MAX_CART_ITEMS` (100) distinct entries
pub fn validate_cart_size(current_entries: usize) -> ValidationResult<()> {
    if current_entries >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart entries".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Widget"), Ok("Widget"));
        assert_eq!(validate_product_name("  Gadget  "), Ok("Gadget"));

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LEN)).is_ok());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert_eq!(validate_unit_price(9.99), Ok(Money::from_cents(999)));
        assert_eq!(validate_unit_price(5.005), Ok(Money::from_raw(50_050)));

        assert!(matches!(
            validate_unit_price(0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_unit_price(-2.5),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_unit_price(f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
        // Rounds to zero at four decimal places.
        assert!(validate_unit_price(0.00001).is_err());

        assert_eq!(validate_unit_price(1_000_000.0), Ok(MAX_UNIT_PRICE));
        assert!(matches!(
            validate_unit_price(1_000_000.01),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            validate_unit_price(1.0e14),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(0), Ok(0));
        assert_eq!(validate_quantity(7), Ok(7));
        assert_eq!(validate_quantity(MAX_ITEM_QUANTITY), Ok(MAX_ITEM_QUANTITY));
        assert!(validate_quantity(-1).is_err());
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(matches!(
            validate_cart_size(MAX_CART_ITEMS),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert_eq!(parse_quantity(" 0 "), Ok(0));
        assert_eq!(parse_quantity("2.0"), Ok(2));

        assert!(matches!(
            parse_quantity("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_quantity("-1.5"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert!(matches!(
            parse_quantity("abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_quantity(""),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_quantity("1000"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("1e30"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("NaN"),
            Err(ValidationError::NotANumber { .. })
        ));
    }
}
