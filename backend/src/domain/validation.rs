//! Constraint checks for cake create and update requests.
//!
//! Every rule is evaluated and all violations are reported together, in a
//! fixed order: name, price, description. Lengths count Unicode scalar values
//! of the already-escaped text. Prices must fit the stored `NUMERIC(10, 2)`
//! column.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{CakeRequest, Price};

/// Maximum escaped name length.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum escaped description length.
pub const DESCRIPTION_MAX_CHARS: usize = 300;
/// Maximum number of decimal places in a price.
pub const PRICE_MAX_SCALE: u32 = 2;
/// Largest storable price, matching the `NUMERIC(10, 2)` column.
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

const NAME_BLANK: &str = "Cake name must not be blank";
const NAME_TOO_LONG: &str = "Cake name must be at most 100 characters";
const PRICE_MISSING: &str = "Cake price must not be null";
const PRICE_NOT_POSITIVE: &str = "Cake price must be greater than zero";
const PRICE_TOO_PRECISE: &str = "Cake price must have at most 2 decimal places";
const PRICE_TOO_LARGE: &str = "Cake price must be at most 99999999.99";
const DESCRIPTION_TOO_LONG: &str = "Cake description must be at most 300 characters";

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending request field.
    pub field: &'static str,
    /// Client-presentable description of the failure.
    pub message: &'static str,
}

impl FieldViolation {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_violations(.violations))]
pub struct CakeValidationError {
    violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CakeValidationError {
    /// Violations in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violations rendered as `field: message` strings.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// A request that satisfied every constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCake {
    name: String,
    price: Price,
    description: Option<String>,
}

impl ValidCake {
    /// Escaped name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positive price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Escaped description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Price, Option<String>) {
        (self.name, self.price, self.description)
    }
}

/// Check `request` against the cake constraints.
///
/// # Examples
/// ```
/// use cake_manager::domain::{CakeRequest, validate_cake_request};
///
/// let err = validate_cake_request(CakeRequest::default()).expect_err("empty request");
/// assert_eq!(
///     err.messages(),
///     ["name: Cake name must not be blank", "price: Cake price must not be null"]
/// );
/// ```
pub fn validate_cake_request(request: CakeRequest) -> Result<ValidCake, CakeValidationError> {
    let CakeRequest {
        name,
        price,
        description,
    } = request;
    let mut violations = Vec::new();

    let name = name.map(|text| text.into_inner());
    let name_text = name.as_deref().unwrap_or_default();
    if name_text.trim().is_empty() {
        violations.push(FieldViolation::new("name", NAME_BLANK));
    }
    if name_text.chars().count() > NAME_MAX_CHARS {
        violations.push(FieldViolation::new("name", NAME_TOO_LONG));
    }

    let price = match price {
        None => {
            violations.push(FieldViolation::new("price", PRICE_MISSING));
            None
        }
        Some(amount) => match Price::new(amount) {
            Ok(_) if amount.normalize().scale() > PRICE_MAX_SCALE => {
                violations.push(FieldViolation::new("price", PRICE_TOO_PRECISE));
                None
            }
            Ok(_) if amount > PRICE_MAX => {
                violations.push(FieldViolation::new("price", PRICE_TOO_LARGE));
                None
            }
            Ok(price) => Some(price),
            Err(_) => {
                violations.push(FieldViolation::new("price", PRICE_NOT_POSITIVE));
                None
            }
        },
    };

    let description = description.map(|text| text.into_inner());
    if description
        .as_deref()
        .is_some_and(|text| text.chars().count() > DESCRIPTION_MAX_CHARS)
    {
        violations.push(FieldViolation::new("description", DESCRIPTION_TOO_LONG));
    }

    match (name, price) {
        (Some(name), Some(price)) if violations.is_empty() => Ok(ValidCake {
            name,
            price,
            description,
        }),
        _ => Err(CakeValidationError { violations }),
    }
}
