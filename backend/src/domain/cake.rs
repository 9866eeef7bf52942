//! Cake catalogue entity, identifiers and write model.
//!
//! [`Cake`] is the persisted state handed back to callers. [`CakeRequest`]
//! is the untrusted create/update input; its text fields can only hold
//! [`SanitizedText`]. [`CakeRecord`] is what the service hands to storage
//! once a request has been validated.

use std::fmt;

use rust_decimal::Decimal;

use super::SanitizedText;
use super::validation::ValidCake;

/// Storage-assigned cake identifier.
///
/// # Examples
/// ```
/// use cake_manager::domain::CakeId;
///
/// let id = CakeId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CakeId(i32);

impl CakeId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for CakeId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceValidationError {
    /// Prices must be strictly greater than zero.
    #[error("price must be greater than zero, got {value}")]
    NotPositive {
        /// Rejected amount.
        value: Decimal,
    },
}

/// Exact, strictly positive decimal price.
///
/// # Examples
/// ```
/// use cake_manager::domain::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(999, 2)).expect("positive price");
/// assert_eq!(price.to_string(), "9.99");
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Validate and wrap a decimal amount.
    pub fn new(value: Decimal) -> Result<Self, PriceValidationError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PriceValidationError::NotPositive { value })
        }
    }

    /// Underlying decimal amount.
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted cake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cake {
    id: CakeId,
    name: String,
    price: Price,
    description: Option<String>,
}

impl Cake {
    /// Assemble a cake from stored state.
    #[must_use]
    pub fn new(id: CakeId, name: String, price: Price, description: Option<String>) -> Self {
        Self {
            id,
            name,
            price,
            description,
        }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub fn id(&self) -> CakeId {
        self.id
    }

    /// Escaped cake name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Cake price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Escaped description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Untrusted create or update input.
///
/// Text fields are [`SanitizedText`], so escaping is guaranteed to have
/// happened exactly once by the time the service sees the request. Missing
/// fields are reported by validation rather than by decoding.
///
/// # Examples
/// ```
/// use cake_manager::domain::CakeRequest;
/// use rust_decimal::Decimal;
///
/// let request = CakeRequest::from_raw(Some("<b>Eclair</b>"), Some(Decimal::ONE), None);
/// assert_eq!(
///     request.name.as_ref().map(|name| name.as_str()),
///     Some("&lt;b&gt;Eclair&lt;/b&gt;")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CakeRequest {
    /// Escaped name.
    pub name: Option<SanitizedText>,
    /// Requested price; unchecked until validation.
    pub price: Option<Decimal>,
    /// Escaped description.
    pub description: Option<SanitizedText>,
}

/// Request shape for `add_new_cake`.
pub type CakeCreateRequest = CakeRequest;
/// Request shape for `update_cake`.
pub type CakeUpdateRequest = CakeRequest;

impl CakeRequest {
    /// Build a request from raw, unescaped input.
    #[must_use]
    pub fn from_raw(name: Option<&str>, price: Option<Decimal>, description: Option<&str>) -> Self {
        Self {
            name: name.map(SanitizedText::sanitize),
            price,
            description: description.map(SanitizedText::sanitize),
        }
    }
}

/// Validated write model handed to the storage port.
///
/// `id` is `None` for a new cake and `Some` when overwriting an existing
/// one. All three mutable fields are always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CakeRecord {
    id: Option<CakeId>,
    name: String,
    price: Price,
    description: Option<String>,
}

impl CakeRecord {
    /// Record for a cake that storage has not seen yet.
    #[must_use]
    pub fn new(cake: ValidCake) -> Self {
        let (name, price, description) = cake.into_parts();
        Self {
            id: None,
            name,
            price,
            description,
        }
    }

    /// Record replacing every mutable field of cake `id`.
    #[must_use]
    pub fn with_id(id: CakeId, cake: ValidCake) -> Self {
        Self {
            id: Some(id),
            ..Self::new(cake)
        }
    }

    /// Identifier of the cake being overwritten, if any.
    #[must_use]
    pub fn id(&self) -> Option<CakeId> {
        self.id
    }

    /// Escaped cake name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Cake price.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Escaped description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Materialise the record as a stored cake with identifier `id`.
    #[must_use]
    pub fn into_cake(self, id: CakeId) -> Cake {
        Cake::new(id, self.name, self.price, self.description)
    }
}
