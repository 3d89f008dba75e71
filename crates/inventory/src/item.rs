use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId};

/// Unit price in the smallest currency unit (e.g. paise, cents).
///
/// Non-negative by construction; displayed with two decimal places.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn minor_units(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    /// Parses decimal input such as `"350"`, `"12.5"` or `"0.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (units, fraction) = s.split_once('.').unwrap_or((s, ""));

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (units.is_empty() && fraction.is_empty())
            || !is_digits(units)
            || !is_digits(fraction)
            || fraction.len() > 2
        {
            return Err(DomainError::validation(format!("invalid price: {s:?}")));
        }

        let overflow = || DomainError::validation(format!("price out of range: {s:?}"));
        let units: u64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| overflow())?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .map(Self)
            .ok_or_else(overflow)
    }
}

/// Who to call when an item needs restocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierContact {
    pub name: String,
    pub phone: String,
}

/// Insert payload for a record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub price: Price,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_phone: String,
}

impl NewInventoryItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(())
    }
}

/// A persisted inventory record (a book or other product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    price: Price,
    quantity: i64,
    supplier_name: String,
    supplier_phone: String,
}

impl InventoryItem {
    /// Build a record from a validated insert payload.
    pub fn from_new(id: ItemId, new: NewInventoryItem) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name,
            price: new.price,
            quantity: new.quantity,
            supplier_name: new.supplier_name,
            supplier_phone: new.supplier_phone,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn supplier_phone(&self) -> &str {
        &self.supplier_phone
    }

    pub fn supplier(&self) -> SupplierContact {
        SupplierContact {
            name: self.supplier_name.clone(),
            phone: self.supplier_phone.clone(),
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Copy of this record carrying a new quantity.
    ///
    /// Callers go through `adjust_quantity` first; negative values are refused.
    pub fn with_quantity(&self, quantity: i64) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(Self {
            quantity,
            ..self.clone()
        })
    }
}

/// Stored rows pass the same validation as inserts.
impl<'de> Deserialize<'de> for InventoryItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Row {
            id: ItemId,
            #[serde(flatten)]
            fields: NewInventoryItem,
        }

        let row = Row::deserialize(deserializer)?;
        Self::from_new(row.id, row.fields).map_err(serde::de::Error::custom)
    }
}
