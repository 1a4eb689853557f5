//! Fragrance catalog
//!
//! The catalog is a read-only table built once per process. Products are
//! copied by value into cart entries and chat request context, so nothing
//! downstream holds a borrow into it.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::sync::LazyLock;

static SIGNATURE_COLLECTION: LazyLock<Catalog> = LazyLock::new(Catalog::signature_collection);

/// The process-wide catalog
pub fn catalog() -> &'static Catalog {
    &SIGNATURE_COLLECTION
}

/// Unique product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Amount of USD held in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[cfg(test)]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dollars, cents) = (self.0 / 100, self.0 % 100);
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Money", 2)?;
        s.serialize_field("cents", &self.cents())?;
        s.serialize_field("display", &self.to_string())?;
        s.end()
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub description: String,
    /// Scent notes, comma separated
    pub notes: String,
    /// Accent color token consumed by the bottle renderer
    pub color: String,
}

impl Product {
    /// Individual scent notes in display order
    pub fn note_list(&self) -> impl Iterator<Item = &str> {
        self.notes.split(',').map(str::trim).filter(|n| !n.is_empty())
    }

    /// Leading note, shown as the caption in the product list
    pub fn headline_note(&self) -> Option<&str> {
        self.note_list().next()
    }
}

/// Ordered, read-only product table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Product shown when the page first loads
    pub fn default_product(&self) -> Option<&Product> {
        self.products.first()
    }

    fn signature_collection() -> Self {
        let product = |id: &str,
                       name: &str,
                       dollars: u64,
                       description: &str,
                       notes: &str,
                       color: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Money::from_dollars(dollars),
            description: description.to_string(),
            notes: notes.to_string(),
            color: color.to_string(),
        };

        Self::new(vec![
            product(
                "1",
                "Midnight Rose",
                125,
                "A deep, mysterious blend capturing the essence of a blooming garden under the moonlight. The signature vessel holds the secret to eternal elegance.",
                "Black Rose, Oud, Vanilla, Patchouli",
                "#be123c",
            ),
            product(
                "2",
                "Oceanic Drift",
                98,
                "Crisp and refreshing, like a cool breeze over the Atlantic. Encased in our classic glass silhouette, it brings clarity to the mind.",
                "Sea Salt, Bergamot, Driftwood, White Musk",
                "#0ea5e9",
            ),
            product(
                "3",
                "Golden Amber",
                150,
                "Warm, resinous, and inviting. This fragrance wraps you in a blanket of luxury. The bottle refracts light like a precious gem.",
                "Amber, Honey, Cinnamon, Tobacco",
                "#d97706",
            ),
            product(
                "4",
                "Verdant Vetiver",
                110,
                "Earthy and grounded. A sophisticated choice for those who walk their own path. Presented in our iconic crystal form.",
                "Vetiver, Green Tea, Cedar, Moss",
                "#059669",
            ),
            product(
                "5",
                "Noir Absolu",
                185,
                "Intense and unforgettable. A fragrance for the bold. The darkness of the scent contrasts with the clarity of the glass.",
                "Black Pepper, Leather, Incense, Dark Chocolate",
                "#475569",
            ),
        ])
    }
}
