use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product shape served by the catalog's `products/{id}` endpoint. Carries no
/// quantity; a cart line is built from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

/// A cart line item. `amount` is the quantity currently in the cart and is
/// always at least 1; removal, not a zero amount, is the deletion path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
}

/// Availability figure served by the catalog's `stock/{id}` endpoint.
/// Consulted on add/update, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// Ordered, id-unique sequence of cart line items. The helpers build a new
/// candidate `Cart` instead of mutating in place, so a failed write-through
/// never leaves a half-applied state behind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Quantity currently in the cart, 0 when the product is absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.items.iter().find(|item| item.id == id).map_or(0, |item| item.amount)
    }

    /// One more unit of `product`: increments an existing line, or appends a
    /// new line with amount 1, preserving insertion order.
    pub fn with_added_unit(&self, product: &CatalogProduct) -> Cart {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.id == product.id) {
            Some(line) => line.amount += 1,
            None => items.push(Product {
                id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.image.clone(),
                amount: 1,
            }),
        }
        Cart { items }
    }

    /// Cart without the line for `id`, or `None` when no such line exists.
    pub fn with_removed(&self, id: ProductId) -> Option<Cart> {
        if !self.contains(id) {
            return None;
        }
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Some(Cart { items })
    }

    /// Cart with the line for `id` set to exactly `amount`, or `None` when no
    /// such line exists. `amount` must already be validated as positive.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Cart> {
        if !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    Product { amount, ..item.clone() }
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Cart { items })
    }
}
