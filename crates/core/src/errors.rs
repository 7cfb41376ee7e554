use thiserror::Error;

use crate::domain::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product {id} not found in catalog")]
    NotFound { id: ProductId },
    #[error("catalog transport failure: {0}")]
    Transport(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage read failure: {0}")]
    Read(String),
    #[error("storage write failure: {0}")]
    Write(String),
}

/// Operation-internal failure. Never escapes a cart operation: each public
/// operation catches this at its boundary and converts it to a single
/// [`CartNotice`](crate::notify::CartNotice).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("requested quantity of product {product_id} exceeds available stock")]
    OutOfStock { product_id: ProductId },
    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },
}
