pub mod cart;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod telemetry;

pub use cart::{CartStorage, CartStore, CatalogClient, CART_STORAGE_KEY};
pub use domain::{Cart, CatalogProduct, Product, ProductId, Stock};
pub use errors::{CartError, CatalogError, StorageError};
pub use notify::{CartNotice, NotificationSink, TracingSink};
