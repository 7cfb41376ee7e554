pub mod client;

pub use client::HttpCatalogClient;
