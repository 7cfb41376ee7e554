pub mod file;
pub mod memory;

pub use file::FileCartStorage;
pub use memory::InMemoryCartStorage;
