pub mod app_config;
pub mod catalog_file;
pub mod memory_repo;

pub use memory_repo::InMemoryItemRepository;
