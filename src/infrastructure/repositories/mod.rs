// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_work_item_repository;
pub mod json_work_item_repository;

pub use in_memory_work_item_repository::InMemoryWorkItemRepository;
pub use json_work_item_repository::JsonFileWorkItemRepository;
