// Repository ports implemented by the infrastructure layer

pub mod work_item_repository;

pub use work_item_repository::WorkItemRepository;
