// Infrastructure layer module
// Contains file/HTTP adapters and external service integrations
// Follows Hexagonal Architecture

pub mod repositories;
pub mod selectors;
pub mod transport;
