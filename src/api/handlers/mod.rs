// HTTP handlers grouped by resource

pub mod agents;
pub mod routing;
