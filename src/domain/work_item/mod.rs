// Work item domain module
// A work item is a caller-submitted request routed to a remote agent

#![allow(clippy::module_inception)]

pub mod work_item;

pub use work_item::WorkItem;
