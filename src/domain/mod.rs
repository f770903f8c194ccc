//! Domain aggregates exposed by the order history service layer.

pub mod history;
pub mod order;
pub mod reorder;
pub mod types;
