use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::order::{Company, NewCompany, NewOrder, Order};
use crate::domain::reorder::ReorderPayload;
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod order;
pub mod reorder;

/// Filter for a customer's order history.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub customer_id: String,
    pub limit: Option<usize>,
}

impl OrderListQuery {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub trait OrderReader {
    /// Orders of one customer, newest first, with merchant and items loaded.
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
    /// A single order, only if it belongs to `customer_id`.
    fn get_order(&self, id: &OrderId, customer_id: &str) -> RepositoryResult<Option<Order>>;
}

pub trait OrderWriter {
    /// Inserts the company. When `new_company.id` is set the row is stored
    /// under that id, replacing the fields of an existing row.
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    /// Stores the order and its items atomically.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
}

pub trait ReorderReader {
    fn get_pending_reorder(&self, customer_id: &str) -> RepositoryResult<Option<ReorderPayload>>;
}

pub trait ReorderWriter {
    /// Replaces whatever reorder the customer had pending.
    fn save_pending_reorder(
        &self,
        customer_id: &str,
        payload: &ReorderPayload,
    ) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
