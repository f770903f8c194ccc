//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::order::{Company, NewCompany, NewOrder, Order};
use crate::domain::reorder::ReorderPayload;
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderListQuery, OrderReader, OrderWriter, ReorderReader, ReorderWriter};

mock! {
    pub Repository {}

    impl OrderReader for Repository {
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
        fn get_order(&self, id: &OrderId, customer_id: &str) -> RepositoryResult<Option<Order>>;
    }

    impl OrderWriter for Repository {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    }

    impl ReorderReader for Repository {
        fn get_pending_reorder(&self, customer_id: &str) -> RepositoryResult<Option<ReorderPayload>>;
    }

    impl ReorderWriter for Repository {
        fn save_pending_reorder(&self, customer_id: &str, payload: &ReorderPayload) -> RepositoryResult<()>;
    }
}
