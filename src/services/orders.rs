use chrono::FixedOffset;

use crate::domain::history::{OrderHistory, group_orders};
use crate::domain::order::Order;
use crate::domain::reorder::{ReorderPayload, prepare_reorder};
use crate::domain::types::OrderId;
use crate::dto::orders::{OrderCard, OrderDetail, OrderHistoryPageData, OrderHistoryQuery, Selection};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{OrderListQuery, OrderReader, ReorderReader, ReorderWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches the customer's orders, newest first.
fn load_orders<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders(OrderListQuery::new(&user.sub))
        .map_err(ServiceError::from)
}

/// Fetches one of the customer's orders; blank and foreign ids are not found.
fn load_order<R>(repo: &R, user: &AuthenticatedUser, order_id: &str) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_order(&order_id, &user.sub)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Loads the customer's orders grouped by day as list cards.
pub fn list_order_cards<R>(
    repo: &R,
    user: &AuthenticatedUser,
    offset: FixedOffset,
) -> ServiceResult<OrderHistory<OrderCard>>
where
    R: OrderReader + ?Sized,
{
    let orders = load_orders(repo, user)?;
    Ok(group_orders(&orders, offset).map(OrderCard::from))
}

/// Loads the order history page, with the detail dialog of `query.order` open
/// when that order is part of the history.
pub fn load_order_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrderHistoryQuery,
    offset: FixedOffset,
) -> ServiceResult<OrderHistoryPageData>
where
    R: OrderReader + ?Sized,
{
    let orders = load_orders(repo, user)?;

    let selection = query
        .order
        .and_then(|id| OrderId::new(id).ok())
        .and_then(|id| orders.iter().find(|order| order.id == id))
        .map_or(Selection::NoSelection, |order| {
            Selection::Selected(Box::new(OrderDetail::from_order(order, offset)))
        });

    let history = group_orders(&orders, offset).map(OrderCard::from);

    Ok(OrderHistoryPageData { history, selection })
}

/// Loads the detail view of one of the customer's orders.
pub fn load_order_detail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: &str,
    offset: FixedOffset,
) -> ServiceResult<OrderDetail>
where
    R: OrderReader + ?Sized,
{
    let order = load_order(repo, user, order_id)?;
    Ok(OrderDetail::from_order(&order, offset))
}

/// Stores the items of a past order as the customer's pending reorder.
///
/// Returns the merchant page the customer should be sent to, or `None` when
/// the merchant has no slug; in that case nothing is stored.
pub fn reorder<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: &str,
) -> ServiceResult<Option<String>>
where
    R: OrderReader + ReorderWriter + ?Sized,
{
    let order = load_order(repo, user, order_id)?;

    let Some(intent) = prepare_reorder(&order) else {
        log::info!("Order {} has no merchant page, skipping reorder", order.id);
        return Ok(None);
    };

    repo.save_pending_reorder(&user.sub, &intent.payload)
        .map_err(ServiceError::from)?;

    Ok(Some(intent.target_path))
}

/// Returns the reorder the customer has pending, if any.
pub fn pending_reorder<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Option<ReorderPayload>>
where
    R: ReorderReader + ?Sized,
{
    repo.get_pending_reorder(&user.sub)
        .map_err(ServiceError::from)
}
