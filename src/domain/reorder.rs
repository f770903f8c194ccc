//! Reorder payload handed to the ordering flow when a customer repeats an order.

use serde::{Deserialize, Serialize};

use crate::domain::order::{LineItem, Order};
use crate::domain::types::CompanyId;

/// Items and merchant needed to prefill a new order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub items: Vec<LineItem>,
    pub company_id: CompanyId,
}

/// A prepared reorder: the payload to store and where to send the customer.
///
/// Nothing is stored until the caller acts on the intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderIntent {
    pub payload: ReorderPayload,
    pub target_path: String,
}

/// Builds the reorder intent for `order`.
///
/// Returns `None` when the merchant has no slug, since there is no page to
/// send the customer to.
pub fn prepare_reorder(order: &Order) -> Option<ReorderIntent> {
    let slug = order.company.as_ref()?.slug.as_ref()?;
    Some(ReorderIntent {
        payload: ReorderPayload {
            items: order.items.clone(),
            company_id: order.company_id,
        },
        target_path: format!("/{slug}"),
    })
}
