//! View models for the order history page, detail dialog and JSON API.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::domain::history::OrderHistory;
use crate::domain::order::{DeliveryAddress, LineItem, Order, OrderStatus};
use crate::formatting::{format_currency, format_date_time, short_id};

const FALLBACK_COMPANY_NAME: &str = "Restaurante";
const FALLBACK_COMPANY_INITIAL: &str = "R";

/// Query parameters accepted by the order history page.
#[derive(Debug, Default, Deserialize)]
pub struct OrderHistoryQuery {
    /// Order whose detail dialog should be open.
    pub order: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub label: &'static str,
    /// Finished orders get the completion indicator.
    pub finished: bool,
}

impl From<&OrderStatus> for StatusView {
    fn from(status: &OrderStatus) -> Self {
        Self {
            label: status.label(),
            finished: status.is_finished(),
        }
    }
}

/// First line item of an order as shown in the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemPreview {
    pub quantity: u32,
    /// Product name, followed by `" + N itens"` when the order has more lines.
    pub text: String,
    pub image: Option<String>,
}

impl ItemPreview {
    fn from_items(items: &[LineItem]) -> Option<Self> {
        let first = items.first()?;
        let text = match items.len() - 1 {
            0 => first.product_name.clone(),
            rest => format!("{} + {rest} itens", first.product_name),
        };
        Some(Self {
            quantity: first.quantity.get(),
            text,
            image: first.product_image.clone(),
        })
    }
}

/// One order card in the history list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderCard {
    pub id: String,
    pub company_name: String,
    pub company_image: Option<String>,
    /// Shown in place of the image.
    pub company_initial: String,
    pub status: StatusView,
    pub preview: Option<ItemPreview>,
}

impl From<&Order> for OrderCard {
    fn from(order: &Order) -> Self {
        let company = order.company.as_ref();
        let company_name = company
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty());

        Self {
            id: order.id.to_string(),
            company_name: company_name.unwrap_or(FALLBACK_COMPANY_NAME).to_string(),
            company_image: company.and_then(|c| c.profile_image.clone()),
            company_initial: company_name
                .and_then(|name| name.chars().next())
                .map_or_else(|| FALLBACK_COMPANY_INITIAL.to_string(), String::from),
            status: StatusView::from(&order.status),
            preview: ItemPreview::from_items(&order.items),
        }
    }
}

/// A line item in the detail dialog.
///
/// Optional annotations are `None` or empty when the line must not be drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineItemView {
    pub quantity: u32,
    pub product_name: String,
    pub subtotal: String,
    pub flavors: Option<String>,
    pub flavor: Option<String>,
    pub combo_items: Vec<String>,
    pub removed_ingredients: Option<String>,
}

fn non_empty(list: Option<&Vec<String>>) -> Option<&Vec<String>> {
    list.filter(|list| !list.is_empty())
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        let flavors = non_empty(item.selected_flavors.as_ref()).map(|f| f.join(", "));
        // Any flavor list, even an empty one, replaces the legacy field.
        let flavor = match item.selected_flavors {
            Some(_) => None,
            None => item.selected_flavor.clone(),
        };

        Self {
            quantity: item.quantity.get(),
            product_name: item.product_name.clone(),
            subtotal: format_currency(item.subtotal),
            flavors,
            flavor,
            combo_items: non_empty(item.combo_items.as_ref())
                .cloned()
                .unwrap_or_default(),
            removed_ingredients: non_empty(item.removed_ingredients.as_ref())
                .map(|list| format!("Sem: {}", list.join(", "))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddressView {
    /// `"street, number"`
    pub street_line: String,
    /// `"neighborhood - city/state"`
    pub locality_line: String,
}

impl From<&DeliveryAddress> for AddressView {
    fn from(address: &DeliveryAddress) -> Self {
        Self {
            street_line: format!("{}, {}", address.street, address.number),
            locality_line: format!(
                "{} - {}/{}",
                address.neighborhood, address.city, address.state
            ),
        }
    }
}

/// Everything the detail dialog shows for one order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderDetail {
    pub id: String,
    pub short_id: String,
    pub created_at: String,
    pub status: StatusView,
    pub items: Vec<LineItemView>,
    pub total: String,
    pub payment_method: String,
    pub address: Option<AddressView>,
}

impl OrderDetail {
    pub fn from_order(order: &Order, offset: FixedOffset) -> Self {
        Self {
            id: order.id.to_string(),
            short_id: short_id(order.id.as_str()),
            created_at: format_date_time(order.created_at, offset),
            status: StatusView::from(&order.status),
            items: order.items.iter().map(LineItemView::from).collect(),
            total: format_currency(order.total),
            payment_method: order.payment_method.label().to_string(),
            address: order.delivery_address.as_ref().map(AddressView::from),
        }
    }
}

/// Which order, if any, has its detail dialog open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "order", rename_all = "snake_case")]
pub enum Selection {
    NoSelection,
    Selected(Box<OrderDetail>),
}

/// Data required to render the order history template.
#[derive(Debug)]
pub struct OrderHistoryPageData {
    pub history: OrderHistory<OrderCard>,
    pub selection: Selection,
}
