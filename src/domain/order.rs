//! Order history aggregate: orders, their line items and merchants.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, CompanySlug, Money, OrderId, Quantity};

/// Lifecycle state of an order as reported by the ordering backend.
///
/// Unrecognised values are kept verbatim in [`OrderStatus::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// `Delivered` and `Completed` are both shown as a finished order.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Delivered | Self::Completed)
    }

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered | Self::Completed => "Pedido concluído",
            Self::Cancelled => "Cancelado",
            _ => "Em andamento",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "delivered" => Self::Delivered,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer paid for the order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Pix,
    Credit,
    Debit,
    Cash,
    Other(String),
}

impl PaymentMethod {
    /// Customer-facing label; unknown methods are shown as received.
    pub fn label(&self) -> &str {
        match self {
            Self::Pix => "Pix",
            Self::Credit => "Crédito",
            Self::Debit => "Débito",
            Self::Cash => "Dinheiro",
            Self::Other(value) => value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pix => "pix",
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Cash => "cash",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value {
            "pix" => Self::Pix,
            "credit" => Self::Credit,
            "debit" => Self::Debit,
            "cash" => Self::Cash,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.as_str().to_string()
    }
}

/// Merchant that fulfilled the order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub profile_image: Option<String>,
    /// Path segment of the merchant's ordering page.
    pub slug: Option<CompanySlug>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    /// Identifier assigned by the ordering backend; generated when absent.
    #[serde(default)]
    pub id: Option<CompanyId>,
    pub name: String,
    pub profile_image: Option<String>,
    pub slug: Option<CompanySlug>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// One product within an order.
///
/// Serialized in camelCase: the same shape is handed back to the ordering flow
/// in a reorder payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_name: String,
    pub quantity: Quantity,
    pub subtotal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// Multi-flavor selection. Takes precedence over `selected_flavor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_flavors: Option<Vec<String>>,
    /// Legacy single-flavor field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_ingredients: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Subject of the customer who placed the order.
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub company_id: CompanyId,
    pub company: Option<Company>,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub delivery_address: Option<DeliveryAddress>,
}

/// Data required to record an order coming from the ordering backend.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub id: OrderId,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub company_id: CompanyId,
    pub items: Vec<LineItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_statuses_share_a_label() {
        assert_eq!(OrderStatus::Delivered.label(), "Pedido concluído");
        assert_eq!(OrderStatus::Completed.label(), "Pedido concluído");
        assert!(OrderStatus::Delivered.is_finished());
        assert!(OrderStatus::Completed.is_finished());
    }

    #[test]
    fn status_labels_fall_back_to_in_progress() {
        assert_eq!(OrderStatus::from("cancelled").label(), "Cancelado");
        assert_eq!(OrderStatus::from("pending").label(), "Em andamento");
        assert_eq!(OrderStatus::from("in_progress").label(), "Em andamento");

        let unknown = OrderStatus::from("unknown_value");
        assert_eq!(unknown, OrderStatus::Other("unknown_value".to_string()));
        assert_eq!(unknown.label(), "Em andamento");
        assert!(!unknown.is_finished());
    }

    #[test]
    fn payment_labels_pass_unknown_methods_through() {
        assert_eq!(PaymentMethod::from("pix").label(), "Pix");
        assert_eq!(PaymentMethod::from("credit").label(), "Crédito");
        assert_eq!(PaymentMethod::from("debit").label(), "Débito");
        assert_eq!(PaymentMethod::from("cash").label(), "Dinheiro");
        assert_eq!(PaymentMethod::from("voucher").label(), "voucher");
    }

    #[test]
    fn status_round_trips_through_its_wire_string() {
        let raw = serde_json::to_string(&OrderStatus::Other("on_hold".into())).unwrap();
        assert_eq!(raw, "\"on_hold\"");
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }

    #[test]
    fn line_item_uses_camel_case_and_omits_absent_fields() {
        let item = LineItem {
            product_name: "Pizza".into(),
            quantity: Quantity::new(1).unwrap(),
            subtotal: Money::from_cents(4500),
            product_image: None,
            selected_flavors: Some(vec!["Calabresa".into()]),
            selected_flavor: None,
            combo_items: None,
            removed_ingredients: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["productName"], "Pizza");
        assert_eq!(value["selectedFlavors"][0], "Calabresa");
        assert!(value.get("selectedFlavor").is_none());
        assert!(value.get("productImage").is_none());
    }
}
