//! Grouping of a customer's orders into day buckets for display.

use std::collections::HashMap;

use chrono::FixedOffset;
use serde::Serialize;

use crate::domain::order::Order;
use crate::formatting::format_date_label;

/// Orders sharing one day label, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderGroup<T> {
    pub label: String,
    pub orders: Vec<T>,
}

/// Result of grouping an order history.
///
/// `Empty` means the customer has no orders at all and the caller should show
/// the "no orders" message. `Grouped` holds buckets in first-seen order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "groups", rename_all = "snake_case")]
pub enum OrderHistory<T> {
    Empty,
    Grouped(Vec<OrderGroup<T>>),
}

impl<T> OrderHistory<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Groups in display order; none for an empty history.
    pub fn groups(&self) -> &[OrderGroup<T>] {
        match self {
            Self::Empty => &[],
            Self::Grouped(groups) => groups,
        }
    }

    /// Total number of orders across all groups.
    pub fn len(&self) -> usize {
        self.groups().iter().map(|g| g.orders.len()).sum()
    }

    /// Re-projects every order keeping group and order sequence intact.
    pub fn map<U, F>(self, mut f: F) -> OrderHistory<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::Empty => OrderHistory::Empty,
            Self::Grouped(groups) => OrderHistory::Grouped(
                groups
                    .into_iter()
                    .map(|group| OrderGroup {
                        label: group.label,
                        orders: group.orders.into_iter().map(&mut f).collect(),
                    })
                    .collect(),
            ),
        }
    }
}

/// Partitions `items` by the label `label_fn` yields for each of them.
///
/// Items with equal labels end up in one group regardless of what produced
/// the label. Group order follows the first appearance of each label.
pub fn group_by_label<T, F>(items: impl IntoIterator<Item = T>, mut label_fn: F) -> OrderHistory<T>
where
    F: FnMut(&T) -> String,
{
    let mut groups: Vec<OrderGroup<T>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let label = label_fn(&item);
        match index.get(&label) {
            Some(&position) => groups[position].orders.push(item),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(OrderGroup {
                    label,
                    orders: vec![item],
                });
            }
        }
    }

    if groups.is_empty() {
        OrderHistory::Empty
    } else {
        OrderHistory::Grouped(groups)
    }
}

/// Groups orders by the day they were placed, as seen in `offset`.
pub fn group_orders(orders: &[Order], offset: FixedOffset) -> OrderHistory<&Order> {
    group_by_label(orders, |order| format_date_label(order.created_at, offset))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::order::{OrderStatus, PaymentMethod};
    use crate::domain::types::{CompanyId, Money, OrderId};
    use crate::formatting::{DEFAULT_UTC_OFFSET_MINUTES, display_offset};

    fn order(id: &str, day: u32, hour: u32) -> Order {
        Order {
            id: OrderId::new(id).unwrap(),
            customer_id: "customer".into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap(),
            status: OrderStatus::Delivered,
            company_id: CompanyId::new(1).unwrap(),
            company: None,
            items: vec![],
            total: Money::from_cents(1000),
            payment_method: PaymentMethod::Pix,
            delivery_address: None,
        }
    }

    fn ids<'a>(group: &OrderGroup<&'a Order>) -> Vec<&'a str> {
        group.orders.iter().map(|o| o.id.as_str()).collect()
    }

    fn brt() -> FixedOffset {
        display_offset(DEFAULT_UTC_OFFSET_MINUTES)
    }

    #[test]
    fn empty_input_yields_empty_state() {
        let history = group_orders(&[], brt());
        assert_eq!(history, OrderHistory::Empty);
        assert_ne!(history, OrderHistory::Grouped(vec![]));
        assert!(history.is_empty());
    }

    #[test]
    fn groups_follow_first_appearance_and_keep_input_order() {
        let orders = vec![
            order("a", 14, 15),
            order("b", 13, 15),
            order("c", 14, 12),
            order("d", 15, 15),
            order("e", 13, 20),
        ];

        let history = group_orders(&orders, brt());
        let groups = history.groups();

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Ter., 14/01/2025", "Seg., 13/01/2025", "Qua., 15/01/2025"]);
        assert_eq!(ids(&groups[0]), vec!["a", "c"]);
        assert_eq!(ids(&groups[1]), vec!["b", "e"]);
        assert_eq!(ids(&groups[2]), vec!["d"]);
    }

    #[test]
    fn grouping_is_a_partition() {
        let orders: Vec<Order> = (0..20)
            .map(|n| order(&format!("o{n}"), 10 + (n % 4), 12 + (n % 3)))
            .collect();

        let history = group_orders(&orders, brt());
        assert_eq!(history.len(), orders.len());

        for group in history.groups() {
            let expected: Vec<&str> = orders
                .iter()
                .filter(|o| format_date_label(o.created_at, brt()) == group.label)
                .map(|o| o.id.as_str())
                .collect();
            assert_eq!(ids(group), expected);
        }
    }

    #[test]
    fn colliding_labels_are_merged() {
        let history = group_by_label(vec![1, 2, 3, 4], |n| {
            let label = if n % 2 == 0 { "even" } else { "odd" };
            label.to_string()
        });
        assert_eq!(
            history,
            OrderHistory::Grouped(vec![
                OrderGroup {
                    label: "odd".into(),
                    orders: vec![1, 3],
                },
                OrderGroup {
                    label: "even".into(),
                    orders: vec![2, 4],
                },
            ])
        );
    }

    #[test]
    fn map_preserves_structure() {
        let history = group_by_label(vec!["x1", "y1", "x2"], |s| s[..1].to_string());
        let mapped = history.map(str::len);
        assert_eq!(mapped.groups()[0].orders, vec![2, 2]);
        assert_eq!(mapped.groups()[1].orders, vec![2]);
        assert_eq!(OrderHistory::<u8>::Empty.map(|n| n + 1), OrderHistory::Empty);
    }

    #[test]
    fn serializes_with_explicit_state() {
        let empty = serde_json::to_value(OrderHistory::<u8>::Empty).unwrap();
        assert_eq!(empty, serde_json::json!({ "state": "empty" }));

        let grouped = serde_json::to_value(group_by_label(vec![1u8], |_| "day".into())).unwrap();
        assert_eq!(grouped["state"], "grouped");
        assert_eq!(grouped["groups"][0]["label"], "day");
        assert_eq!(grouped["groups"][0]["orders"][0], 1);
    }
}
