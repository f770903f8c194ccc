use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    Company as DomainCompany, DeliveryAddress, LineItem, NewCompany as DomainNewCompany,
    NewOrder as DomainNewOrder, Order as DomainOrder,
};
use crate::domain::types::{CompanyId, CompanySlug, Money, OrderId, Quantity, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::order::Company`].
pub struct Company {
    pub id: i32,
    pub name: String,
    pub profile_image: Option<String>,
    pub slug: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub name: &'a str,
    pub profile_image: Option<&'a str>,
    pub slug: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::order::Order`] without its items.
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub company_id: i32,
    pub status: String,
    pub total: i64,
    pub payment_method: String,
    pub delivery_street: Option<String>,
    pub delivery_number: Option<String>,
    pub delivery_neighborhood: Option<String>,
    pub delivery_city: Option<String>,
    pub delivery_state: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub id: &'a str,
    pub customer_id: &'a str,
    pub company_id: i32,
    pub status: &'a str,
    pub total: i64,
    pub payment_method: &'a str,
    pub delivery_street: Option<&'a str>,
    pub delivery_number: Option<&'a str>,
    pub delivery_neighborhood: Option<&'a str>,
    pub delivery_city: Option<&'a str>,
    pub delivery_state: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::order::LineItem`].
///
/// List-valued columns hold JSON arrays.
pub struct OrderItem {
    pub id: i32,
    pub order_id: String,
    pub position: i32,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
    pub product_image: Option<String>,
    pub selected_flavors: Option<String>,
    pub selected_flavor: Option<String>,
    pub combo_items: Option<String>,
    pub removed_ingredients: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: &'a str,
    pub position: i32,
    pub product_name: &'a str,
    pub quantity: i32,
    pub subtotal: i64,
    pub product_image: Option<&'a str>,
    pub selected_flavors: Option<String>,
    pub selected_flavor: Option<&'a str>,
    pub combo_items: Option<String>,
    pub removed_ingredients: Option<String>,
}

fn decode_list(raw: Option<String>) -> Result<Option<Vec<String>>, TypeConstraintError> {
    raw.map(|raw| {
        serde_json::from_str(&raw).map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))
    })
    .transpose()
}

fn encode_list(list: Option<&Vec<String>>) -> Result<Option<String>, TypeConstraintError> {
    list.map(|list| {
        serde_json::to_string(list).map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))
    })
    .transpose()
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::new(company.id)?,
            name: company.name,
            profile_image: company.profile_image,
            // A blank slug carries no destination; treat it as absent.
            slug: company.slug.and_then(|s| CompanySlug::new(s).ok()),
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            name: company.name.as_str(),
            profile_image: company.profile_image.as_deref(),
            slug: company.slug.as_ref().map(|s| s.as_str()),
        }
    }
}

impl TryFrom<OrderItem> for LineItem {
    type Error = TypeConstraintError;

    fn try_from(item: OrderItem) -> Result<Self, Self::Error> {
        Ok(Self {
            product_name: item.product_name,
            quantity: Quantity::new(item.quantity)?,
            subtotal: Money::from_cents(item.subtotal),
            product_image: item.product_image,
            selected_flavors: decode_list(item.selected_flavors)?,
            selected_flavor: item.selected_flavor,
            combo_items: decode_list(item.combo_items)?,
            removed_ingredients: decode_list(item.removed_ingredients)?,
        })
    }
}

impl Order {
    /// Assembles the domain order from its row, merchant and item rows.
    ///
    /// `items` must already be sorted by position.
    pub fn into_domain(
        self,
        company: Option<Company>,
        items: Vec<OrderItem>,
    ) -> Result<DomainOrder, TypeConstraintError> {
        let delivery_address = self.delivery_street.map(|street| DeliveryAddress {
            street,
            number: self.delivery_number.unwrap_or_default(),
            neighborhood: self.delivery_neighborhood.unwrap_or_default(),
            city: self.delivery_city.unwrap_or_default(),
            state: self.delivery_state.unwrap_or_default(),
        });

        Ok(DomainOrder {
            id: OrderId::new(self.id)?,
            customer_id: self.customer_id,
            created_at: self.created_at.and_utc(),
            status: self.status.into(),
            company_id: CompanyId::new(self.company_id)?,
            company: company.map(DomainCompany::try_from).transpose()?,
            items: items
                .into_iter()
                .map(LineItem::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            total: Money::from_cents(self.total),
            payment_method: self.payment_method.into(),
            delivery_address,
        })
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        let address = order.delivery_address.as_ref();
        Self {
            id: order.id.as_str(),
            customer_id: order.customer_id.as_str(),
            company_id: order.company_id.get(),
            status: order.status.as_str(),
            total: order.total.cents(),
            payment_method: order.payment_method.as_str(),
            delivery_street: address.map(|a| a.street.as_str()),
            delivery_number: address.map(|a| a.number.as_str()),
            delivery_neighborhood: address.map(|a| a.neighborhood.as_str()),
            delivery_city: address.map(|a| a.city.as_str()),
            delivery_state: address.map(|a| a.state.as_str()),
            created_at: order.created_at.naive_utc(),
        }
    }
}

impl<'a> NewOrderItem<'a> {
    /// Builds the row for the item at `position` within `order_id`.
    pub fn try_new(
        order_id: &'a str,
        position: usize,
        item: &'a LineItem,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            order_id,
            position: i32::try_from(position)
                .map_err(|_| TypeConstraintError::InvalidValue("too many items".to_string()))?,
            product_name: item.product_name.as_str(),
            quantity: item.quantity.into(),
            subtotal: item.subtotal.cents(),
            product_image: item.product_image.as_deref(),
            selected_flavors: encode_list(item.selected_flavors.as_ref())?,
            selected_flavor: item.selected_flavor.as_deref(),
            combo_items: encode_list(item.combo_items.as_ref())?,
            removed_ingredients: encode_list(item.removed_ingredients.as_ref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::order::{OrderStatus, PaymentMethod};

    fn row() -> Order {
        Order {
            id: "ord-1".into(),
            customer_id: "42".into(),
            company_id: 3,
            status: "delivered".into(),
            total: 5990,
            payment_method: "debit".into(),
            delivery_street: None,
            delivery_number: None,
            delivery_neighborhood: None,
            delivery_city: None,
            delivery_state: None,
            created_at: Utc
                .with_ymd_and_hms(2025, 1, 13, 18, 0, 0)
                .unwrap()
                .naive_utc(),
        }
    }

    fn item_row(quantity: i32, flavors: Option<&str>) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: "ord-1".into(),
            position: 0,
            product_name: "Açaí".into(),
            quantity,
            subtotal: 1800,
            product_image: None,
            selected_flavors: flavors.map(str::to_string),
            selected_flavor: Some("Doce".into()),
            combo_items: None,
            removed_ingredients: Some("[\"Granola\"]".into()),
        }
    }

    #[test]
    fn assembles_domain_order() {
        let company = Company {
            id: 3,
            name: "Açaí da Praia".into(),
            profile_image: None,
            slug: Some("  ".into()),
        };

        let order = row()
            .into_domain(Some(company), vec![item_row(2, Some("[\"Ice\",\"Ice\"]"))])
            .unwrap();

        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment_method, PaymentMethod::Debit);
        assert_eq!(order.created_at, Utc.with_ymd_and_hms(2025, 1, 13, 18, 0, 0).unwrap());
        assert!(order.delivery_address.is_none());
        assert!(order.company.as_ref().unwrap().slug.is_none());

        let item = &order.items[0];
        assert_eq!(item.quantity.get(), 2);
        assert_eq!(item.selected_flavors, Some(vec!["Ice".to_string(), "Ice".to_string()]));
        assert_eq!(item.removed_ingredients, Some(vec!["Granola".to_string()]));
        assert_eq!(item.combo_items, None);
    }

    #[test]
    fn address_is_built_from_street() {
        let mut row = row();
        row.delivery_street = Some("Rua A".into());
        row.delivery_number = Some("10".into());
        row.delivery_city = Some("Recife".into());

        let order = row.into_domain(None, vec![]).unwrap();
        let address = order.delivery_address.unwrap();
        assert_eq!(address.street, "Rua A");
        assert_eq!(address.number, "10");
        assert_eq!(address.city, "Recife");
        assert_eq!(address.state, "");
    }

    #[test]
    fn rejects_invalid_rows() {
        assert_eq!(
            row().into_domain(None, vec![item_row(0, None)]),
            Err(TypeConstraintError::NonPositiveQuantity)
        );
        assert!(matches!(
            row().into_domain(None, vec![item_row(1, Some("not json"))]),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }

    #[test]
    fn new_item_encodes_lists_as_json() {
        let item = LineItem::try_from(item_row(1, Some("[]"))).unwrap();
        let new_item = NewOrderItem::try_new("ord-1", 4, &item).unwrap();
        assert_eq!(new_item.position, 4);
        assert_eq!(new_item.selected_flavors.as_deref(), Some("[]"));
        assert_eq!(new_item.removed_ingredients.as_deref(), Some("[\"Granola\"]"));
        assert_eq!(new_item.combo_items, None);
    }
}
