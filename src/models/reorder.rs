use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::LineItem;
use crate::domain::reorder::ReorderPayload;
use crate::domain::types::{CompanyId, TypeConstraintError};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pending_reorders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for the one pending [`ReorderPayload`] a customer may hold.
///
/// `items` holds the line items as a JSON array in the reorder wire shape.
pub struct PendingReorder {
    pub customer_id: String,
    pub company_id: i32,
    pub items: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pending_reorders)]
pub struct NewPendingReorder<'a> {
    pub customer_id: &'a str,
    pub company_id: i32,
    pub items: String,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewPendingReorder<'a> {
    pub fn try_new(
        customer_id: &'a str,
        payload: &ReorderPayload,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            customer_id,
            company_id: payload.company_id.get(),
            items: serde_json::to_string(&payload.items)
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            updated_at,
        })
    }
}

impl TryFrom<PendingReorder> for ReorderPayload {
    type Error = TypeConstraintError;

    fn try_from(row: PendingReorder) -> Result<Self, Self::Error> {
        let items: Vec<LineItem> = serde_json::from_str(&row.items)
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?;
        Ok(Self {
            items,
            company_id: CompanyId::new(row.company_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::types::{Money, Quantity};

    #[test]
    fn payload_survives_the_row() {
        let payload = ReorderPayload {
            items: vec![LineItem {
                product_name: "Pizza".into(),
                quantity: Quantity::new(2).unwrap(),
                subtotal: Money::from_cents(9000),
                product_image: None,
                selected_flavors: Some(vec!["Calabresa".into()]),
                selected_flavor: None,
                combo_items: None,
                removed_ingredients: None,
            }],
            company_id: CompanyId::new(7).unwrap(),
        };
        let at = Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap().naive_utc();

        let new_row = NewPendingReorder::try_new("customer-1", &payload, at).unwrap();
        assert_eq!(new_row.company_id, 7);

        let row = PendingReorder {
            customer_id: new_row.customer_id.to_string(),
            company_id: new_row.company_id,
            items: new_row.items,
            updated_at: at,
        };
        assert_eq!(ReorderPayload::try_from(row).unwrap(), payload);
    }

    #[test]
    fn rejects_corrupt_items() {
        let row = PendingReorder {
            customer_id: "customer-1".into(),
            company_id: 7,
            items: "{".into(),
            updated_at: Utc::now().naive_utc(),
        };
        assert!(matches!(
            ReorderPayload::try_from(row),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
