use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::order::{Company, NewCompany, NewOrder, Order};
use crate::domain::types::OrderId;
use crate::models::order::{
    Company as DbCompany, NewCompany as DbNewCompany, NewOrder as DbNewOrder,
    NewOrderItem as DbNewOrderItem, Order as DbOrder, OrderItem as DbOrderItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderListQuery, OrderReader, OrderWriter};
use crate::schema::{companies, order_items, orders};

/// Loads the items of `rows` and assembles the domain orders, keeping row order.
fn assemble_orders(
    conn: &mut SqliteConnection,
    rows: Vec<(DbOrder, Option<DbCompany>)>,
) -> RepositoryResult<Vec<Order>> {
    let (order_rows, company_rows): (Vec<DbOrder>, Vec<Option<DbCompany>>) =
        rows.into_iter().unzip();

    let items = DbOrderItem::belonging_to(&order_rows)
        .select(DbOrderItem::as_select())
        .order(order_items::position.asc())
        .load::<DbOrderItem>(conn)?
        .grouped_by(&order_rows);

    order_rows
        .into_iter()
        .zip(company_rows)
        .zip(items)
        .map(|((order, company), items)| {
            order
                .into_domain(company, items)
                .map_err(RepositoryError::from)
        })
        .collect()
}

impl OrderReader for DieselRepository {
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>> {
        let mut conn = self.conn()?;

        let limit = query
            .limit
            .map_or(i64::MAX, |limit| i64::try_from(limit).unwrap_or(i64::MAX));

        let rows = orders::table
            .left_join(companies::table)
            .filter(orders::customer_id.eq(&query.customer_id))
            .order((orders::created_at.desc(), orders::id.asc()))
            .limit(limit)
            .select((DbOrder::as_select(), Option::<DbCompany>::as_select()))
            .load::<(DbOrder, Option<DbCompany>)>(&mut conn)?;

        assemble_orders(&mut conn, rows)
    }

    fn get_order(&self, id: &OrderId, customer_id: &str) -> RepositoryResult<Option<Order>> {
        let mut conn = self.conn()?;

        let row = orders::table
            .left_join(companies::table)
            .filter(orders::id.eq(id.as_str()))
            .filter(orders::customer_id.eq(customer_id))
            .select((DbOrder::as_select(), Option::<DbCompany>::as_select()))
            .first::<(DbOrder, Option<DbCompany>)>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(assemble_orders(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }
}

impl OrderWriter for DieselRepository {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
        let mut conn = self.conn()?;

        let row = DbNewCompany::from(new_company);

        let company = match new_company.id {
            None => diesel::insert_into(companies::table)
                .values(&row)
                .returning(DbCompany::as_returning())
                .get_result::<DbCompany>(&mut conn)?,
            Some(id) => {
                diesel::insert_into(companies::table)
                    .values((
                        companies::id.eq(id.get()),
                        companies::name.eq(row.name),
                        companies::profile_image.eq(row.profile_image),
                        companies::slug.eq(row.slug),
                    ))
                    .on_conflict(companies::id)
                    .do_update()
                    .set((
                        companies::name.eq(row.name),
                        companies::profile_image.eq(row.profile_image),
                        companies::slug.eq(row.slug),
                    ))
                    .execute(&mut conn)?;

                companies::table
                    .find(id.get())
                    .select(DbCompany::as_select())
                    .first::<DbCompany>(&mut conn)?
            }
        };

        Ok(Company::try_from(company)?)
    }

    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(&DbNewOrder::from(new_order))
                .execute(conn)?;

            let items = new_order
                .items
                .iter()
                .enumerate()
                .map(|(position, item)| {
                    DbNewOrderItem::try_new(new_order.id.as_str(), position, item)
                })
                .collect::<Result<Vec<_>, _>>()?;

            if !items.is_empty() {
                diesel::insert_into(order_items::table)
                    .values(&items)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        drop(conn);
        self.get_order(&new_order.id, &new_order.customer_id)?
            .ok_or(RepositoryError::NotFound)
    }
}
