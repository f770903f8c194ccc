use chrono::Utc;
use diesel::prelude::*;

use crate::domain::reorder::ReorderPayload;
use crate::models::reorder::{
    NewPendingReorder as DbNewPendingReorder, PendingReorder as DbPendingReorder,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ReorderReader, ReorderWriter};
use crate::schema::pending_reorders;

impl ReorderReader for DieselRepository {
    fn get_pending_reorder(&self, customer_id: &str) -> RepositoryResult<Option<ReorderPayload>> {
        let mut conn = self.conn()?;

        let row = pending_reorders::table
            .find(customer_id)
            .select(DbPendingReorder::as_select())
            .first::<DbPendingReorder>(&mut conn)
            .optional()?;

        Ok(row.map(ReorderPayload::try_from).transpose()?)
    }
}

impl ReorderWriter for DieselRepository {
    fn save_pending_reorder(
        &self,
        customer_id: &str,
        payload: &ReorderPayload,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let row = DbNewPendingReorder::try_new(customer_id, payload, Utc::now().naive_utc())?;

        diesel::insert_into(pending_reorders::table)
            .values(&row)
            .on_conflict(pending_reorders::customer_id)
            .do_update()
            .set((
                pending_reorders::company_id.eq(row.company_id),
                pending_reorders::items.eq(&row.items),
                pending_reorders::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
