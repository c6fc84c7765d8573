use pennywise_core::fx::{Currency, FxRepositoryTrait, Rate};
use pennywise_core::Result;

use super::model::ExchangeRateDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::exchange_rates;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct FxRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FxRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FxRepositoryTrait for FxRepository {
    fn get_latest_rate(&self, from: Currency, to: Currency) -> Result<Option<Rate>> {
        let mut conn = get_connection(&self.pool)?;
        let row = exchange_rates::table
            .find((from.code(), to.code()))
            .select(ExchangeRateDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Rate::try_from).transpose()?)
    }

    async fn save_rate(&self, rate: Rate) -> Result<Rate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Rate> {
                let row = ExchangeRateDB::from(&rate);
                diesel::insert_into(exchange_rates::table)
                    .values(&row)
                    .on_conflict((exchange_rates::from_currency, exchange_rates::to_currency))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(rate)
            })
            .await
    }
}
