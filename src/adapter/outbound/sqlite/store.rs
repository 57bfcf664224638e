//! SQLite snapshot store implementation.
//!
//! Provides append-only persistence for BVL quotation snapshots using SQLite
//! and Diesel ORM. Implements the
//! [`SnapshotStore`](crate::port::outbound::store::SnapshotStore) trait.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    decode_decimal, decode_timestamp, encode_decimal, encode_timestamp, NewStockRow, StockRow,
};
use crate::adapter::outbound::sqlite::database::schema::bvl_stocks;
use crate::domain::{CompanyCode, CompanyRef, NewSnapshot, Snapshot, SnapshotId};
use crate::error::{Error, Result};
use crate::port::outbound::store::SnapshotStore;

/// SQLite-backed snapshot store.
///
/// Rows are appended exactly once and never updated in place; the UNIQUE
/// (`company_name`, `scrape_timestamp`) constraint is enforced by the engine,
/// so concurrent writers racing on the same key see exactly one success and
/// one [`Error::Duplicate`].
pub struct SqliteSnapshotStore {
    /// Database connection pool.
    pool: DbPool,
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

fn is_unique_violation(e: &diesel::result::Error) -> bool {
    matches!(
        e,
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

impl SqliteSnapshotStore {
    /// Create a new snapshot store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn writer_conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }

    fn reader_conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn to_row(snapshot: &NewSnapshot) -> NewStockRow {
        NewStockRow {
            company_code: snapshot.company_code.value(),
            company_name: snapshot.company_name.clone(),
            short_name: snapshot.short_name.clone(),
            nemonico: snapshot.nemonico.clone(),
            sector_code: snapshot.sector_code.clone(),
            sector_description: snapshot.sector_description.clone(),
            last_date: snapshot.last_date.map(encode_timestamp),
            previous_date: snapshot.previous_date.map(encode_timestamp),
            buy_price: snapshot.buy_price.map(encode_decimal),
            sell_price: snapshot.sell_price.map(encode_decimal),
            last_price: snapshot.last_price.map(encode_decimal),
            minimum_price: snapshot.minimum_price.map(encode_decimal),
            maximum_price: snapshot.maximum_price.map(encode_decimal),
            opening_price: snapshot.opening_price.map(encode_decimal),
            previous_price: snapshot.previous_price.map(encode_decimal),
            exderecho: snapshot.exderecho.map(encode_decimal),
            negotiated_quantity: snapshot.negotiated_quantity,
            negotiated_amount: snapshot.negotiated_amount.map(encode_decimal),
            negotiated_national_amount: snapshot.negotiated_national_amount.map(encode_decimal),
            percentage_change: snapshot.percentage_change.map(encode_decimal),
            operations_number: snapshot.operations_number,
            currency: snapshot.currency.clone(),
            unity: snapshot.unity,
            segment: snapshot.segment.clone(),
            num_neg: snapshot.num_neg,
            created_date: snapshot.created_date.map(encode_timestamp),
            scrape_timestamp: encode_timestamp(snapshot.scrape_timestamp),
        }
    }

    fn from_row(row: StockRow) -> Result<Snapshot> {
        let record = NewSnapshot {
            company_code: CompanyCode::new(row.company_code),
            company_name: row.company_name,
            short_name: row.short_name,
            nemonico: row.nemonico,
            sector_code: row.sector_code,
            sector_description: row.sector_description,
            last_date: row.last_date.as_deref().map(decode_timestamp).transpose()?,
            previous_date: row
                .previous_date
                .as_deref()
                .map(decode_timestamp)
                .transpose()?,
            buy_price: row.buy_price.as_deref().map(decode_decimal).transpose()?,
            sell_price: row.sell_price.as_deref().map(decode_decimal).transpose()?,
            last_price: row.last_price.as_deref().map(decode_decimal).transpose()?,
            minimum_price: row
                .minimum_price
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            maximum_price: row
                .maximum_price
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            opening_price: row
                .opening_price
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            previous_price: row
                .previous_price
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            exderecho: row.exderecho.as_deref().map(decode_decimal).transpose()?,
            negotiated_quantity: row.negotiated_quantity,
            negotiated_amount: row
                .negotiated_amount
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            negotiated_national_amount: row
                .negotiated_national_amount
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            percentage_change: row
                .percentage_change
                .as_deref()
                .map(decode_decimal)
                .transpose()?,
            operations_number: row.operations_number,
            currency: row.currency,
            unity: row.unity,
            segment: row.segment,
            num_neg: row.num_neg,
            created_date: row
                .created_date
                .as_deref()
                .map(decode_timestamp)
                .transpose()?,
            scrape_timestamp: decode_timestamp(&row.scrape_timestamp)?,
        };

        Ok(Snapshot {
            id: SnapshotId::new(row.id),
            record,
        })
    }

    fn duplicate_error(snapshot: &NewSnapshot) -> Error {
        Error::Duplicate {
            company_name: snapshot.company_name.clone(),
            scrape_timestamp: snapshot.scrape_timestamp,
        }
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    async fn insert(&self, snapshot: &NewSnapshot) -> Result<SnapshotId> {
        let row = Self::to_row(snapshot);
        let mut conn = self.writer_conn()?;

        let result = conn.transaction::<i32, diesel::result::Error, _>(|conn| {
            diesel::insert_into(bvl_stocks::table)
                .values(&row)
                .execute(conn)?;
            last_insert_rowid(conn)
        });

        match result {
            Ok(id) => {
                debug!(
                    id,
                    company = %snapshot.company_name,
                    scraped = %row.scrape_timestamp,
                    "snapshot inserted"
                );
                Ok(SnapshotId::new(id))
            }
            Err(ref e) if is_unique_violation(e) => Err(Self::duplicate_error(snapshot)),
            Err(e) => Err(Error::Database(e.to_string())),
        }
    }

    async fn insert_capture(&self, snapshots: &[NewSnapshot]) -> Result<Vec<SnapshotId>> {
        if snapshots.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<NewStockRow> = snapshots.iter().map(Self::to_row).collect();
        let mut conn = self.writer_conn()?;

        let mut duplicate_index = None;
        let result = conn.transaction::<Vec<i32>, diesel::result::Error, _>(|conn| {
            let mut ids = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                if let Err(e) = diesel::insert_into(bvl_stocks::table).values(row).execute(conn) {
                    if is_unique_violation(&e) {
                        duplicate_index = Some(index);
                    }
                    return Err(e);
                }
                ids.push(last_insert_rowid(conn)?);
            }
            Ok(ids)
        });

        match result {
            Ok(ids) => {
                debug!(rows = ids.len(), "capture inserted");
                Ok(ids.into_iter().map(SnapshotId::new).collect())
            }
            Err(e) => match duplicate_index {
                Some(index) => Err(Self::duplicate_error(&snapshots[index])),
                None => Err(Error::Database(e.to_string())),
            },
        }
    }

    async fn list_by_time_range(
        &self,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Snapshot>> {
        let mut conn = self.reader_conn()?;

        let rows: Vec<StockRow> = bvl_stocks::table
            .filter(bvl_stocks::scrape_timestamp.ge(encode_timestamp(start)))
            .filter(bvl_stocks::scrape_timestamp.le(encode_timestamp(end)))
            .order((bvl_stocks::scrape_timestamp.asc(), bvl_stocks::id.asc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn list_by_company(&self, code: CompanyCode) -> Result<Vec<Snapshot>> {
        let mut conn = self.reader_conn()?;

        let rows: Vec<StockRow> = bvl_stocks::table
            .filter(bvl_stocks::company_code.eq(code.value()))
            .order((bvl_stocks::scrape_timestamp.asc(), bvl_stocks::id.asc()))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn latest_for_company(&self, code: CompanyCode) -> Result<Option<Snapshot>> {
        let mut conn = self.reader_conn()?;

        let row: Option<StockRow> = bvl_stocks::table
            .filter(bvl_stocks::company_code.eq(code.value()))
            .order((bvl_stocks::scrape_timestamp.desc(), bvl_stocks::id.desc()))
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn companies(&self) -> Result<Vec<CompanyRef>> {
        let mut conn = self.reader_conn()?;

        let pairs: Vec<(i32, String)> = bvl_stocks::table
            .select((bvl_stocks::company_code, bvl_stocks::company_name))
            .distinct()
            .order(bvl_stocks::company_name.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(pairs
            .into_iter()
            .map(|(code, name)| CompanyRef {
                code: CompanyCode::new(code),
                name,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = self.reader_conn()?;

        bvl_stocks::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }
}
