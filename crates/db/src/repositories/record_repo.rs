//! Repository for the `records` table.

use sqlx::PgPool;
use watchlist_core::query::{escape_like, ListQuery, PageWindow, SortDir, SortKey, StatusFilter};
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

use crate::models::record::RecordRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, record_type, genre, year, rating, status, notes, image_url";

/// Marker row written alongside the starter dataset.
const SEEDED_KEY: &str = "seeded";

/// Provides CRUD and paged listing for watchlist records.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a record with a caller-assigned id.
    pub async fn create(pool: &PgPool, record: &Record) -> Result<(), sqlx::Error> {
        Self::insert_row(pool, record).await
    }

    /// Find a record by id.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records WHERE id = $1");
        let row = sqlx::query_as::<_, RecordRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Record::from))
    }

    /// Every record, ordered by title for stable output.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records ORDER BY lower(title) COLLATE \"C\", id");
        let rows = sqlx::query_as::<_, RecordRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Record::from).collect())
    }

    /// Replace every mutable column. Returns `false` if no row has this id.
    pub async fn update(pool: &PgPool, record: &Record) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE records SET
                title = $2,
                record_type = $3,
                genre = $4,
                year = $5,
                rating = $6,
                status = $7,
                notes = $8,
                image_url = $9,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.record_type)
        .bind(&record.genre)
        .bind(record.year)
        .bind(record.rating)
        .bind(&record.status)
        .bind(&record.notes)
        .bind(&record.image_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: RecordId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Filtered, sorted page plus the filtered total.
    ///
    /// Count and page run in one REPEATABLE READ transaction so `total`
    /// always describes the snapshot the items came from.
    pub async fn page(
        pool: &PgPool,
        list: &ListQuery,
    ) -> Result<(Vec<Record>, PageWindow), sqlx::Error> {
        let (where_clause, binds) = filter_clause(list);

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM records{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &binds {
            count_query = count_query.bind(value);
        }
        let total = count_query.fetch_one(&mut *tx).await?;

        let window = PageWindow::new(list.page, list.page_size, total);

        let page_sql = format!(
            "SELECT {COLUMNS} FROM records{where_clause} ORDER BY {order} LIMIT ${limit} OFFSET ${offset}",
            order = order_clause(list.sort, list.dir),
            limit = binds.len() + 1,
            offset = binds.len() + 2,
        );
        let mut page_query = sqlx::query_as::<_, RecordRow>(&page_sql);
        for value in &binds {
            page_query = page_query.bind(value);
        }
        let rows = page_query
            .bind(window.page_size)
            .bind(window.offset())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((rows.into_iter().map(Record::from).collect(), window))
    }

    /// Write the starter dataset if this database has never been seeded.
    ///
    /// The marker insert and the seed rows share a transaction; concurrent
    /// callers serialize on the marker's primary key. A table that already
    /// holds rows only gets the marker. Returns the number of rows inserted.
    pub async fn seed_if_uninitialized(pool: &PgPool, seed: &[Record]) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let marked = sqlx::query("INSERT INTO store_state (key) VALUES ($1) ON CONFLICT (key) DO NOTHING")
            .bind(SEEDED_KEY)
            .execute(&mut *tx)
            .await?;
        if marked.rows_affected() == 0 {
            tx.commit().await?;
            return Ok(0);
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.commit().await?;
            return Ok(0);
        }

        for record in seed {
            Self::insert_row(&mut *tx, record).await?;
        }
        tx.commit().await?;

        Ok(seed.len())
    }

    async fn insert_row<'e, E>(executor: E, record: &Record) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            "INSERT INTO records (id, title, record_type, genre, year, rating, status, notes, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.record_type)
        .bind(&record.genre)
        .bind(record.year)
        .bind(record.rating)
        .bind(&record.status)
        .bind(&record.notes)
        .bind(&record.image_url)
        .execute(executor)
        .await?;
        Ok(())
    }
}

/// Build the `WHERE` clause and its positional bind values.
fn filter_clause(list: &ListQuery) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(search) = &list.search {
        binds.push(format!("%{}%", escape_like(search)));
        conditions.push(format!("title ILIKE ${} ESCAPE '\\'", binds.len()));
    }
    if let StatusFilter::Only(status) = &list.status {
        binds.push(status.clone());
        conditions.push(format!("status = ${}", binds.len()));
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// `ORDER BY` body built only from whitelisted identifiers.
///
/// Text keys compare on `lower(..)` under the "C" collation to match the
/// in-memory ordering; ratings keep nulls at the ascending end.
fn order_clause(sort: SortKey, dir: SortDir) -> String {
    let dir = dir.keyword();
    let primary = if sort.is_text() {
        format!("lower({}) COLLATE \"C\" {dir}", sort.column())
    } else if sort == SortKey::Rating {
        let nulls = if dir == "ASC" { "LAST" } else { "FIRST" };
        format!("rating {dir} NULLS {nulls}")
    } else {
        format!("{} {dir}", sort.column())
    };
    format!("{primary}, lower(title) COLLATE \"C\" {dir}, id {dir}")
}
