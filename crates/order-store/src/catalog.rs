use domain::{ItemId, MenuItem, Money};
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, Row, SqliteConnection};

use crate::error::is_missing_table;
use crate::{Database, Result, StoreError};

/// Create/read/update/delete of catalog (menu) items.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db: Database,
}

impl CatalogStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_item(row: SqliteRow) -> std::result::Result<MenuItem, sqlx::Error> {
        Ok(MenuItem::with_id(
            ItemId::new(row.try_get("item_id")?),
            row.try_get::<String, _>("name")?,
            Money::from_cents(row.try_get("price")?),
            row.try_get::<String, _>("description")?,
        ))
    }

    async fn insert_row(conn: &mut SqliteConnection, item: &MenuItem) -> Result<ItemId> {
        let result = sqlx::query("INSERT INTO menu_items (name, price, description) VALUES (?, ?, ?)")
            .bind(&item.name)
            .bind(item.price.cents())
            .bind(&item.description)
            .execute(&mut *conn)
            .await
            .map_err(|e| StoreError::from_sqlx("insert menu item", item.name.as_str(), e))?;
        Ok(ItemId::new(result.last_insert_rowid()))
    }

    /// Inserts `item` and writes the assigned identifier back into it.
    #[tracing::instrument(skip(self, item), fields(name = %item.name))]
    pub async fn insert(&self, item: &mut MenuItem) -> Result<ItemId> {
        item.validate()?;

        let mut conn = self.db.acquire().await;
        let id = Self::insert_row(&mut conn, item).await?;
        item.id = id;

        metrics::counter!("catalog_writes_total", "op" => "insert").increment(1);
        tracing::debug!(%id, "menu item inserted");
        Ok(id)
    }

    /// Inserts every item in one transaction: either all are stored or none.
    ///
    /// Identifiers are written back only after the commit.
    #[tracing::instrument(skip(self, items), fields(count = items.len()))]
    pub async fn insert_all(&self, items: &mut [MenuItem]) -> Result<Vec<ItemId>> {
        for item in items.iter() {
            item.validate()?;
        }

        let mut conn = self.db.acquire().await;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin catalog insert", "menu_items", e))?;

        let mut ids = Vec::with_capacity(items.len());
        for item in items.iter() {
            ids.push(Self::insert_row(&mut tx, item).await?);
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit catalog insert", "menu_items", e))?;

        for (item, id) in items.iter_mut().zip(&ids) {
            item.id = *id;
        }
        metrics::counter!("catalog_writes_total", "op" => "insert").increment(ids.len() as u64);
        tracing::debug!(count = ids.len(), "menu items inserted");
        Ok(ids)
    }

    /// True once any item has ever been committed to the catalog, even if
    /// every item was deleted since.
    pub(crate) async fn has_history(&self) -> Result<bool> {
        let mut conn = self.db.acquire().await;
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_sequence WHERE name = 'menu_items'",
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| StoreError::from_sqlx("inspect catalog history", "menu_items", e))?;
        Ok(count > 0)
    }

    /// Overwrites name, price and description of the item with `item.id`.
    ///
    /// An id with no stored row is a silent no-op.
    #[tracing::instrument(skip(self, item), fields(id = %item.id))]
    pub async fn update(&self, item: &MenuItem) -> Result<()> {
        item.validate()?;

        let mut conn = self.db.acquire().await;
        let result =
            sqlx::query("UPDATE menu_items SET name = ?, price = ?, description = ? WHERE item_id = ?")
                .bind(&item.name)
                .bind(item.price.cents())
                .bind(&item.description)
                .bind(item.id.as_i64())
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    StoreError::from_sqlx("update menu item", format!("menu item {}", item.id), e)
                })?;

        if result.rows_affected() == 0 {
            tracing::warn!(id = %item.id, "update matched no menu item");
        } else {
            metrics::counter!("catalog_writes_total", "op" => "update").increment(1);
        }
        Ok(())
    }

    /// Deletes the item with `id`. Deleting a missing id succeeds.
    ///
    /// Fails with a constraint error while order lines still reference it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<()> {
        let mut conn = self.db.acquire().await;
        let result = sqlx::query("DELETE FROM menu_items WHERE item_id = ?")
            .bind(id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(|e| StoreError::from_sqlx("delete menu item", format!("menu item {id}"), e))?;

        metrics::counter!("catalog_writes_total", "op" => "delete").increment(1);
        tracing::debug!(%id, removed = result.rows_affected(), "menu item delete");
        Ok(())
    }

    /// Returns every catalog item in storage order.
    ///
    /// A missing `menu_items` table reads as an empty catalog.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<MenuItem>> {
        let mut conn = self.db.acquire().await;
        let rows = match sqlx::query("SELECT item_id, name, price, description FROM menu_items")
            .fetch_all(&mut *conn)
            .await
        {
            Ok(rows) => rows,
            Err(e) if is_missing_table(&e) => {
                tracing::debug!("menu_items table absent, treating catalog as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::from_sqlx("list menu items", "menu_items", e)),
        };

        rows.into_iter()
            .map(Self::row_to_item)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| StoreError::from_sqlx("list menu items", "menu_items", e))
    }
}
