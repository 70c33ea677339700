use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    ItemId, LineId, MenuItem, Money, Order, OrderId, OrderLine, OrderState, OrderSummary,
    TransactionId,
};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use crate::transaction_id::TransactionCounter;
use crate::{Database, Result, StoreError};

/// Transactional persistence of order aggregates (header + lines).
///
/// Every mutation runs inside one database transaction. The transaction is
/// rolled back when dropped without a commit, so an early `?` return leaves
/// storage untouched and the connection back in autocommit mode.
#[derive(Debug, Clone)]
pub struct OrderStore {
    db: Database,
}

impl OrderStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_summary(row: &SqliteRow) -> std::result::Result<OrderSummary, sqlx::Error> {
        Ok(OrderSummary {
            id: OrderId::new(row.try_get("order_id")?),
            transaction_id: TransactionId::new(row.try_get::<String, _>("transaction_id")?),
            ordered_at: row.try_get::<DateTime<Utc>, _>("order_date")?,
            total: Money::from_cents(row.try_get("total")?),
        })
    }

    fn row_to_line(order_id: OrderId, row: &SqliteRow) -> std::result::Result<OrderLine, sqlx::Error> {
        let item = MenuItem::with_id(
            ItemId::new(row.try_get("item_id")?),
            row.try_get::<String, _>("name")?,
            Money::from_cents(row.try_get("price")?),
            row.try_get::<String, _>("description")?,
        );
        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| sqlx::Error::Decode(format!("invalid quantity {quantity}").into()))?;

        OrderLine::from_row(
            LineId::new(row.try_get("order_item_id")?),
            order_id,
            item,
            quantity,
        )
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    /// Saves the whole aggregate: inserts it if new, replaces it otherwise.
    ///
    /// On success the order (and each line) carries its storage id. On
    /// failure nothing is written and `order` is left as it was.
    #[tracing::instrument(skip(self, order), fields(transaction_id = %order.transaction_id(), order_id = %order.id()))]
    pub async fn save(&self, order: &mut Order) -> Result<()> {
        order.validate_for_save()?;

        let started = Instant::now();
        let mode = order.state();
        let outcome = match mode {
            OrderState::Transient => self.insert_aggregate(order).await,
            OrderState::Persisted => self.replace_aggregate(order).await,
        };
        let mode_label = if mode.is_transient() { "create" } else { "update" };

        match outcome {
            Ok((order_id, line_ids)) => {
                order.mark_saved(order_id, &line_ids);
                metrics::counter!("orders_saved_total", "mode" => mode_label).increment(1);
                metrics::histogram!("order_save_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::info!(
                    %order_id,
                    lines = line_ids.len(),
                    total = %order.total(),
                    mode = mode_label,
                    "order saved"
                );
                Ok(())
            }
            Err(e) => {
                metrics::counter!("order_save_failures_total", "mode" => mode_label).increment(1);
                tracing::warn!(error = %e, mode = mode_label, "order save rolled back");
                Err(e)
            }
        }
    }

    async fn insert_aggregate(&self, order: &Order) -> Result<(OrderId, Vec<LineId>)> {
        let target = format!("order {}", order.transaction_id());
        let mut conn = self.db.acquire().await;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin order save", target.as_str(), e))?;

        let result =
            sqlx::query("INSERT INTO orders (transaction_id, order_date, total) VALUES (?, ?, ?)")
                .bind(order.transaction_id().as_str())
                .bind(order.ordered_at())
                .bind(order.total().cents())
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::from_sqlx("insert order", target.as_str(), e))?;
        let order_id = OrderId::new(result.last_insert_rowid());

        let line_ids = Self::insert_lines(&mut tx, order_id, order.lines()).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit order save", target.as_str(), e))?;
        Ok((order_id, line_ids))
    }

    async fn replace_aggregate(&self, order: &Order) -> Result<(OrderId, Vec<LineId>)> {
        let order_id = order.id();
        let target = format!("order {order_id}");
        let mut conn = self.db.acquire().await;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin order save", target.as_str(), e))?;

        let result = sqlx::query(
            "UPDATE orders SET transaction_id = ?, order_date = ?, total = ? WHERE order_id = ?",
        )
        .bind(order.transaction_id().as_str())
        .bind(order.ordered_at())
        .bind(order.total().cents())
        .bind(order_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_sqlx("update order", target.as_str(), e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                operation: "update order",
                target,
            });
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(order_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("clear order lines", target.as_str(), e))?;

        let line_ids = Self::insert_lines(&mut tx, order_id, order.lines()).await?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit order save", target.as_str(), e))?;
        Ok((order_id, line_ids))
    }

    async fn insert_lines(
        conn: &mut SqliteConnection,
        order_id: OrderId,
        lines: &[OrderLine],
    ) -> Result<Vec<LineId>> {
        let mut ids = Vec::with_capacity(lines.len());
        for line in lines {
            let result = sqlx::query(
                "INSERT INTO order_items (order_id, item_id, quantity, line_price) VALUES (?, ?, ?, ?)",
            )
            .bind(order_id.as_i64())
            .bind(line.item().id.as_i64())
            .bind(i64::from(line.quantity()))
            .bind(line.line_total().cents())
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                StoreError::from_sqlx(
                    "insert order line",
                    format!("order {order_id}, menu item {}", line.item().id),
                    e,
                )
            })?;
            ids.push(LineId::new(result.last_insert_rowid()));
        }
        Ok(ids)
    }

    /// Deletes an order and all of its lines. Deleting a missing id succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, order_id: OrderId) -> Result<()> {
        let target = format!("order {order_id}");
        let mut conn = self.db.acquire().await;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin order delete", target.as_str(), e))?;

        let lines = sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(order_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("delete order lines", target.as_str(), e))?;

        let header = sqlx::query("DELETE FROM orders WHERE order_id = ?")
            .bind(order_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("delete order", target.as_str(), e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit order delete", target.as_str(), e))?;

        if header.rows_affected() > 0 {
            metrics::counter!("orders_deleted_total").increment(1);
        }
        tracing::info!(
            %order_id,
            lines = lines.rows_affected(),
            existed = header.rows_affected() > 0,
            "order deleted"
        );
        Ok(())
    }

    /// Returns all order headers, most recent first, with totals as stored.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<OrderSummary>> {
        let mut conn = self.db.acquire().await;
        let rows = sqlx::query(
            r#"
            SELECT order_id, transaction_id, order_date, total
            FROM orders
            ORDER BY order_date DESC, order_id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| StoreError::from_sqlx("list orders", "orders", e))?;

        rows.iter()
            .map(Self::row_to_summary)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| StoreError::from_sqlx("list orders", "orders", e))
    }

    /// Returns the lines of an order joined with the current catalog rows.
    ///
    /// Prices come from the catalog as it is now, not as it was when the
    /// order was saved.
    #[tracing::instrument(skip(self))]
    pub async fn load_lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let mut conn = self.db.acquire().await;
        Self::fetch_lines(&mut conn, order_id).await
    }

    async fn fetch_lines(conn: &mut SqliteConnection, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let target = format!("order {order_id}");
        let rows = sqlx::query(
            r#"
            SELECT oi.order_item_id, oi.quantity, mi.item_id, mi.name, mi.price, mi.description
            FROM order_items oi
            JOIN menu_items mi ON oi.item_id = mi.item_id
            WHERE oi.order_id = ?
            ORDER BY oi.order_item_id ASC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| StoreError::from_sqlx("load order lines", target.as_str(), e))?;

        rows.iter()
            .map(|row| Self::row_to_line(order_id, row))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| StoreError::from_sqlx("load order lines", target.as_str(), e))
    }

    /// Loads a stored order with its lines, ready for editing.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, order_id: OrderId) -> Result<Option<Order>> {
        let target = format!("order {order_id}");
        let mut conn = self.db.acquire().await;
        let row = sqlx::query(
            "SELECT order_id, transaction_id, order_date, total FROM orders WHERE order_id = ?",
        )
        .bind(order_id.as_i64())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| StoreError::from_sqlx("load order", target.as_str(), e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let summary = Self::row_to_summary(&row)
            .map_err(|e| StoreError::from_sqlx("load order", target.as_str(), e))?;
        let lines = Self::fetch_lines(&mut conn, order_id).await?;
        let order = Order::from_parts(summary, lines).map_err(|e| {
            StoreError::from_sqlx("load order", target.as_str(), sqlx::Error::Decode(Box::new(e)))
        })?;
        Ok(Some(order))
    }
}

#[async_trait]
impl TransactionCounter for OrderStore {
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64> {
        let mut conn = self.db.acquire().await;
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE transaction_id LIKE ?")
                .bind(format!("{prefix}%"))
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| StoreError::from_sqlx("count transaction ids", prefix, e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
