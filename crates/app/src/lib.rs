//! Headless entry point for the point-of-sale order store.
//!
//! Wires the stores onto one database handle and renders a read-only report
//! of the catalog and the saved orders. An interactive front end drives the
//! same `Stores` bundle.

pub mod config;
pub mod error;

use domain::{MenuItem, OrderLine, OrderSummary};
use order_store::{CatalogStore, Database, OrderStore, TransactionIdGenerator, bootstrap};
use serde::Serialize;

use config::Config;
use error::AppError;

/// Every store, sharing one database connection.
pub struct Stores {
    pub db: Database,
    pub catalog: CatalogStore,
    pub orders: OrderStore,
    pub transaction_ids: TransactionIdGenerator<OrderStore>,
}

impl Stores {
    /// Opens the configured database file and prepares it for use.
    pub async fn open(config: &Config) -> Result<Self, AppError> {
        let db = Database::open(&config.database_path).await?;
        Self::init(db).await
    }

    /// Applies the schema (seeding on first run) and builds the stores.
    pub async fn init(db: Database) -> Result<Self, AppError> {
        bootstrap(&db).await?;
        let orders = OrderStore::new(db.clone());
        Ok(Self {
            catalog: CatalogStore::new(db.clone()),
            transaction_ids: TransactionIdGenerator::new(orders.clone()),
            orders,
            db,
        })
    }

    /// Releases the stores and closes the connection.
    pub async fn close(self) -> Result<(), AppError> {
        let Stores {
            db,
            catalog,
            orders,
            transaction_ids,
        } = self;
        drop(catalog);
        drop(orders);
        drop(transaction_ids);
        db.close().await?;
        Ok(())
    }
}

/// One saved order with its lines.
#[derive(Debug, Serialize)]
pub struct OrderReport {
    #[serde(flatten)]
    pub header: OrderSummary,
    pub lines: Vec<OrderLine>,
}

/// Snapshot of everything the store holds.
#[derive(Debug, Serialize)]
pub struct Report {
    pub catalog: Vec<MenuItem>,
    pub orders: Vec<OrderReport>,
}

/// Reads the catalog and every order (most recent first) with its lines.
#[tracing::instrument(skip(stores))]
pub async fn build_report(stores: &Stores) -> Result<Report, AppError> {
    let catalog = stores.catalog.list_all().await?;

    let headers = stores.orders.list_all().await?;
    let mut orders = Vec::with_capacity(headers.len());
    for header in headers {
        let lines = stores.orders.load_lines(header.id).await?;
        orders.push(OrderReport { header, lines });
    }

    tracing::debug!(items = catalog.len(), orders = orders.len(), "report built");
    Ok(Report { catalog, orders })
}

/// Renders the report as pretty-printed JSON.
pub fn render_report(report: &Report) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}
