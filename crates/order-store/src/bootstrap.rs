use domain::{MenuItem, Money};

use crate::{CatalogStore, Database, Result};

/// Items written into the catalog of a freshly created database.
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Glazed Donut", Money::from_cents(150), "Classic glazed donut"),
        MenuItem::new("Chocolate Frosted", Money::from_cents(175), "Chocolate icing"),
        MenuItem::new("Sprinkles", Money::from_cents(185), "Fun colorful sprinkles"),
    ]
}

/// Brings the schema up to date and seeds the catalog on first run.
///
/// "First run" means no catalog item was ever committed. The samples go in
/// as one transaction, so a failed seed leaves no trace and the next call
/// tries again, while a catalog emptied by the user stays empty.
#[tracing::instrument(skip(db))]
pub async fn bootstrap(db: &Database) -> Result<()> {
    db.run_migrations().await?;

    let catalog = CatalogStore::new(db.clone());
    if catalog.has_history().await? {
        tracing::debug!("catalog already populated once, skipping seed");
        return Ok(());
    }

    let mut items = sample_menu();
    catalog.insert_all(&mut items).await?;
    tracing::info!(items = items.len(), "seeded sample catalog");
    Ok(())
}
