//! End-to-end checks of the stores bundle and the JSON report.

use app::{Stores, build_report, render_report};
use chrono::Utc;
use domain::{Money, Order};
use order_store::Database;

async fn stores() -> Stores {
    Stores::init(Database::in_memory().await.unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn fresh_store_reports_the_seeded_catalog() {
    let stores = stores().await;

    let report = build_report(&stores).await.unwrap();
    assert_eq!(report.catalog.len(), 3);
    assert!(report.orders.is_empty());

    stores.close().await.unwrap();
}

#[tokio::test]
async fn saved_order_appears_with_its_lines() {
    let stores = stores().await;
    let catalog = stores.catalog.list_all().await.unwrap();

    let transaction_id = stores.transaction_ids.next_transaction_id().await.unwrap();
    let mut order = Order::new(transaction_id.clone(), Utc::now());
    order.add_item(catalog[0].clone(), 2).unwrap();
    order.add_item(catalog[2].clone(), 1).unwrap();
    stores.orders.save(&mut order).await.unwrap();

    let report = build_report(&stores).await.unwrap();
    assert_eq!(report.orders.len(), 1);
    assert_eq!(report.orders[0].header.total, Money::from_cents(485));
    assert_eq!(report.orders[0].lines.len(), 2);

    let json: serde_json::Value = serde_json::from_str(&render_report(&report).unwrap()).unwrap();
    assert_eq!(json["orders"][0]["transaction_id"], transaction_id.as_str());
    assert_eq!(json["orders"][0]["total"], 485);
    assert_eq!(json["orders"][0]["lines"][1]["item"]["name"], "Sprinkles");
    assert_eq!(json["catalog"][1]["name"], "Chocolate Frosted");

    stores.close().await.unwrap();
}
