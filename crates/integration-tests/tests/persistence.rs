//! State surviving a storefront restart.

use axum::http::StatusCode;
use minicart_core::{ProductId, StorageAdapter};
use minicart_integration_tests::{SAMPLE_CATALOG, TestStorefront, client, spawn_catalog};
use minicart_storefront::storage::{FileStorage, keys};

#[tokio::test]
async fn test_cart_and_identity_survive_restart() {
    let url = spawn_catalog(StatusCode::OK, SAMPLE_CATALOG).await;
    let app = TestStorefront::start(url).await;
    let http = client();

    http.post(app.url("/auth/login"))
        .form(&[("name", "Ana"), ("email", "a@b.c"), ("password", "pw")])
        .send()
        .await
        .expect("login failed");
    http.post(app.url("/cart/add"))
        .form(&[("id", "2")])
        .send()
        .await
        .expect("add failed");
    http.post(app.url("/cart/update"))
        .form(&[("id", "2"), ("quantity", "4")])
        .send()
        .await
        .expect("update failed");

    let restarted = app.restart().await;
    let shop = restarted.state.shop().expect("lock");

    assert!(shop.auth().is_authenticated());
    assert_eq!(
        shop.auth().identity().map(|i| i.token.as_str()),
        Some("YUBiLmNBbmE=")
    );
    let line = shop.cart().get(ProductId::new(2)).expect("line restored");
    assert_eq!(line.quantity.get(), 4);
    assert_eq!(shop.cart().total().display(), "$79.96");
}

#[tokio::test]
async fn test_corrupt_cart_entry_starts_empty() {
    let url = spawn_catalog(StatusCode::OK, SAMPLE_CATALOG).await;
    let app = TestStorefront::start(url).await;

    let storage = FileStorage::open(&app.storage_config).expect("open storage");
    storage
        .set(keys::CART, "{not json")
        .expect("write storage");

    let restarted = app.restart().await;
    assert!(restarted.state.shop().expect("lock").cart().is_empty());

    let html = client()
        .get(restarted.url("/"))
        .send()
        .await
        .expect("request failed")
        .text()
        .await
        .expect("body");
    assert!(html.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_stored_cart_uses_qty_field() {
    let url = spawn_catalog(StatusCode::OK, SAMPLE_CATALOG).await;
    let app = TestStorefront::start(url).await;
    let http = client();

    http.post(app.url("/auth/login"))
        .form(&[("name", "Ana"), ("email", "a@b.c"), ("password", "pw")])
        .send()
        .await
        .expect("login failed");
    http.post(app.url("/cart/add"))
        .form(&[("id", "1")])
        .send()
        .await
        .expect("add failed");

    let raw = app.stored()[keys::CART]
        .as_str()
        .expect("cart stored as string")
        .to_string();
    let items: serde_json::Value = serde_json::from_str(&raw).expect("cart is JSON");

    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["qty"], 1);
    assert_eq!(items[0]["title"], "Essence Mascara Lash Princess");
}
