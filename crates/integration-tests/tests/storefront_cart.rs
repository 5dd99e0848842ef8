//! Integration tests for the session-backed cart.

use reqwest::StatusCode;
use stylemart_core::Price;
use stylemart_integration_tests::{TestServer, extract_badge, line_ids};

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_landing_page_lists_catalog() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Blue Shirt"));
    assert!(body.contains("$50.00"));
    assert!(body.contains(r#"data-reveal-delay="80""#));
    assert_eq!(extract_badge(&body), Some(0));
}

#[tokio::test]
async fn test_adding_same_product_twice_merges_lines() {
    let server = TestServer::start().await;
    server.add("blue-shirt").await;
    let (status, page) = server.add("blue-shirt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(line_ids(&page).len(), 1);
    assert!(page.contains(r#"value="2""#));
    assert!(page.contains("Total: $100.00"));
    assert_eq!(server.badge_count().await, 2);
}

#[tokio::test]
async fn test_add_shows_toast_once() {
    let server = TestServer::start().await;
    let (_, page) = server.add("wool-beanie").await;
    assert!(page.contains("Wool Beanie added to cart"));
    assert!(page.contains(r#"data-duration="1200""#));

    let (_, again) = server.get("/cart").await;
    assert!(!again.contains("added to cart"));
}

#[tokio::test]
async fn test_add_redirects_back_to_local_path() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .post(server.url("/cart/add"))
        .form(&[("handle", "leather-belt"), ("return_to", "https://evil.example/")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/");
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    let (status, _) = server.add("wool-scarf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(server.badge_count().await, 0);
}

#[tokio::test]
async fn test_remove_line() {
    let server = TestServer::start().await;
    server.add("blue-shirt").await;
    let (_, page) = server.add("denim-jacket").await;
    let ids = line_ids(&page);
    assert_eq!(ids.len(), 2);

    let (_, page) = server.post("/cart/remove", &[("id", &ids[0])]).await;
    assert_eq!(line_ids(&page), vec![ids[1].clone()]);
    assert!(page.contains("Total: $89.99"));
    assert_eq!(server.badge_count().await, 1);
}

#[tokio::test]
async fn test_remove_unknown_line_is_noop() {
    let server = TestServer::start().await;
    server.add("blue-shirt").await;

    let (status, page) = server
        .post("/cart/remove", &[("id", "00000000-0000-4000-8000-000000000000")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line_ids(&page).len(), 1);

    let (status, _) = server.post("/cart/remove", &[("id", "not-an-id")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.badge_count().await, 1);
}

#[tokio::test]
async fn test_quantity_is_coerced() {
    let server = TestServer::start().await;
    let (_, page) = server.add("linen-trousers").await;
    let id = line_ids(&page).remove(0);

    let (_, page) = server
        .post("/cart/update", &[("id", &id), ("quantity", "3")])
        .await;
    assert!(page.contains("Total: $136.50"));
    assert_eq!(server.badge_count().await, 3);

    for raw in ["0", "-4", "abc", ""] {
        server
            .post("/cart/update", &[("id", &id), ("quantity", raw)])
            .await;
        assert_eq!(server.badge_count().await, 1, "quantity {raw:?}");
    }

    server
        .post("/cart/update", &[("id", &id), ("quantity", " 7 pairs")])
        .await;
    assert_eq!(server.badge_count().await, 7);
}

#[tokio::test]
async fn test_carts_are_per_browser() {
    let server = TestServer::start().await;
    server.add("blue-shirt").await;

    let other = server.other_browser();
    let body = other
        .get(server.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(extract_badge(&body), Some(0));
    assert_eq!(server.badge_count().await, 1);
}

#[tokio::test]
async fn test_cart_total_matches_line_prices() {
    let server = TestServer::start().await;
    for handle in ["blue-shirt", "canvas-sneakers", "wool-beanie", "wool-beanie"] {
        server.add(handle).await;
    }
    let (_, page) = server.get("/cart").await;

    let expected: Price = ["$50", "$64.00", "$18", "$18"].iter().copied().map(Price::parse).sum();
    assert_eq!(expected.to_string(), "$150.00");
    assert!(page.contains(&format!("Total: {expected}")));
}
