//! Integration tests for the mock checkout.

use reqwest::StatusCode;
use stylemart_integration_tests::{TestServer, extract_badge, line_ids};

fn order<'a>(address: &'a str) -> [(&'static str, &'a str); 4] {
    [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("address", address),
        ("payment", "card"),
    ]
}

#[tokio::test]
async fn test_checkout_summary() {
    let server = TestServer::start().await;
    server.add("blue-shirt").await;
    server.add("blue-shirt").await;
    server.add("leather-belt").await;

    let (status, page) = server.get("/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Blue Shirt x2"));
    assert!(page.contains("Leather Belt x1"));
    assert!(page.contains("Total: $132.00"));
    assert!(page.contains(r#"class="active">Checkout"#));
}

#[tokio::test]
async fn test_checkout_clears_cart_and_lands_home() {
    let server = TestServer::start().await;
    server.add("denim-jacket").await;

    let resp = server
        .client
        .post(server.url("/checkout"))
        .form(&order("1 Analytical Way"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/");

    let page = resp.text().await.unwrap();
    assert!(page.contains("✅ Order placed! Thank you."));
    assert!(page.contains(r#"data-duration="2200""#));
    assert_eq!(extract_badge(&page), Some(0));

    let (_, cart) = server.get("/cart").await;
    assert!(line_ids(&cart).is_empty());
    assert!(cart.contains("Total: $0.00"));
}

#[tokio::test]
async fn test_blank_address_keeps_cart() {
    let server = TestServer::start().await;
    server.add("canvas-sneakers").await;

    let resp = server
        .client
        .post(server.url("/checkout"))
        .form(&order("   "))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.url().path(), "/checkout");

    let page = resp.text().await.unwrap();
    assert!(page.contains("Please fill in required fields"));
    assert!(page.contains(r#"value="Ada Lovelace""#));
    assert!(page.contains("Canvas Sneakers x1"));
    assert_eq!(server.badge_count().await, 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_still_completes() {
    let server = TestServer::start().await;
    let (status, page) = server.post("/checkout", &order("1 Analytical Way")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Order placed"));
}
