use admin_app::clients::{AdminClient, OrderError};
use admin_app::lifecycle::AdminSystem;
use admin_app::model::{OrderId, OrderUpdate, ProductId};
use chrono::NaiveDate;
use data_provider::mock::MockTransport;
use data_provider::{Method, Pagination, ProviderConfig, RestDataProvider};
use serde_json::json;
use std::sync::Arc;

fn system(mock: &MockTransport) -> AdminSystem {
    let provider = RestDataProvider::with_transport(ProviderConfig::default(), mock.clone());
    AdminSystem::with_provider(Arc::new(provider))
}

#[tokio::test]
async fn test_orders_for_product_filters_on_product_id() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders").return_json(
        200,
        json!({
            "data": [
                {"id": 7, "customer_id": 1, "product_id": 3, "quantity": 1, "order_date": "2024-03-02"},
                {"id": 5, "customer_id": 2, "product_id": 3, "quantity": 4, "order_date": "2024-01-15"}
            ],
            "total": 12
        }),
    );

    let page = system(&mock)
        .order_client
        .orders_for_product(ProductId(3), Pagination::new(2, 2))
        .await
        .unwrap();

    // total is the backend's count of all matches, not the page size
    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, OrderId(7));

    let request = mock.last_request().unwrap();
    assert_eq!(request.query_param("filter").as_deref(), Some(r#"{"product_id":3}"#));
    assert_eq!(request.query_param("range").as_deref(), Some("[2,3]"));
    mock.verify();
}

#[tokio::test]
async fn test_update_order_sends_full_record() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders/7").return_json(
        200,
        json!({"data": {"id": 7, "customer_id": 1, "product_id": 3, "quantity": 2, "order_date": "2024-03-02"}}),
    );
    mock.expect(Method::Put, "/api/orders/7").return_json(
        200,
        json!({"data": {"id": 7, "customer_id": 1, "product_id": 3, "quantity": 9, "order_date": "2024-03-02"}}),
    );

    let order = system(&mock)
        .order_client
        .update_order(
            OrderId(7),
            OrderUpdate {
                quantity: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(order.quantity, 9);
    assert_eq!(
        mock.last_request().unwrap().body,
        Some(json!({
            "id": 7,
            "customer_id": 1,
            "product_id": 3,
            "quantity": 9,
            "order_date": "2024-03-02"
        }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_update_order_rejects_early_date() {
    let mock = MockTransport::new();
    let err = system(&mock)
        .order_client
        .update_order(
            OrderId(7),
            OrderUpdate {
                order_date: NaiveDate::from_ymd_opt(2019, 6, 1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_missing_product_blocks_order() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/customers/1").return_json(
        200,
        json!({"data": {"id": 1, "name": "Ada", "email": "ada@example.com"}}),
    );
    mock.expect(Method::Get, "/api/products/99")
        .return_json(404, json!({"error": "Resource not found"}));

    let err = system(&mock)
        .order_client
        .place_order(admin_app::model::OrderCreate {
            customer_id: 1.into(),
            product_id: ProductId(99),
            quantity: 1,
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ProductNotFound(ProductId(99))));
    mock.verify();
}

#[tokio::test]
async fn test_get_and_delete_come_from_admin_client() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "/api/orders/5").return_json(
        200,
        json!({"data": {"customer_id": 2, "product_id": 3, "quantity": 4, "order_date": "2024-01-15"}}),
    );
    mock.expect(Method::Delete, "/api/orders/5").return_json(
        200,
        json!({"data": {"id": 5, "customer_id": 2, "product_id": 3, "quantity": 4, "order_date": "2024-01-15"}}),
    );

    let system = system(&mock);
    // The backend left out `id`; the requested one is filled in.
    let order = system.order_client.get(OrderId(5)).await.unwrap().unwrap();
    assert_eq!(order.id, OrderId(5));

    let deleted = system.order_client.delete(OrderId(5)).await.unwrap();
    assert_eq!(deleted, Some(order));
    mock.verify();
}
