//! End-to-end tests of the HTTP surface over an in-process store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;

mod common;
use common::*;

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn add_customer_with_only_name() {
        let (app, _store) = setup();
        let (status, body) = post_json(&app, "/add-customer/", &json!({"name": "Alice"})).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["data"]["id"].is_i64());
        assert_eq!(body["data"]["name"], "Alice");
        let keys: Vec<&String> = body["data"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2, "absent optionals must not be stored: {keys:?}");
    }

    #[tokio::test]
    async fn created_item_echoes_every_supplied_field() {
        let (app, _store) = setup();
        let payload = json!({
            "name": "Hex bolt M8",
            "sku": "HB-M8",
            "category": "fasteners",
            "price": 0.35,
            "stocklevel": 1200,
            "supplier_id": 4
        });
        let (status, body) = post_json(&app, "/items/", &payload).await;

        assert_eq!(status, StatusCode::CREATED);
        for (k, v) in payload.as_object().unwrap() {
            assert_eq!(&body["data"][k], v, "field {k}");
        }
        assert!(body["data"]["created_at"].is_string());
    }

    #[tokio::test]
    async fn created_order_echoes_every_supplied_field() {
        let (app, _store) = setup();
        let payload = json!({
            "item_id": 1,
            "supplier_id": 2,
            "customer_id": 3,
            "quantity": 5,
            "order_date": "2024-06-01",
            "expected_date": "2024-06-10",
            "status": "pending",
            "total_price": 120,
            "notes": "leave at gate"
        });
        let (status, body) = post_json(&app, "/add-order", &payload).await;

        assert_eq!(status, StatusCode::CREATED);
        for (k, v) in payload.as_object().unwrap() {
            assert_eq!(&body["data"][k], v, "field {k}");
        }
    }

    #[tokio::test]
    async fn missing_required_field_is_422_and_nothing_is_inserted() {
        let (app, store) = setup();

        let (status, body) = post_json(&app, "/add-supplier/", &json!({"address": "Pune"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(store.row_count("suppliers"), 0);

        let (status, _) = post_json(&app, "/items/", &json!({"name": null})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.row_count("items"), 0);
    }

    #[tokio::test]
    async fn field_rules_reject_bad_values() {
        let (app, store) = setup();
        let (status, _) = post_json(&app, "/add-customer", &json!({"name": "Bob", "email": "bob-at-home"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, _) = post_json(&app, "/add-order", &json!({"item_id": 1, "quantity": 0})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.row_count("customers") + store.row_count("orders"), 0);
    }

    #[tokio::test]
    async fn keys_outside_the_columns_are_422_and_nothing_is_inserted() {
        let (app, store) = setup();
        let (status, body) = post_json(
            &app,
            "/items/",
            &json!({"name": "Bolt", "stocklevel": 4, "lastUpdated": "2024-01-01"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(body["error"]["message"].as_str().unwrap().contains("lastUpdated"));

        for payload in [
            json!({"name": "Bolt", "stockLevel": 4}),
            json!({"name": "Bolt", "supplier": 2}),
        ] {
            let (status, _) = post_json(&app, "/items/", &payload).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{payload}");
        }
        let (status, _) = post_json(&app, "/add-customer", &json!({"name": "Alice", "phone": "5551234567"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.row_count("items") + store.row_count("customers"), 0);
    }

    #[tokio::test]
    async fn short_customer_address_is_422() {
        let (app, store) = setup();
        let (status, _) = post_json(&app, "/add-customer", &json!({"name": "Alice", "address": "B2"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.row_count("customers"), 0);
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        let (app, _store) = setup();
        let (status, body) = post_raw(&app, "/items", "{not json".into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");

        let (status, _) = post_json(&app, "/items", &json!(["Bolt"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn supply_derives_stock_status() {
        let (app, _store) = setup();
        let (_, low) = post_json(&app, "/add-supply/", &json!({"item_id": 1, "supplier_id": 2, "quantity": 3})).await;
        assert_eq!(low["data"]["stock_status"], "Low Stock");
        let (_, out) = post_json(&app, "/add-supply/", &json!({"item_id": 1, "quantity": 0})).await;
        assert_eq!(out["data"]["stock_status"], "Out of Stock");
        let (_, given) = post_json(
            &app,
            "/add-supply/",
            &json!({"item_id": 1, "quantity": 0, "stock_status": "In Stock"}),
        )
        .await;
        assert_eq!(given["data"]["stock_status"], "In Stock");
    }

    #[tokio::test]
    async fn duplicate_create_route_is_not_served() {
        let (app, _store) = setup();
        let (status, _) = post_json(&app, "/add-item", &json!({"name": "Bolt"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn zero_rows_inserted_is_500() {
        let app = app_with(Arc::new(SilentInsertStore));
        let (status, body) = post_json(&app, "/add-supplier", &json!({"name": "Acme"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "store_error");
    }
}

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn empty_lists_are_200() {
        let (app, _store) = setup();
        for uri in ["/items/", "/suppliers/", "/customers/", "/orders/", "/inventory"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["data"], json!([]), "{uri}");
            assert_eq!(body["meta"]["count"], 0, "{uri}");
        }
    }

    #[tokio::test]
    async fn trailing_slash_is_optional() {
        let (app, store) = setup();
        store.seed("items", vec![row(json!({"id": 1, "name": "Bolt"}))]);
        let (_, with) = get(&app, "/items/").await;
        let (_, without) = get(&app, "/items").await;
        assert_eq!(with, without);
        assert_eq!(with["meta"]["count"], 1);
    }

    #[tokio::test]
    async fn list_keeps_store_order() {
        let (app, _store) = setup();
        for name in ["c", "a", "b"] {
            post_json(&app, "/add-supplier/", &json!({"name": name})).await;
        }
        let (_, body) = get(&app, "/suppliers/").await;
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn get_item_by_id() {
        let (app, _store) = setup();
        let (_, created) = post_json(&app, "/items/", &json!({"name": "Washer"})).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, body) = get(&app, &format!("/items/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Washer");
    }

    #[tokio::test]
    async fn unknown_id_is_404() {
        let (app, store) = setup();
        store.seed("items", vec![row(json!({"id": 1, "name": "Bolt"}))]);
        let (status, body) = get(&app, "/items/999999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn malformed_id_is_422() {
        let (app, _store) = setup();
        for uri in ["/items/abc", "/items/0", "/customers/-4"] {
            let (status, _) = get(&app, uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }
    }

    #[tokio::test]
    async fn duplicate_ids_fail_deterministically() {
        let (app, store) = setup();
        store.seed(
            "customers",
            vec![row(json!({"id": 7, "name": "A"})), row(json!({"id": 7, "name": "B"}))],
        );
        let (status, _) = get(&app, "/customers/7").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn orders_include_display_names() {
        let (app, store) = setup();
        store.seed("items", vec![row(json!({"id": 1, "name": "Bolt"}))]);
        store.seed("suppliers", vec![row(json!({"id": 2, "name": "Acme"}))]);
        store.seed("customers", vec![row(json!({"id": 3, "name": "Alice"}))]);
        store.seed(
            "orders",
            vec![
                row(json!({"id": 1, "item_id": 1, "supplier_id": 2, "customer_id": 3, "quantity": 2})),
                row(json!({"id": 2, "item_id": 1, "supplier_id": 99, "quantity": 1})),
            ],
        );

        let (status, body) = get(&app, "/orders/").await;
        assert_eq!(status, StatusCode::OK);
        let first = &body["data"][0];
        assert_eq!(first["items"]["name"], "Bolt");
        assert_eq!(first["supplier"]["name"], "Acme");
        assert_eq!(first["customers"]["name"], "Alice");
        let second = &body["data"][1];
        assert_eq!(second["supplier"], Value::Null);
        assert_eq!(second["customers"], Value::Null);

        let (status, one) = get(&app, "/orders/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(one["data"]["customers"]["name"], "Alice");
    }

    #[tokio::test]
    async fn inventory_flattens_item_and_supplier_fields() {
        let (app, store) = setup();
        store.seed(
            "items",
            vec![row(json!({"id": 1, "name": "Bolt", "sku": "B-1", "category": "fasteners", "price": 0.5}))],
        );
        store.seed("suppliers", vec![row(json!({"id": 2, "name": "Acme"}))]);
        post_json(&app, "/add-supply", &json!({"item_id": 1, "supplier_id": 2, "quantity": 40})).await;

        let (status, body) = get(&app, "/inventory").await;
        assert_eq!(status, StatusCode::OK);
        let r = &body["data"][0];
        assert_eq!(r["item_name"], "Bolt");
        assert_eq!(r["item_sku"], "B-1");
        assert_eq!(r["item_category"], "fasteners");
        assert_eq!(r["item_price"], 0.5);
        assert_eq!(r["supplier_name"], "Acme");
        assert_eq!(r["quantity"], 40);
        assert_eq!(r["stock_status"], "In Stock");
    }
}

mod revenue_tests {
    use super::*;

    #[tokio::test]
    async fn sums_total_price_with_nulls_as_zero() {
        let (app, store) = setup();
        store.seed(
            "orders",
            vec![
                row(json!({"id": 1, "total_price": 10.5})),
                row(json!({"id": 2, "total_price": null})),
                row(json!({"id": 3, "total_price": 5})),
            ],
        );
        let (status, body) = get(&app, "/orders/total-revenue/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"total_revenue": 15.5}));
    }

    #[tokio::test]
    async fn no_orders_means_zero() {
        let (app, _store) = setup();
        let (status, body) = get(&app, "/orders/total-revenue").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], 0.0);
    }
}

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn store_failures_are_500_with_message() {
        let app = app_with(Arc::new(FailingStore));
        for uri in ["/items/", "/items/1", "/orders/total-revenue/", "/inventory"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert!(
                body["error"]["message"].as_str().unwrap().contains("upstream connect error"),
                "{uri}: {body}"
            );
        }
        let (status, _) = post_json(&app, "/add-customer/", &json!({"name": "Alice"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_runs_before_the_store() {
        let app = app_with(Arc::new(FailingStore));
        let (status, _) = post_json(&app, "/add-customer/", &json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod routing_tests {
    use super::*;

    fn oversized_body() -> String {
        json!({"name": "x".repeat(70_000)}).to_string()
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let (app, _store) = setup();
        let (status, body) = get(&app, "/warehouses").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        let (app, store) = setup();
        store.seed("items", vec![row(json!({"id": 1, "name": "Bolt"}))]);
        let request = Request::builder().method("DELETE").uri("/items/1").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"]["code"], "method_not_allowed");
        assert_eq!(store.row_count("items"), 1);
    }

    #[tokio::test]
    async fn declared_oversized_body_is_json_413() {
        let (app, store) = setup();
        let body = oversized_body();
        let request = Request::builder()
            .method("POST")
            .uri("/items/")
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len())
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "payload_too_large");
        assert_eq!(store.row_count("items"), 0);
    }

    #[tokio::test]
    async fn streamed_oversized_body_is_json_413() {
        let (app, store) = setup();
        let (status, body) = post_raw(&app, "/items/", oversized_body()).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "payload_too_large");
        assert_eq!(store.row_count("items"), 0);
    }
}

mod common_route_tests {
    use super::*;

    #[tokio::test]
    async fn health_and_version() {
        let (app, _store) = setup();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (_, body) = get(&app, "/version").await;
        assert_eq!(body["name"], "invenflow-gateway");
    }

    #[tokio::test]
    async fn readiness_reflects_store() {
        let (app, _store) = setup();
        let (status, _) = get(&app, "/ready").await;
        assert_eq!(status, StatusCode::OK);

        let app = app_with(Arc::new(FailingStore));
        let (status, body) = get(&app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["store"], "unavailable");
    }

    #[tokio::test]
    async fn cors_allows_only_configured_origin() {
        let (app, _store) = setup();
        let preflight = |origin: &str| {
            Request::builder()
                .method("OPTIONS")
                .uri("/items/")
                .header("Origin", origin)
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap()
        };

        let response = tower::ServiceExt::oneshot(app.clone(), preflight(ORIGIN)).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            ORIGIN
        );

        let response = tower::ServiceExt::oneshot(app, preflight("http://evil.example")).await.unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
