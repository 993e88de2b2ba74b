//! Serving over a real socket with the full middleware stack.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};

use oasis::greeting;

mod common;

#[tokio::test]
async fn test_serves_islands_with_request_ids() {
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let islands = greeting::router(Arc::new(move || today)).unwrap();
    let (addr, shutdown) = common::start_server(islands).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{}/greeting/hi", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    let request_id = res
        .headers()
        .get("x-request-id")
        .expect("missing x-request-id")
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&request_id).is_ok());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"age": 29, "isBirthday": true}));

    let res = client
        .get(format!("http://{}/greeting", addr))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "client-chosen");
    assert!(res.text().await.unwrap().contains(r#"id="helloID""#));

    let res = client
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = client
        .delete(format!("http://{}/greeting", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_share_frozen_props() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let islands = greeting::router(Arc::new(move || today)).unwrap();
    let (addr, shutdown) = common::start_server(islands).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut handles = Vec::new();
    for _ in 0..20 {
        let client = client.clone();
        let url = format!("http://{}/greeting/hi", addr);
        handles.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            res.json::<Value>().await.unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), json!({"isBirthday": false}));
    }

    shutdown.trigger();
}
