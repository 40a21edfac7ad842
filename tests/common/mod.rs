#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use mycars::adapters::{SqliteStore, VpicClient};
use mycars::core::CarStore;
use mycars::domain::model::{Car, NewCar, NewRating};
use mycars::{router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running service bound to an ephemeral port, with a mocked vehicle registry.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub registry: MockServer,
    pub store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_page_size(10).await
    }

    pub async fn spawn_with_page_size(page_size: usize) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let database_url = format!("sqlite://{}", temp_dir.path().join("cars.db").display());
        let store = Arc::new(SqliteStore::connect(&database_url, 2).await.unwrap());

        let registry = MockServer::start_async().await;
        let vpic = VpicClient::new(&registry.base_url(), None).unwrap();

        let state = AppState::new(store.clone(), Arc::new(vpic), page_size);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", address),
            client: reqwest::Client::new(),
            registry,
            store,
            _temp_dir: temp_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Registry knows Volkswagen with a Golf and a Passat.
    pub async fn mock_volkswagen(&self) -> Mock<'_> {
        self.registry
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/GetModelsForMake/volkswagen")
                    .query_param("format", "json");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "Count": 2,
                        "Message": "Response returned successfully",
                        "SearchCriteria": "Make:volkswagen",
                        "Results": [
                            {"Make_ID": 482, "Make_Name": "VOLKSWAGEN", "Model_ID": 3133, "Model_Name": "Golf"},
                            {"Make_ID": 482, "Make_Name": "VOLKSWAGEN", "Model_ID": 3134, "Model_Name": "Passat"}
                        ]
                    }));
            })
            .await
    }

    /// Registry has never heard of `make`.
    pub async fn mock_unknown_make(&self, make: &str) -> Mock<'_> {
        let path = format!("/GetModelsForMake/{}", make);
        self.registry
            .mock_async(move |when, then| {
                when.method(GET).path(path.as_str());
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "Count": 0,
                        "Message": "Response returned successfully",
                        "SearchCriteria": format!("Make:{}", make),
                        "Results": []
                    }));
            })
            .await
    }

    pub async fn insert_car(&self, make: &str, model: &str) -> Car {
        self.store
            .insert_car(&NewCar {
                make: make.to_string(),
                model: model.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn insert_rating(&self, car_id: i64, rating: i64) {
        self.store
            .insert_rating(&NewRating { car_id, rating })
            .await
            .unwrap();
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    pub async fn car_results(&self) -> Vec<Value> {
        let (status, body) = self.get_json("/cars/").await;
        assert_eq!(status, reqwest::StatusCode::OK);
        body["results"].as_array().unwrap().clone()
    }
}
