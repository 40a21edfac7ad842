use crate::domain::model::ModelLookup;
use crate::domain::ports::VehicleRegistry;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REGISTRY_ENDPOINT: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// Client for the NHTSA vPIC `GetModelsForMake` lookup.
#[derive(Debug, Clone)]
pub struct VpicClient {
    client: Client,
    endpoint: Url,
}

impl VpicClient {
    /// No timeout is applied unless one is given.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(ServiceError::ConfigError {
                message: format!("Registry endpoint cannot be used as a base URL: {}", endpoint),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    fn lookup_url(&self, make: &str) -> Url {
        let mut url = self.endpoint.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("GetModelsForMake")
                .push(&make.to_lowercase());
        }
        url.query_pairs_mut().append_pair("format", "json");
        url
    }
}

#[async_trait]
impl VehicleRegistry for VpicClient {
    async fn models_for_make(&self, make: &str) -> Result<ModelLookup> {
        let url = self.lookup_url(make);
        tracing::debug!("Querying vehicle registry: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Vehicle registry response status: {}", status);

        if !status.is_success() {
            return Err(ServiceError::RegistryUnavailable {
                message: format!("registry responded with status {}", status),
            });
        }

        let body = response.bytes().await?;
        let lookup: ModelLookup =
            serde_json::from_slice(&body).map_err(|e| ServiceError::RegistryUnavailable {
                message: format!("unreadable registry response: {}", e),
            })?;

        tracing::debug!(
            "Vehicle registry returned {} models for make '{}'",
            lookup.count,
            make
        );
        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_lookup_url_encodes_make() {
        let client = VpicClient::new("https://vpic.nhtsa.dot.gov/api/vehicles/", None).unwrap();
        let url = client.lookup_url("Alfa Romeo");
        assert_eq!(
            url.as_str(),
            "https://vpic.nhtsa.dot.gov/api/vehicles/GetModelsForMake/alfa%20romeo?format=json"
        );
    }

    #[test]
    fn test_rejects_non_base_endpoint() {
        assert!(VpicClient::new("mailto:registry@example.com", None).is_err());
        assert!(VpicClient::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn test_models_for_make() {
        let server = MockServer::start_async().await;
        let mock = server
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
            .await;

        let client = VpicClient::new(&server.base_url(), None).unwrap();
        let lookup = client.models_for_make("Volkswagen").await.unwrap();

        mock.assert_async().await;
        assert_eq!(lookup.count, 2);
        let names: Vec<&str> = lookup.results.iter().map(|r| r.model_name.as_str()).collect();
        assert_eq!(names, vec!["Golf", "Passat"]);
    }

    #[tokio::test]
    async fn test_server_error_is_registry_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/GetModelsForMake/volkswagen");
                then.status(503);
            })
            .await;

        let client = VpicClient::new(&server.base_url(), None).unwrap();
        let err = client.models_for_make("volkswagen").await.unwrap_err();
        assert!(matches!(err, ServiceError::RegistryUnavailable { .. }));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_registry_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/GetModelsForMake/volkswagen");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let client = VpicClient::new(&server.base_url(), None).unwrap();
        let err = client.models_for_make("volkswagen").await.unwrap_err();
        assert!(matches!(err, ServiceError::RegistryUnavailable { .. }));
    }
}
