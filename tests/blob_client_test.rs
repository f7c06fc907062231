//! Integration tests for the Azure Blob client against a mock server

use ironveil::adapters::azure::BlobStoreClient;
use ironveil::config::{secret_string, AzureConfig};
use ironveil::domain::{IronveilError, TransferError};

fn azure_config(endpoint: &str) -> AzureConfig {
    AzureConfig {
        endpoint: endpoint.to_string(),
        container: "raw-inspection-data".to_string(),
        blob_name: "raw_inspection_data.csv".to_string(),
        sas_token: Some(secret_string("sv=2024&sig=test".to_string())),
        request_timeout_seconds: 5,
    }
}

#[tokio::test]
async fn downloads_blob_bytes() {
    let mut server = mockito::Server::new_async().await;
    let body = "client_name,pipeline_name\nAcme,North\n";
    let mock = server
        .mock("GET", "/raw-inspection-data/raw_inspection_data.csv")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = BlobStoreClient::new(&azure_config(&server.url())).unwrap();
    let bytes = client.download_blob("raw_inspection_data.csv").await.unwrap();

    assert_eq!(bytes, body.as_bytes());
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_blob_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/raw-inspection-data/missing.csv")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let client = BlobStoreClient::new(&azure_config(&server.url())).unwrap();
    let err = client.download_blob("missing.csv").await.unwrap_err();

    assert!(matches!(
        err,
        IronveilError::Transfer(TransferError::BlobNotFound(_))
    ));
}

#[tokio::test]
async fn rejected_credentials_surface_as_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/raw-inspection-data/raw_inspection_data.csv")
        .match_query(mockito::Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    let client = BlobStoreClient::new(&azure_config(&server.url())).unwrap();
    let err = client
        .download_blob("raw_inspection_data.csv")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IronveilError::Transfer(TransferError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn upstream_outage_surfaces_as_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/raw-inspection-data/raw_inspection_data.csv")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = BlobStoreClient::new(&azure_config(&server.url())).unwrap();
    let err = client
        .download_blob("raw_inspection_data.csv")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IronveilError::Transfer(TransferError::ServerError { status: 503, .. })
    ));
}

#[test]
fn invalid_endpoint_is_rejected_at_construction() {
    let config = azure_config("not a url");
    assert!(BlobStoreClient::new(&config).is_err());
}
