// client.rs - HTTP transport for the maze / path-finding service

use std::time::Duration;

use pathviz_core::{
    AlgorithmService, MazeRequest, MazeResponse, PathRequest, PathResponse, ServiceError,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::debug;

const GENERATE_MAZE: &str = "/api/maze/generate";
const FIND_PATH: &str = "/api/path/find";

#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
}

impl HttpService {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "posting request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|error| ServiceError::request(error.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail: rejection_detail(&text),
            });
        }
        if !status.is_success() {
            return Err(ServiceError::request(format!("{url} answered {status}")));
        }

        response
            .json::<R>()
            .await
            .map_err(|error| ServiceError::decode(error.to_string()))
    }
}

impl AlgorithmService for HttpService {
    async fn generate_maze(&self, request: MazeRequest) -> Result<MazeResponse, ServiceError> {
        self.post(GENERATE_MAZE, &request).await
    }

    async fn find_path(&self, request: PathRequest) -> Result<PathResponse, ServiceError> {
        self.post(FIND_PATH, &request).await
    }
}

#[derive(Deserialize)]
struct Rejection {
    detail: serde_json::Value,
}

/// Pulls the human-readable reason out of an error body such as
/// `{"detail": "Start position is a wall"}`.
fn rejection_detail(body: &str) -> String {
    match serde_json::from_str::<Rejection>(body) {
        Ok(Rejection {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(Rejection { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "no detail given".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
