use crate::domain::ports::ProviderResult;
use crate::utils::error::ProviderError;
use reqwest::header::COOKIE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

const REQUEST_ID: &str = "untis-json";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    id: &'a str,
    method: &'a str,
    params: serde_json::Value,
    jsonrpc: &'static str,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// JSON-RPC 2.0 transport for `/WebUntis/jsonrpc.do`.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    endpoint: Url,
}

impl RpcClient {
    pub fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
        session_id: Option<&str>,
    ) -> ProviderResult<R> {
        tracing::debug!("Calling WebUntis method {}", method);

        let mut request = self.http.post(self.endpoint.clone()).json(&RpcRequest {
            id: REQUEST_ID,
            method,
            params,
            jsonrpc: "2.0",
        });
        if let Some(session_id) = session_id {
            request = request.header(COOKIE, format!("JSESSIONID={}", session_id));
        }

        let response = request.send().await?.error_for_status()?;
        tracing::debug!("WebUntis response status: {}", response.status());

        let body: RpcResponse = response.json().await?;
        if let Some(fault) = body.error {
            return Err(ProviderError::Rpc {
                method: method.to_string(),
                code: fault.code,
                message: fault.message,
            });
        }

        // `logout` answers with a null result, which the JSON layer reads as absent.
        let result = body.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| ProviderError::InvalidResponse {
            method: method.to_string(),
            message: e.to_string(),
        })
    }
}
