use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{parse_snapshot, DataUnavailable, ProgressSnapshot, SnapshotSource};

/// Client for the public progression endpoint.
///
/// A bare GET: no headers, no auth, no query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureApi {
    endpoint: String,
}

impl SignatureApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl SnapshotSource for SignatureApi {
    async fn fetch(&self) -> Result<ProgressSnapshot, DataUnavailable> {
        let response = Request::get(&self.endpoint)
            .send()
            .await
            .map_err(|e| DataUnavailable::Network(e.to_string()))?;

        if !response.ok() {
            return Err(DataUnavailable::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataUnavailable::Network(e.to_string()))?;

        parse_snapshot(response.status(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_endpoint_is_kept_verbatim() {
        let api = SignatureApi::new(shared::config::DEFAULT_ENDPOINT);
        assert_eq!(api.endpoint(), "https://eci.ec.europa.eu/045/public/api/report/progression");
    }
}
