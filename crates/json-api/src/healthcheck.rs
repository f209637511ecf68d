//! Cakeshop JSON API Healthcheck Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::envelope::{Envelope, ok};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Liveness probe; does not touch the database.
#[handler]
pub(crate) async fn handler() -> Json<Envelope<HealthResponse>> {
    ok(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let router = Router::new().push(Router::with_path("healthcheck").get(handler));

        let response: Envelope<HealthResponse> = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        assert!(response.success);
        assert_eq!(response.data.status, "ok");

        Ok(())
    }
}
