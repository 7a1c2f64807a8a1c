//! Artifact download.

use reqwest::header::USER_AGENT;

use crate::error::update::UpdateError;

/// Some mod hosts refuse non-browser clients.
const BROWSER_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/87.0.4280.141 Safari/537.36"
);

/// Downloads the artifact at `url`.
///
/// # Returns
/// - `Ok(Vec<u8>)` - Response body
/// - `Err(UpdateError::DownloadFailed)` - Non-success status, body kept for diagnostics
/// - `Err(UpdateError::Transport)` - Network failure
pub async fn download_artifact(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<u8>, UpdateError> {
    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Download of {} failed ({}): {}", url, status, body);
        return Err(UpdateError::DownloadFailed { status, body });
    }

    let bytes = response.bytes().await?;
    tracing::debug!("Downloaded {} bytes from {}", bytes.len(), url);

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Tests that the artifact is fetched with a browser user agent.
    ///
    /// Expected: Ok with the response bytes
    #[tokio::test]
    async fn returns_body_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/Mod-1.0.jar"))
            .and(header("user-agent", BROWSER_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 3, 4]))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/files/Mod-1.0.jar", server.uri());
        let bytes = download_artifact(&reqwest::Client::new(), &url).await.unwrap();

        assert_eq!(bytes, vec![0x50, 0x4b, 3, 4]);
    }

    /// Tests that an error status is reported with its body.
    ///
    /// Expected: Err(DownloadFailed) with 404 and the host's message
    #[tokio::test]
    async fn error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such release"))
            .mount(&server)
            .await;

        let url = format!("{}/files/missing.jar", server.uri());
        let result = download_artifact(&reqwest::Client::new(), &url).await;

        match result {
            Err(UpdateError::DownloadFailed { status, body }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "no such release");
            }
            other => panic!("expected DownloadFailed, got {:?}", other),
        }
    }
}
