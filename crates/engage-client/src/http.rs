//! XML-over-POST transport.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};

/// Content type of every Engage API exchange.
const CONTENT_TYPE_XML: &str = "text/xml;charset=UTF-8";

/// Thin wrapper around `reqwest` performing one XML POST per call.
///
/// Failures surface directly: nothing here is retried, and a non-2xx
/// status is an error even if the body parses.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    enable_tracing: bool,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            enable_tracing: config.enable_tracing,
        })
    }

    /// POST an XML body and return the response body as text.
    pub async fn post_xml(&self, url: &str, body: String) -> Result<String> {
        if self.enable_tracing {
            debug!(url, request = %body, "sending request");
        }

        let response = self
            .inner
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_XML)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::new(ErrorKind::Http {
                status: status.as_u16(),
                message,
            }));
        }

        let text = response.text().await?;
        if self.enable_tracing {
            debug!(status = status.as_u16(), response = %text, "response received");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> ClientConfig {
        ClientConfig::new(base_url, "jojo", "swordfish").expect("valid config")
    }

    #[tokio::test]
    async fn test_post_xml_sends_content_type_and_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/XMLAPI"))
            .and(header("Content-Type", "text/xml;charset=UTF-8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<Envelope></Envelope>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&test_config(&mock_server.uri())).unwrap();
        let body = transport
            .post_xml(
                &format!("{}/XMLAPI", mock_server.uri()),
                "<Envelope><Body></Body></Envelope>".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(body, "<Envelope></Envelope>");
    }

    #[tokio::test]
    async fn test_post_xml_non_success_status_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/XMLAPI"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&test_config(&mock_server.uri())).unwrap();
        let err = transport
            .post_xml(&format!("{}/XMLAPI", mock_server.uri()), String::new())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(matches!(
            err.kind,
            ErrorKind::Http { status: 503, ref message } if message == "down for maintenance"
        ));
    }

    #[tokio::test]
    async fn test_post_xml_connection_refused_is_transport_error() {
        // Port 1 is essentially never listening.
        let transport = HttpTransport::new(&test_config("http://127.0.0.1:1")).unwrap();
        let err = transport
            .post_xml("http://127.0.0.1:1/XMLAPI", String::new())
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }
}
