//! `ureq`-backed implementation of [`RemoteGateway`].

use serde::de::DeserializeOwned;

use crate::config::GatewaySettings;
use crate::http_client;

use super::multipart::MultipartForm;
use super::types::{CsvUpload, HistoryRecord, MetricsResult, Model};
use super::RemoteGateway;

const MODELS_PATH: &str = "/models";
const PREDICT_PATH: &str = "/predict";
const HISTORY_PATH: &str = "/performance_history";
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Failure of a single remote call.
///
/// The variants carry detail for logs; the dashboard only ever shows a
/// generic message for them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Response rejected: {0}")]
    TooLarge(String),
}

/// Scoring-service client speaking plain HTTP/JSON.
pub struct HttpGateway {
    base_url: String,
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpGateway {
    pub fn new(settings: &GatewaySettings) -> Self {
        let settings = settings.clone().normalized();
        Self {
            agent: http_client::agent(&settings),
            base_url: settings.base_url,
            max_response_bytes: settings.max_response_bytes,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(map_call_error)?;
        self.decode(response)
    }

    fn decode<T: DeserializeOwned>(&self, response: ureq::Response) -> Result<T, TransportError> {
        let status = response.status();
        if !(200..300).contains(&status) {
            let body = read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
            return Err(TransportError::Status { code: status, body });
        }
        let bytes = http_client::read_response_bytes(response, self.max_response_bytes)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::InvalidData => TransportError::TooLarge(err.to_string()),
                _ => TransportError::Transport(err.to_string()),
            })?;
        serde_json::from_slice(&bytes).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

impl RemoteGateway for HttpGateway {
    fn list_models(&self) -> Result<Vec<Model>, TransportError> {
        self.get_json(MODELS_PATH)
    }

    fn submit(
        &self,
        file: &CsvUpload,
        model_type: &str,
        model_version: &str,
    ) -> Result<MetricsResult, TransportError> {
        let (content_type, body) = MultipartForm::new()
            .file("file", &file.file_name, "text/csv", &file.bytes)
            .text("model_type", model_type)
            .text("model_version", model_version)
            .finish();
        let url = self.url(PREDICT_PATH);
        tracing::info!(
            "POST {url} ({} bytes, model {model_type} v{model_version})",
            file.len()
        );
        let response = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("Content-Type", &content_type)
            .send_bytes(&body)
            .map_err(map_call_error)?;
        self.decode(response)
    }

    fn fetch_history(&self) -> Result<Vec<HistoryRecord>, TransportError> {
        self.get_json(HISTORY_PATH)
    }
}

fn map_call_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
            TransportError::Status { code, body }
        }
        ureq::Error::Transport(err) => TransportError::Transport(err.to_string()),
    }
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes =
        http_client::read_response_bytes(response, max_bytes).map_err(|err| err.to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::{json_response, serve_once};

    fn gateway_for(url: &str) -> HttpGateway {
        HttpGateway::new(&GatewaySettings::with_base_url(url))
    }

    #[test]
    fn lists_models_from_json() {
        let (url, requests) = serve_once(json_response(
            "200 OK",
            r#"[{"model_type": "rf", "model_version": "1"}]"#,
        ));
        let models = gateway_for(&url).list_models().unwrap();
        assert_eq!(models, vec![Model::new("rf", "1")]);
        let request = String::from_utf8(requests.recv().unwrap()).unwrap();
        assert!(request.starts_with("GET /models HTTP/1.1"));
    }

    #[test]
    fn submit_sends_multipart_fields() {
        let (url, requests) = serve_once(json_response(
            "200 OK",
            r#"{"metrics": {"accuracy": 0.8, "precision": 0.75, "recall": 0.7, "f1_score": 0.72}}"#,
        ));
        let upload = CsvUpload::new("wine.csv", b"fixed acidity,quality\n7.4,5\n".to_vec());
        let result = gateway_for(&url).submit(&upload, "rf", "1").unwrap();
        assert_eq!(result.metrics.accuracy, 0.8);

        let request = String::from_utf8(requests.recv().unwrap()).unwrap();
        assert!(request.starts_with("POST /predict HTTP/1.1"));
        assert!(request.contains("multipart/form-data; boundary=modelboard-"));
        assert!(request.contains("name=\"file\"; filename=\"wine.csv\""));
        assert!(request.contains("fixed acidity,quality\n7.4,5\n"));
        assert!(request.contains("name=\"model_type\"\r\n\r\nrf\r\n"));
        assert!(request.contains("name=\"model_version\"\r\n\r\n1\r\n"));
    }

    #[test]
    fn maps_server_errors_to_status() {
        let (url, _) = serve_once(json_response("400 BAD REQUEST", r#"{"error": "bad csv"}"#));
        let upload = CsvUpload::new("x.csv", Vec::new());
        let err = gateway_for(&url).submit(&upload, "rf", "1").unwrap_err();
        match err {
            TransportError::Status { code, body } => {
                assert_eq!(code, 400);
                assert!(body.contains("bad csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_undecodable_history() {
        let (url, _) = serve_once(json_response("200 OK", "<html>oops</html>"));
        let err = gateway_for(&url).fetch_history().unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn reports_connection_failures() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = gateway_for(&format!("http://{addr}"))
            .list_models()
            .unwrap_err();
        assert!(matches!(err, TransportError::Transport(_)));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let gateway = gateway_for("http://localhost:5000/");
        assert_eq!(gateway.url(MODELS_PATH), "http://localhost:5000/models");
    }
}
