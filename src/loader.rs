use reqwest::StatusCode;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::{action::Action, model::Company, utils::send_through_channel};

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl LoadError {
    /// Text shown in place of the table.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_owned()
        } else {
            message
        }
    }
}

/// Classifies a finished response. Anything outside 2xx is reported by its
/// status code before the body is even looked at.
pub fn decode(status: StatusCode, body: &[u8]) -> Result<Vec<Company>, LoadError> {
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    Ok(serde_json::from_slice(body)?)
}

#[derive(Debug, Clone)]
pub struct CompanyLoader {
    client: reqwest::Client,
    endpoint: String,
}

impl CompanyLoader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self) -> Result<Vec<Company>, LoadError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode(status, &body)
    }

    /// Issues one request in the background and reports the outcome as a
    /// single action. No retry, no de-duplication across calls.
    pub fn spawn(&self, tx: UnboundedSender<Action>) -> JoinHandle<()> {
        let loader = self.clone();
        let channel = Some(tx);

        tokio::spawn(async move {
            let action = match loader.fetch().await {
                Ok(companies) => {
                    tracing::info!(count = companies.len(), "companies loaded");
                    Action::CompaniesLoaded(companies)
                }
                Err(e) => {
                    tracing::warn!(error = ?e, "loading companies failed");
                    Action::CompaniesFailed(e.message())
                }
            };

            send_through_channel(&channel, action);
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::mpsc,
    };

    use super::*;

    const THREE: &str = r#"[
        {"name":"Acme","industry":"Technology","country":"Indonesia","ceoName":"Jane Doe"},
        {"name":"Globex","industry":"Finance","country":"Germany","ceoName":"Hank Scorpio"},
        {"name":"Initech","industry":"Healthcare","country":"USA","ceoName":"Bill Lumbergh"}
    ]"#;

    /// Answers exactly one request with the given status line and body.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = [0u8; 4096];
            let _ = socket.read(&mut buffer).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{address}/companies")
    }

    #[test]
    fn decode_keeps_order() {
        let companies = decode(StatusCode::OK, THREE.as_bytes()).unwrap();

        let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["Acme", "Globex", "Initech"], names);
        assert_eq!("Hank Scorpio", companies[1].ceo_name);
    }

    #[test]
    fn decode_reports_status_first() {
        let error = decode(StatusCode::INTERNAL_SERVER_ERROR, THREE.as_bytes()).unwrap_err();

        assert!(matches!(error, LoadError::Status(500)));
        assert_eq!("HTTP 500", error.message());
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let error = decode(StatusCode::OK, br#"{"companies": []}"#).unwrap_err();

        assert!(matches!(error, LoadError::Decode(_)));
        assert!(!error.message().is_empty());
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode(StatusCode::OK, b"[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_decodes_successful_response() {
        let endpoint = serve_once("200 OK", THREE).await;

        let companies = CompanyLoader::new(endpoint).fetch().await.unwrap();

        assert_eq!(3, companies.len());
    }

    #[tokio::test]
    async fn spawn_reports_server_error() {
        let endpoint = serve_once("500 Internal Server Error", "").await;
        let (tx, mut rx) = mpsc::unbounded_channel();

        CompanyLoader::new(endpoint).spawn(tx).await.unwrap();

        assert_eq!(
            Some(Action::CompaniesFailed("HTTP 500".into())),
            rx.recv().await
        );
    }

    #[tokio::test]
    async fn spawn_reports_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let (tx, mut rx) = mpsc::unbounded_channel();

        CompanyLoader::new(format!("http://{address}/companies"))
            .spawn(tx)
            .await
            .unwrap();

        match rx.recv().await {
            Some(Action::CompaniesFailed(message)) => assert!(!message.is_empty()),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
