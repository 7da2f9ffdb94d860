//! Reading leaderboard documents from disk or over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for Source {
    fn from(raw: &str) -> Self {
        Source::parse(raw)
    }
}

/// GETs `url`; a non-success status is an error.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Loads a document from a local file or fetches it over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn read_source<C: HttpClient>(client: &C, source: &Source) -> Result<Vec<u8>> {
    let bytes = match source {
        Source::Url(url) => fetch_bytes(client, url)
            .await
            .with_context(|| format!("failed to fetch {url}"))?,
        Source::Path(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
    };
    debug!(bytes = bytes.len(), "Source read");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("https://example.com/data.json"),
            Source::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            Source::parse("data/teacher_leaderboard.json"),
            Source::Path(PathBuf::from("data/teacher_leaderboard.json"))
        );
        // a local file that merely starts with "http"
        assert_eq!(
            Source::parse("http_dump.json"),
            Source::Path(PathBuf::from("http_dump.json"))
        );
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let source = Source::parse("/definitely/not/here.json");
        let err = read_source(&BasicClient::new(), &source).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_read_local_file() {
        let path = std::env::temp_dir().join("teacher_leaderboard_fetch_test.json");
        std::fs::write(&path, b"{}").unwrap();

        let bytes = read_source(&BasicClient::new(), &Source::Path(path.clone()))
            .await
            .unwrap();
        assert_eq!(bytes, b"{}");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_url_body() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/teachers.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"teachers": []}"#))
            .mount(&server)
            .await;

        let source = Source::parse(&format!("{}/teachers.json", server.uri()));
        let bytes = read_source(&BasicClient::new(), &source).await.unwrap();
        assert_eq!(bytes, br#"{"teachers": []}"#);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_fails() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/gone.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&server)
            .await;

        let url = format!("{}/gone.json", server.uri());
        let err = fetch_bytes(&BasicClient::new(), &url).await.unwrap_err();
        assert!(format!("{err:#}").contains("404"));

        let err = read_source(&BasicClient::new(), &Source::Url(url))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to fetch"));
    }
}
