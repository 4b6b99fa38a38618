//! HTTP client capability shared by every view.

use anyhow::Context;
use reqwest::{RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

/// JSON client bound to the chatbot API base URL.
///
/// Endpoints are addressed by path segments; each segment is percent-encoded,
/// so ids containing `/` or `?` stay inside their segment.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create http client")?;
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid API base URL {:?}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL {} cannot carry a path", base_url);
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> anyhow::Result<T> {
        let response = send(self.client.get(self.url(segments))).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> anyhow::Result<T> {
        let response = send(self.client.post(self.url(segments)).json(body)).await?;
        decode(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> anyhow::Result<T> {
        let response = send(self.client.put(self.url(segments)).json(body)).await?;
        decode(response).await
    }

    pub async fn delete(&self, segments: &[&str]) -> anyhow::Result<()> {
        send(self.client.delete(self.url(segments))).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> anyhow::Result<Response> {
    let response = request.send().await.context("Request failed")?;
    let status = response.status();
    if !status.is_success() {
        let response_txt = response.text().await.unwrap_or_default();
        anyhow::bail!("Error: {}: {}", status, error_detail(&response_txt));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    response.json::<T>().await.context("Failed to parse response")
}

/// The API reports failures as `{"detail": "..."}`; fall back to the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpClient {
        HttpClient::new(base_url).unwrap()
    }

    #[test]
    fn joins_segments_onto_the_base_url() {
        let http = client("http://localhost:8000");
        assert_eq!(http.url(&["chats"]).as_str(), "http://localhost:8000/chats");
        assert_eq!(http.url(&["chatbot", "invoke"]).as_str(), "http://localhost:8000/chatbot/invoke");

        let http = client("https://chat.example.org/api/");
        assert_eq!(http.url(&["chat-history", "c1"]).as_str(), "https://chat.example.org/api/chat-history/c1");
    }

    #[test]
    fn ids_stay_inside_their_segment() {
        let http = client("http://localhost:8000");
        let url = http.url(&["chats", "a/b"]);
        assert_eq!(url.as_str(), "http://localhost:8000/chats/a%2Fb");

        let url = http.url(&["chats", "a?x#y"]);
        assert_eq!(url.path(), "/chats/a%3Fx%23y");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpClient::new("not a url").is_err());
        assert!(HttpClient::new("mailto:someone@example.org").is_err());
    }

    #[test]
    fn error_detail_prefers_the_api_message() {
        assert_eq!(error_detail(r#"{"detail": "Chat not found"}"#), "Chat not found");
        assert_eq!(error_detail("Bad gateway"), "Bad gateway");
    }
}
