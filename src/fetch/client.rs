use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for remote document sources. Callers pick the
/// client, so tests and embedders can supply their own.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        (**self).execute(req).await
    }
}
