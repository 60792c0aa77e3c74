// ============================================================================
// FETCH TRANSPORT - gloo-net + AbortController con timeout fijo
// ============================================================================

use futures::future::{self, Either, FutureExt, LocalBoxFuture};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use web_sys::AbortController;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::TransportError;
use crate::runtime::interval_millis;

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn network(error: impl std::fmt::Display) -> TransportError {
    TransportError::Network(error.to_string())
}

async fn fetch(request: Request) -> Result<HttpResponse, TransportError> {
    let response = request.send().await.map_err(network)?;
    let status = response.status();
    let headers = response.headers().entries().collect();
    let body = response.binary().await.map_err(network)?;
    Ok(HttpResponse { status, headers, body })
}

impl Transport for FetchTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        async move {
            let controller = AbortController::new()
                .map_err(|e| TransportError::Network(format!("{:?}", e)))?;
            let signal = controller.signal();

            let mut builder = builder_for(request.method, &request.url).abort_signal(Some(&signal));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(bytes) => builder.body(js_sys::Uint8Array::from(bytes.as_slice())),
                None => builder.build(),
            }
            .map_err(network)?;

            let timer = TimeoutFuture::new(interval_millis(request.timeout));
            match future::select(fetch(built).boxed_local(), timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => {
                    log::warn!("⏱️ {} {} abortada tras {:?}", request.method, request.url, request.timeout);
                    controller.abort();
                    Err(TransportError::Timeout)
                }
            }
        }
        .boxed_local()
    }
}
