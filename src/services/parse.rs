use anyhow::Context as _;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Mutex;
use tower::{Layer, Service, ServiceExt};
use tracing::warn;

use crate::error::Error;
use crate::types::request::{Request, Trip};

/// Turns raw tokens into requests. `U<n>` and `D<n>` are hall calls and
/// `<from>:<to>` is a trip; trips that go nowhere are dropped.
pub fn parse_batch<T: AsRef<str>>(tokens: &[T]) -> anyhow::Result<Vec<Request>> {
    let mut requests = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        if token.contains(':') {
            let trip: Trip = token.parse()?;
            match trip.requests() {
                Ok(pair) => requests.extend(pair),
                Err(Error::EmptyTrip { floor }) => {
                    warn!(floor, "already on floor, trip dropped");
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            let request: Request = token
                .parse()
                .with_context(|| format!("invalid request token {token:?}"))?;
            requests.push(request);
        }
    }
    Ok(requests)
}

pub struct RequestParseService<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> RequestParseService<S> {
    fn new(inner: S) -> Self {
        RequestParseService {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl<S> Service<Vec<String>> for RequestParseService<S>
where
    S: Service<Vec<Request>, Error = anyhow::Error> + Send + 'static,
    S::Response: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, raw: Vec<String>) -> Self::Future {
        let parsed = parse_batch(raw.as_slice());
        let inner = self.inner.clone();

        Box::pin(async move {
            let requests = parsed?;
            let mut inner = inner.lock().await;
            ServiceExt::<Vec<Request>>::ready(&mut *inner)
                .await?
                .call(requests)
                .await
        })
    }
}

pub struct RequestParseLayer;

impl<S> Layer<S> for RequestParseLayer {
    type Service = RequestParseService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestParseService::new(inner)
    }
}
