//! In-memory transport for timing-sensitive scenarios.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gleaner_web::{Page, Transport, WebError};

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

/// A [`Transport`] answering from a fixed URL table.
///
/// Each route has a status, body and artificial latency. A latency longer
/// than the request timeout produces [`WebError::Timeout`] once the timeout
/// elapses. Unknown URLs fail immediately as connection errors. The highest
/// number of requests outstanding at once is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Decrements the in-flight count when a request ends or is cancelled.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, status: u16, body: &str) -> Self {
        self.route_delayed(url, status, body, Duration::ZERO)
    }

    pub fn route_delayed(mut self, url: &str, status: u16, body: &str, delay: Duration) -> Self {
        self.routes.insert(
            url.to_owned(),
            Route {
                status,
                body: body.to_owned(),
                delay,
            },
        );
        self
    }

    /// Every request issued so far, as `"<METHOD> <url>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_count(&self, url: &str) -> usize {
        let wanted = format!("GET {url}");
        self.calls().iter().filter(|c| **c == wanted).count()
    }

    /// Most requests that were ever outstanding at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, method: &str, url: &str, timeout: Duration) -> Result<Route, WebError> {
        self.calls.lock().unwrap().push(format!("{method} {url}"));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        let Some(route) = self.routes.get(url).cloned() else {
            return Err(WebError::Http(format!("connection refused: {url}")));
        };

        if route.delay > timeout {
            tokio::time::sleep(timeout).await;
            return Err(WebError::Timeout(url.to_owned()));
        }
        tokio::time::sleep(route.delay).await;
        Ok(route)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16, WebError> {
        self.answer("HEAD", url, timeout).await.map(|r| r.status)
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<Page, WebError> {
        let route = self.answer("GET", url, timeout).await?;
        Ok(Page {
            status: route.status,
            body: route.body,
        })
    }
}

/// A minimal page whose snippet is its meta description.
pub fn page_with_description(description: &str) -> String {
    format!(
        r#"<html><head><meta name="description" content="{description}"></head><body></body></html>"#
    )
}

/// A minimal page whose snippet is its first paragraph.
pub fn page_with_paragraph(text: &str) -> String {
    format!("<html><body><p>{text}</p></body></html>")
}

/// A DuckDuckGo HTML results page listing `links` in order.
pub fn results_page(links: &[&str]) -> String {
    let mut html = String::from("<html><body>");
    for link in links {
        html.push_str(&format!(
            r#"<div class="result web-result"><a class="result__a" href="{link}">r</a></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}
