//! Middleware for the HTTP client.
//!
//! [`CourtesyMiddleware`] appends the `mailto` contact to every outgoing
//! request so individual call sites never have to.

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Query parameter carrying the courtesy contact.
pub const MAILTO_PARAM: &str = "mailto";

/// Appends `mailto={contact}` to each request URL.
#[derive(Debug, Clone)]
pub struct CourtesyMiddleware {
    mailto: String,
}

impl CourtesyMiddleware {
    /// Create the middleware for a contact address.
    #[must_use]
    pub fn new(mailto: impl Into<String>) -> Self {
        Self {
            mailto: mailto.into(),
        }
    }
}

#[async_trait::async_trait]
impl Middleware for CourtesyMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let already_set = req.url().query_pairs().any(|(k, _)| k == MAILTO_PARAM);
        if !already_set && !self.mailto.is_empty() {
            req.url_mut().query_pairs_mut().append_pair(MAILTO_PARAM, &self.mailto);
        }

        tracing::debug!(method = %req.method(), path = req.url().path(), "Sending catalog request");
        next.run(req, extensions).await
    }
}
