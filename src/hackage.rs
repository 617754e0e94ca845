use std::fmt;
use std::time::Duration;

use reqwest::Client;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::html;

const HACKAGE_URL: &str = "https://hackage.haskell.org";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Which of the two pages a fetch was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Package,
    Module,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Package => f.write_str("package"),
            PageKind::Module => f.write_str("module"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocsFetchError {
    #[error("Error fetching {page} page from {url}: {source}")]
    Fetch {
        page: PageKind,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid module link '{href}' on the package page {url}: {source}")]
    InvalidUrl {
        href: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Module '{module}' not found on the package page {url}.")]
    ModuleNotFound { module: String, url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema, Eq, PartialEq)]
pub struct DocRequest {
    #[schemars(description = "The full Hackage package name (e.g. \"yesod-persistent\").")]
    pub package: String,
    #[schemars(description = "The package version (e.g. \"2.10.0\").")]
    pub version: String,
    #[schemars(description = "The module name to look up (e.g. \"Database.Persist\" or \"Control.Lens\").")]
    pub module: String,
}

impl DocRequest {
    pub fn new(package: &str, version: &str, module: &str) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
            module: module.to_string(),
        }
    }
}

/// Reads module documentation from a Hackage-style host.
///
/// The client keeps no HTTP state between calls; every fetch opens its own
/// connection and releases it before returning.
#[derive(Debug, Clone)]
pub struct HackageClient {
    base_url: String,
}

impl Default for HackageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HackageClient {
    pub fn new() -> Self {
        Self::with_base_url(HACKAGE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the package landing page that lists the module links.
    pub fn index_url(&self, package: &str, version: &str) -> String {
        format!("{}/package/{}-{}", self.base_url, package, version)
    }

    /// Runs the whole pipeline: locate the module page, then reduce it to text.
    pub async fn fetch_docs(&self, request: &DocRequest) -> Result<String, DocsFetchError> {
        let module_url = self.resolve_module(request).await?;
        self.fetch_module_text(&module_url).await
    }

    /// Finds the absolute URL of `request.module` on the package index page.
    pub async fn resolve_module(&self, request: &DocRequest) -> Result<Url, DocsFetchError> {
        let index_url = self.index_url(&request.package, &request.version);
        let index_page = fetch_page(PageKind::Package, &index_url).await?;

        let href = html::find_module_href(&index_page, &request.module).ok_or_else(|| {
            tracing::warn!("Module {} not listed on {}", request.module, index_url);
            DocsFetchError::ModuleNotFound {
                module: request.module.clone(),
                url: index_url.clone(),
            }
        })?;

        let module_url = Url::parse(&index_url)
            .and_then(|base| base.join(&href))
            .map_err(|source| {
                tracing::warn!("Module link {} on {} is not a valid URL: {}", href, index_url, source);
                DocsFetchError::InvalidUrl {
                    href: href.clone(),
                    url: index_url.clone(),
                    source,
                }
            })?;
        tracing::debug!("Resolved module {} to {}", request.module, module_url);
        Ok(module_url)
    }

    /// Fetches a module page and flattens it into normalized text.
    pub async fn fetch_module_text(&self, url: &Url) -> Result<String, DocsFetchError> {
        let page = fetch_page(PageKind::Module, url.as_str()).await?;
        Ok(html::extract_text(&page))
    }
}

/// Single GET with a fixed timeout. The client lives only for this call.
async fn fetch_page(page: PageKind, url: &str) -> Result<String, DocsFetchError> {
    tracing::info!("Fetching {} page from: {}", page, url);

    let fetch = async {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    };

    fetch.await.map_err(|source| {
        tracing::warn!("Fetching {} failed: {}", url, source);
        DocsFetchError::Fetch {
            page,
            url: url.to_string(),
            source,
        }
    })
}
