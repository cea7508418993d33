//! OpenAlex Search
//!
//! A search client for the OpenAlex catalog of academic works. Translates
//! structured filters into the API's filter-expression syntax, fetches result
//! pages, and exports works as XML, CSV or plain-text summaries.
//!
//! # Features
//!
//! - **Filter builder**: date ranges, document types and topics as one `filter` expression
//! - **Polite pool**: a `mailto` courtesy contact is attached to every catalog request
//! - **Last-issued-wins**: stale search and suggestion responses are discarded by generation
//! - **Exports**: XML per work, CSV per page, summary documents, open access files
//!
//! # Example
//!
//! ```no_run
//! use openalex_search::{OpenAlexClient, config::Config, query::SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = OpenAlexClient::new(config)?;
//!
//!     let params = SearchParams {
//!         query: Some("graphene".to_string()),
//!         ..Default::default()
//!     };
//!     let page = client.search(&params).await?;
//!     println!("{} works", page.meta.count);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod models;
pub mod query;
pub mod suggest;
pub mod view;

pub use app::App;
pub use client::{CatalogApi, OpenAlexClient};
pub use config::Config;
pub use error::{ClientError, ExportError};
