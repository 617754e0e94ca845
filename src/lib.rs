//! Hackage Documentation MCP Service
//!
//! This crate provides a Model Context Protocol (MCP) service that reads the
//! documentation of a Haskell module from Hackage and returns it as plain text.
//!
//! # Pipeline
//!
//! 1. The package index page (`/package/{package}-{version}`) is fetched and
//!    scanned for the link whose text is exactly the requested module name.
//! 2. The linked module page is fetched, `script`/`style` elements are
//!    dropped and the rest is flattened into trimmed, non-empty lines.
//!
//! # Modules
//!
//! - [`hackage`]: HTTP fetching and the two-stage pipeline
//! - [`html`]: link lookup and text extraction on parsed HTML
//! - [`mcp`]: MCP tool surface
//! - [`server`]: stdio and SSE transports

pub mod hackage;
pub mod html;
pub mod mcp;
pub mod server;
