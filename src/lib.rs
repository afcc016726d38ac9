//! Folk MCP Server - a Model Context Protocol server for the Folk CRM.
//!
//! Exposes Folk's REST API as MCP tools so an AI assistant can look up,
//! browse and update people, companies, notes, reminders, groups and deals.
//!
//! # Architecture
//!
//! - **models**: Typed shapes of Folk's JSON payloads and request bodies
//! - **domain**: Validated argument types (Folk IDs, emails, trigger times)
//! - **error**: Error types for API, configuration and validation failures
//! - **config**: Configuration from environment variables
//! - **client**: Blocking HTTP client for the Folk API plus its async wrapper
//! - **tools**: Search, details, browse and action tiers
//! - **server**: MCP protocol server over stdio
//! - **metrics**: Counters for outbound API traffic

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod tools;

pub use client::{AsyncFolkClient, AsyncFolkClientImpl, FolkClient};
pub use config::Config;
pub use error::{ConfigError, FolkApiError, FolkApiResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Company, Deal, Group, Interaction, Note, Person, Reminder, User};
pub use server::FolkMcpServer;
