//! # essence-client: Store API Client for Essence POS
//!
//! This crate connects the pure cash-closing logic in `essence-core` to the
//! store's REST API.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Front end (CLI)                                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────────────────┐      ┌─────────────────────────────┐        │
//! │   │ CashClosingWorkflow  │─────►│ essence-core                │        │
//! │   │ load/preview/submit  │      │ finalize_closing, CashCheck │        │
//! │   └──────────┬───────────┘      └─────────────────────────────┘        │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   ┌──────────────────────┐      ┌─────────────────────────────┐        │
//! │   │ ApiClient (reqwest)  │◄─────│ SessionState                │        │
//! │   │                      │      │ token + open session        │        │
//! │   └──────────┬───────────┘      └─────────────────────────────┘        │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   ┌──────────────────────┐                                              │
//! │   │ wire (typed boundary)│  JSON ──► Money / domain types               │
//! │   └──────────────────────┘                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - `ApiClient`, one method per endpoint
//! - [`config`] - Client configuration (TOML + environment)
//! - [`error`] - Client error types
//! - [`state`] - Shared `SessionState`
//! - [`wire`] - Wire DTOs and boundary validation
//! - [`workflow`] - `CashClosingWorkflow`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use essence_client::{ApiClient, CashClosingWorkflow, ClientConfig, SessionState};
//! use essence_core::Money;
//!
//! let config = ClientConfig::load_or_default(None);
//! let api = ApiClient::new(&config, SessionState::new())?;
//! let workflow = CashClosingWorkflow::new(api);
//!
//! let day = workflow.load(date, None).await;
//! let entry = day.entry().with_count(Money::from_units(215_000));
//! println!("{:?}", workflow.preview(&day, &entry));
//! let record = workflow.submit(&day, &entry).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod wire;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::ApiClient;
pub use config::{ApiSettings, ClientConfig, StoreSettings};
pub use error::{ClientError, ClientResult};
pub use state::SessionState;
pub use workflow::{report_file_name, CashClosingWorkflow, ClosingDay};
