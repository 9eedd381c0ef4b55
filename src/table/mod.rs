//! Multi-table support with an async actor model.
//!
//! Each table runs in its own Tokio task with an mpsc message inbox; the
//! [`TableManager`] spawns [`TableActor`] instances and provides table
//! discovery and join routing. Tables never share mutable state, so
//! cross-table races are impossible by construction.
//!
//! ```ignore
//! use holdem_engine::table::{TableConfig, TableManager};
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = TableManager::new();
//!     let id = manager.create_table(TableConfig::default()).await.unwrap();
//!     let (table, seat) = manager.join_any("alice".into()).await.unwrap();
//! }
//! ```

pub mod actor;
pub mod config;
pub mod manager;
pub mod messages;

/// Unique identifier for a running table.
pub type TableId = uuid::Uuid;

pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use manager::{TableManager, TableMetadata};
pub use messages::{TableMessage, TableUpdate};
