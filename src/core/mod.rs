pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{StoreError, StoreResult, SyncError, SyncResult};
pub use state::SessionState;
