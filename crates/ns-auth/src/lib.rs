//! # ns-auth — Route guard
//!
//! Decides whether a navigation may proceed given the session's
//! authentication state. When no session state has been initialised yet,
//! the last persisted session snapshot stands in for it.
//!
//! ```text
//! navigate(full_path)
//!     │
//!     ├── RouteTable::find_by_path ──> Route { meta }
//!     ├── AuthState | SessionLoader ──> authenticated?
//!     ▼
//! can_enter ──> Allow | Redirect { login?redirect=.. | user }
//! ```

pub mod error;
pub mod gate;
pub mod route;
pub mod session;
pub mod state;
pub mod store;

pub use error::*;
pub use gate::*;
pub use route::*;
pub use session::*;
pub use state::*;
pub use store::*;
