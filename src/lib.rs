//! EduWaka client library.
//!
//! Talks to the remote EduWaka admission-guidance API on behalf of Nigerian
//! students: account/session management, institution and course search, fee
//! and subject-combination guidance, AI eligibility analysis, and the chat
//! assistant.
//!
//! The one stateful component is [`session::SessionManager`], which owns the
//! persisted token pair and the advisory identity decoded from it. Everything
//! else is a stateless call against [`api::ApiClient`] or a pure function in
//! [`guidance`].

pub mod api;
pub mod config;
pub mod error;
pub mod guidance;
pub mod session;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use session::{DisplayIdentity, SessionManager, SessionState, TokenStore};
