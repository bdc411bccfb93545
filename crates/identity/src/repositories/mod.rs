//! Collaborator contracts and their adapters.
//!
//! The identity core only talks to user rows through [`UserRecordGateway`]
//! and to issued sessions through [`SessionStore`].

pub mod memory_session_store;
pub mod memory_user_gateway;
pub mod redis_session_store;
pub mod session_store;
pub mod user_gateway;

pub use memory_session_store::MemorySessionStore;
pub use memory_user_gateway::MemoryUserGateway;
pub use redis_session_store::RedisSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
pub use user_gateway::{GatewayError, GatewayResult, UserRecordGateway};
