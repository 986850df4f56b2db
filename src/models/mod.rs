//! Request and Response models for the admin API
//!
//! DTOs serialized to and from HTTP bodies.

pub mod requests;
pub mod responses;

pub use requests::SetRequest;
pub use responses::{
    CleanupResponse, ClearResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse,
    SetResponse, StatsResponse,
};
