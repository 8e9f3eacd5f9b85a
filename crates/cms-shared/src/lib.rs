//! # CMS Shared
//!
//! Wire types shared by the API and its clients: the JSON envelope every
//! response uses and the request/response DTOs that are not domain entities.

pub mod dto;
pub mod response;

pub use response::{
    ApiResponse, CountResponse, ErrorResponse, HealthResponse, MessageResponse, PageResponse,
    UploadResponse,
};
pub use dto::{AdminProfile, AuthResponse, ContactListQuery, LoginRequest};
