//! SeaORM entities. Nested and list fields are JSONB so stored documents keep
//! their shape.

pub mod contact;
pub mod post;
pub mod service_page;
