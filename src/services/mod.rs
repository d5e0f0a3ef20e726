pub use errors::{ServiceError, ServiceResult};

pub mod errors;
pub mod groomers;
pub mod reviews;
