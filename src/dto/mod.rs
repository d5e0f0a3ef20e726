pub mod groomers;
pub mod reviews;
