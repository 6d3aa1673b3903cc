//! HTTP middleware.

mod request_logger;

pub use request_logger::{PROCESSING_TIME_HEADER, REQUEST_ID_HEADER, RequestLogger};
