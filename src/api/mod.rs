pub mod client;
pub mod endpoints;
pub mod error;
pub mod requests;
pub mod responses;

pub use client::ApiClient;
pub use endpoints::{JobScope, PaymentScope};
pub use error::ApiError;
