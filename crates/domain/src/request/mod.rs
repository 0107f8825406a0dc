//! Request types for calls against the service.

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::ApiRequest;
