pub mod cache_policy;
pub use cache_policy::{CacheDecision, CachePolicy, LookupContext};

pub mod error;
pub use error::CacheError;

pub mod location_resolver;
pub use location_resolver::LocationResolver;

pub mod single_flight;
pub use single_flight::KeyedLocks;
