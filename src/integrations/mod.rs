//! Upstream snapshot sources.

pub mod services {
    pub use crate::services::*;
}

pub mod circuit_breaker {
    pub use crate::circuit_breaker::*;
}

pub mod cache_validator {
    pub use crate::cache_validator::*;
}
