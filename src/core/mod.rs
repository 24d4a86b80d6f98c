// Domain-layer modules and shared errors/models
pub mod normalizer {
    pub use crate::normalizer::*;
}

pub mod comparison {
    pub use crate::comparison::*;
}

pub mod stats {
    pub use crate::stats::*;
}

pub mod report {
    pub use crate::report::*;
}

pub mod categories {
    pub use crate::categories::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
