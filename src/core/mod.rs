// Domain-layer modules and shared errors/models
pub mod filter {
    pub use crate::filter::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod store {
    pub use crate::store::*;
}

pub mod favorites {
    pub use crate::favorites::*;
}

pub mod errors {
    pub use crate::errors::*;
}
