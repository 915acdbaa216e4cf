// Thin namespace wrapper for API-layer components
pub mod client {
    pub use crate::api_client::*;
}

pub mod export {
    pub use crate::export::*;
}
