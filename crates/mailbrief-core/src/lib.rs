pub mod config;
pub mod error;
pub mod normalize;
pub mod summary;

pub use normalize::{normalize, normalize_at, RawPayload};
pub use summary::{OutboundMessage, Summary};
