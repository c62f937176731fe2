//! Static group upload: lookup, membership carry-over and retried writes.

mod kind;
mod membership;
mod model;
mod ports;
mod retry;
mod status;
mod summary;
mod template;
mod uploader;
mod writer;

pub use kind::*;
pub use membership::*;
pub use model::*;
pub use ports::*;
pub use retry::*;
pub use status::*;
pub use summary::*;
pub use template::*;
pub use uploader::*;
pub use writer::*;
