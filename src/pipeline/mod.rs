//! Pipeline Module
//!
//! Request-pipeline stages that sit between a dispatcher and its handlers:
//! cache-aside reads, group bookkeeping and post-write invalidation.

mod cancel;
mod caching;
pub mod group;
mod invalidation;
mod single_flight;


pub use cancel::{run_cancellable, CancelToken};
pub use caching::CachingStage;
pub use group::GroupIndex;
pub use invalidation::InvalidationStage;
pub use single_flight::{FlightGuard, SingleFlight};
