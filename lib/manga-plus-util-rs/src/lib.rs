#[cfg(feature = "abort-join-handle")]
mod abort_join_handle;
#[cfg(feature = "abort-join-handle")]
pub use self::abort_join_handle::*;

#[cfg(feature = "timed-lru-map")]
mod timed_lru_map;
#[cfg(feature = "timed-lru-map")]
pub use self::timed_lru_map::*;
