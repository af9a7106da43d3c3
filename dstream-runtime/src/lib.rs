//! ### `dstream-runtime`: Async runtime abstraction
//!
//! A small set of functions aligning the type signatures between `async-std` and `tokio`,
//! so that providers can be written generic to both runtimes.

#[cfg(all(feature = "runtime-async-std", feature = "runtime-tokio"))]
compile_error!("'runtime-async-std' and 'runtime-tokio' cannot be enabled at the same time");

mod timeout;

pub use timeout::*;
