//! ### `dstream-stdio`: Standard I/O host
//!
//! Runs an [`InputProvider`](dstream_types::InputProvider) as a unix pipe citizen:
//!
//! + the JSON configuration is read from stdin (or a file) before the run starts
//! + every envelope is written to stdout as one line of JSON
//! + diagnostics go to stderr
//!
//! ```sh
//! echo '{ "interval": 100, "maxCount": 3 }' | counter
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod config;
mod host;
mod writer;

pub use config::*;
pub use host::*;
pub use writer::*;
