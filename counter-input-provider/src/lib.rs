//! ### `counter-input-provider`: a minimal DStream input provider
//!
//! Emits a sequential counter, once per configured interval, wrapped in an [`Envelope`]:
//!
//! ```json
//! { "data": { "value": 1, "timestamp": "2024-01-02T03:04:05.000006+00:00" },
//!   "metadata": { "interval_ms": 1000, "seq": 1, "source": "counter-input-provider" } }
//! ```
//!
//! The stream ends once `maxCount` envelopes have been produced, or when the host cancels.
//!
//! [`Envelope`]: dstream::Envelope

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod config;
mod provider;
mod stream;

pub use config::*;
pub use provider::*;
pub use stream::*;
