//! # DStream
//!
//! Building blocks for DStream input providers: small programs that read a JSON configuration,
//! produce a stream of [`Envelope`]s, and leave transport to the host.
//!
//! ## Architecture
//!
//! `dstream` is the facade crate re-exporting implementation from a number of sub-crates:
//!
//! + `dstream-types`: the [`InputProvider`] contract, envelopes, cancellation and diagnostics
//! + `dstream-runtime`: `tokio` / `async-std` abstraction (feature `runtime`)
//! + `dstream-stdio`: a host speaking JSON over stdin / stdout (feature `stdio`)
//!
//! ## Writing a provider
//!
//! Implement [`InputProvider`]: pick a `Config` (deserialized from the host's JSON payload), a `Data`
//! type, and return a `Stream` from `read`. Log through the [`ProviderContext`], never to stdout,
//! and end the stream when the [`CancelSignal`] fires.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use dstream_types::*;

#[cfg(feature = "dstream-stdio")]
#[cfg_attr(docsrs, doc(cfg(feature = "stdio")))]
pub use dstream_stdio::*;

#[cfg(feature = "dstream-runtime")]
#[cfg_attr(docsrs, doc(cfg(feature = "runtime")))]
pub use dstream_runtime as runtime;
