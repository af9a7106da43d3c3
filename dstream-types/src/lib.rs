//! # DStream Types
//!
//! This crate defines the traits and types shared between a DStream host and its providers,
//! but does not provide any host implementation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_debug_implementations)]

mod cancel;
mod context;
mod envelope;
mod error;
mod provider;
mod sink;

pub use cancel::*;
pub use context::*;
pub use envelope::*;
pub use error::*;
pub use provider::*;
pub use sink::*;
