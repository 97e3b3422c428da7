//! Mandala art generator: collects art parameters from a web form, turns them
//! into an image-generation prompt and hands the resulting image back.

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod choices;
pub mod cli;
pub mod config;
pub mod constants;
pub mod download;
pub mod error;
pub mod form;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod web;
