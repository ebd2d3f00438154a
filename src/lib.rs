//! EnvMon firmware library.
//!
//! Exposes the hardware-agnostic control-loop modules for integration
//! testing and external inspection. All ESP-IDF-specific code lives in
//! `adapters::hardware` and is guarded by the `espidf` cargo feature, so
//! the domain core builds and tests on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod queue;
pub mod signal;
pub mod tasks;

pub mod adapters;
