//! Publish browser extensions to addons.mozilla.org from a GitHub Actions step.

pub mod action;
pub mod amo;
pub mod publish;
pub mod types;
pub mod utils;
