//! Client for the AMO v5 add-ons API.
//!
//! Every call mints its own short-lived JWT and goes through one request
//! primitive in [`client`], so authentication and error shaping live in a
//! single place.

pub mod api;
pub mod attachment;
pub mod client;
pub mod error;
pub mod token;

pub use api::AddonsApi;
pub use attachment::Attachment;
pub use client::AmoClient;
pub use error::AmoError;
pub use token::{Credentials, Hs256Signer, TokenSigner};
