//! # znn-sdk
//!
//! Rust SDK for the Zenon Network of Momentum.
//!
//! ## Features
//!
//! - **ABI**: word-based argument encoding for embedded contract calls
//! - **Model**: account block templates, momentums and plasma queries
//! - **Block**: content hashing and the send pipeline
//! - **ZenonClient**: JSON-RPC client implementing [`Ledger`] and [`Plasma`]
//! - **KeyPair**: ed25519 signer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use znn_sdk::{AccountBlockTemplate, Config, KeyPair, TokenStandard, Zenon, U256};
//! use znn_sdk::abi::{Abi, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let zenon = Zenon::connect(Config::default())?;
//!     let keys = KeyPair::new_random();
//!
//!     let abi = Abi::from_json(r#"[{"type":"function","name":"Fuse","inputs":[{"name":"address","type":"address"}]}]"#)?;
//!     let data = abi.encode_function("Fuse", &[Token::Address(*keys.address())])?;
//!
//!     let template = AccountBlockTemplate::call_contract(
//!         znn_sdk::Address::PLASMA,
//!         TokenStandard::QSR,
//!         U256::from(10u64) * U256::from(100_000_000u64),
//!         data,
//!     );
//!     let published = zenon.send(template, &keys).await?;
//!     println!("published {}", published.hash);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod api;
pub mod block;
mod client;
mod config;
mod error;
pub mod model;
mod serde_util;
mod transport;
mod wallet;

// Re-export main types
pub use api::{Ledger, Plasma, Signer};
pub use client::{Zenon, ZenonClient};
pub use config::Config;
pub use error::SdkError;
pub use model::{AccountBlock, AccountBlockTemplate, BlockType, Momentum};
pub use transport::{MockTransport, RecordedCall};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use wallet::KeyPair;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use znn_primitives::{Address, Hash, HashHeight, TokenStandard, U256};
