//! Ledger data model

mod account_block;
mod momentum;
mod plasma;

pub use account_block::{
    AccountBlock, AccountBlockTemplate, BlockType, ConfirmationDetail, BLOCK_VERSION,
    DEFAULT_CHAIN_IDENTIFIER,
};
pub use momentum::Momentum;
pub use plasma::{GetRequiredPowParam, GetRequiredPowResponse};
