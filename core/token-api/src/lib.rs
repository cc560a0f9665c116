pub use {
    alloy::primitives::{address, Address, TxHash},
    erc20::Erc20,
};

#[cfg(feature = "memory")]
pub use memory::MemoryToken;

mod erc20;
#[cfg(feature = "memory")]
mod memory;

/// Token amounts exceed 64 bits in general, erc20 uses `uint256`.
pub type Amount = alloy::primitives::U256;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read and transfer capability of a fungible token contract.
#[allow(async_fn_in_trait)]
pub trait TokenContract {
    async fn balance_of(&self, account: Address) -> Result<Amount>;

    /// Moves `amount` from `from` to `to` and waits until the transfer is
    /// included. The caller must have authority over `from`.
    async fn transfer(&self, to: Address, amount: Amount, from: Address)
        -> Result<TransferReceipt>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),
    #[error(transparent)]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("transfer reverted: {0}")]
    Reverted(String),
    #[error("account {account} holds {balance}, cannot send {requested}")]
    InsufficientBalance {
        account: Address,
        balance: Amount,
        requested: Amount,
    },
    #[error("no authority to send from {0}")]
    Unauthorized(Address),
}
