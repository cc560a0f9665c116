use {
    crate::{Address, Amount, Error, Result, TokenContract, TransferReceipt},
    alloy::{
        network::ReceiptResponse,
        providers::{DynProvider, Provider, ProviderBuilder},
    },
};

alloy::sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Erc20 token reached through a json-rpc node. Transfers are submitted with
/// `eth_sendTransaction`, so the node signs them and the sender has to be one
/// of its unlocked (or impersonated) accounts.
#[derive(Clone)]
pub struct Erc20 {
    provider: DynProvider,
    contract: IERC20::IERC20Instance<DynProvider>,
}

impl Erc20 {
    pub async fn connect(node: &str, token: Address) -> Result<Self> {
        let provider = ProviderBuilder::new().connect(node).await?.erased();
        Ok(Self::with_provider(provider, token))
    }

    pub fn with_provider(provider: DynProvider, token: Address) -> Self {
        let contract = IERC20::new(token, provider.clone());
        Self { provider, contract }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Accounts the node manages, the same list a test deployment is handed.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    pub async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }
}

impl TokenContract for Erc20 {
    async fn balance_of(&self, account: Address) -> Result<Amount> {
        Ok(self.contract.balanceOf(account).call().await?)
    }

    async fn transfer(&self, to: Address, amount: Amount, from: Address) -> Result<TransferReceipt> {
        let pending = self.contract.transfer(to, amount).from(from).send().await?;
        log::debug!("transfer to {to} submitted in {}", pending.tx_hash());

        let receipt = pending.get_receipt().await?;
        transfer_receipt(&receipt)
    }
}

fn transfer_receipt(receipt: &impl ReceiptResponse) -> Result<TransferReceipt> {
    if !receipt.status() {
        return Err(Error::Reverted(format!(
            "transaction {} failed",
            receipt.transaction_hash()
        )));
    }

    Ok(TransferReceipt {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}
