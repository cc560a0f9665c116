use token_api::{Address, Amount, TokenContract, TransferReceipt};

/// Outcome of a completed [`distribute`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Whale balance before any transfer.
    pub total: Amount,
    pub transfers: Vec<Transfer>,
}

impl Distribution {
    pub fn distributed(&self) -> Amount {
        self.transfers
            .iter()
            .fold(Amount::ZERO, |sum, t| sum + t.amount)
    }

    /// Part of the total that stayed with the whale due to truncation.
    pub fn remainder(&self) -> Amount {
        self.total - self.distributed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub account: Address,
    pub amount: Amount,
    pub receipt: TransferReceipt,
    /// Balance of `account` read right after the transfer.
    pub balance: Amount,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read balance of {account}")]
    Balance {
        account: Address,
        source: token_api::Error,
    },
    #[error("failed to transfer {amount} to {account}")]
    Transfer {
        account: Address,
        amount: Amount,
        source: token_api::Error,
    },
}

/// Amount each of `count` accounts receives out of `total`, the remainder of
/// the integer division is not handed out.
pub fn share_of(total: Amount, count: usize) -> Option<Amount> {
    total.checked_div(Amount::from(count))
}

/// Splits the balance `whale` holds evenly across `accounts`, one transfer at
/// a time in the given order. The first failing call aborts the run, transfers
/// that already went through stay in place.
pub async fn distribute(
    token: &impl TokenContract,
    label: &str,
    whale: Address,
    accounts: &[Address],
) -> Result<Distribution, Error> {
    let total = token
        .balance_of(whale)
        .await
        .map_err(|source| Error::Balance { account: whale, source })?;
    log::info!("{label} whale balance: {total}");

    let mut transfers = Vec::with_capacity(accounts.len());
    for &account in accounts {
        let amount = total / Amount::from(accounts.len());
        log::debug!("sending {amount} of {total} to {account}");

        let receipt = token
            .transfer(account, amount, whale)
            .await
            .map_err(|source| Error::Transfer { account, amount, source })?;
        log::debug!("transfer to {account} included in {}", receipt.tx_hash);

        let balance = token
            .balance_of(account)
            .await
            .map_err(|source| Error::Balance { account, source })?;
        log::info!("{label} {account} balance: {balance}");

        transfers.push(Transfer {
            account,
            amount,
            receipt,
            balance,
        });
    }

    Ok(Distribution { total, transfers })
}
