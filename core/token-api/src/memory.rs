use {
    crate::{Address, Amount, Error, Result, TokenContract, TransferReceipt, TxHash},
    std::{
        collections::{HashMap, HashSet},
        sync::Mutex,
    },
};

/// In-process token ledger standing in for a dev chain. Only unlocked
/// accounts can send, every transfer is mined into its own block.
#[derive(Default)]
pub struct MemoryToken {
    db: Mutex<NotAChain>,
}

#[derive(Default)]
struct NotAChain {
    balances: HashMap<Address, Amount>,
    unlocked: HashSet<Address>,
    rejected: HashSet<Address>,
    transfers: Vec<(Address, Address, Amount)>,
}

impl MemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, account: Address, amount: Amount) -> Self {
        self.lock().balances.insert(account, amount);
        self
    }

    pub fn unlock(self, account: Address) -> Self {
        self.lock().unlocked.insert(account);
        self
    }

    /// Transfers to `account` revert from now on.
    pub fn reject(&self, account: Address) {
        self.lock().rejected.insert(account);
    }

    pub fn balance(&self, account: Address) -> Amount {
        self.lock().balances.get(&account).copied().unwrap_or_default()
    }

    /// Every executed transfer as `(from, to, amount)`, in execution order.
    pub fn transfers(&self) -> Vec<(Address, Address, Amount)> {
        self.lock().transfers.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotAChain> {
        self.db.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenContract for MemoryToken {
    async fn balance_of(&self, account: Address) -> Result<Amount> {
        Ok(self.balance(account))
    }

    async fn transfer(&self, to: Address, amount: Amount, from: Address) -> Result<TransferReceipt> {
        let mut db = self.lock();

        if !db.unlocked.contains(&from) {
            return Err(Error::Unauthorized(from));
        }

        if db.rejected.contains(&to) {
            return Err(Error::Reverted(format!("recipient {to} rejected the transfer")));
        }

        let balance = db.balances.get(&from).copied().unwrap_or_default();
        let remaining = balance
            .checked_sub(amount)
            .ok_or(Error::InsufficientBalance {
                account: from,
                balance,
                requested: amount,
            })?;
        let received = match to == from {
            true => remaining,
            false => db.balances.get(&to).copied().unwrap_or_default(),
        };
        let received = received
            .checked_add(amount)
            .ok_or_else(|| Error::Reverted(format!("balance of {to} would overflow")))?;
        db.balances.insert(from, remaining);
        db.balances.insert(to, received);
        db.transfers.push((from, to, amount));

        let block = db.transfers.len() as u64;
        Ok(TransferReceipt {
            tx_hash: TxHash::left_padding_from(&block.to_be_bytes()),
            block_number: Some(block),
            gas_used: 0,
        })
    }
}
