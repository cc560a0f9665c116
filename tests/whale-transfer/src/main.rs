use {
    anyhow::Context as _,
    std::io::Write,
    token_api::{address, Address, Erc20},
};

/// Curve cDAI/cUSDC pool token.
const CDAI_CUSDC: Address = address!("0x845838df265dcd2c412a1dc9e959c7d08537f8a2");
/// Largest cDAI/cUSDC holder on the forked chain.
const CDAI_CUSDC_WHALE: Address = address!("0x3d8d742ee7fbc497ae671528a19a1489ba204482");

config::env_config! {
    struct TransferConfig {
        chain_node: String = "http://127.0.0.1:8545".into(),
        network: String = "development".into(),
        token_label: String = "cDAI/cUSDC".into(),
        token_address: Address = CDAI_CUSDC,
        whale_account: Address = CDAI_CUSDC_WHALE,
        /// Falls back to the accounts of the node when empty.
        test_wallets: config::List<Address> = config::List::default(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    run(TransferConfig::from_env()).await
}

async fn run(config: TransferConfig) -> anyhow::Result<()> {
    let token = Erc20::connect(&config.chain_node, config.token_address)
        .await
        .with_context(|| format!("connecting to {}", config.chain_node))?;

    let chain_id = token.chain_id().await.context("fetching chain id")?;
    log::debug!(
        "migrating {} (chain {chain_id}), token {}",
        config.network,
        token.address()
    );

    let accounts = resolve_accounts(&token, config.test_wallets.0)
        .await
        .context("fetching node accounts")?;

    distributor::distribute(&token, &config.token_label, config.whale_account, &accounts)
        .await
        .with_context(|| format!("distributing {} on {}", config.token_label, config.network))?;

    Ok(())
}

/// Configured wallets win, an empty list means the node's own accounts.
async fn resolve_accounts(token: &Erc20, wallets: Vec<Address>) -> token_api::Result<Vec<Address>> {
    match wallets.is_empty() {
        true => token.accounts().await,
        false => Ok(wallets),
    }
}

#[cfg(test)]
mod test {
    use {
        super::*,
        alloy::{
            providers::{Provider, ProviderBuilder},
            transports::mock::Asserter,
        },
    };

    fn mocked(asserter: Asserter) -> Erc20 {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter)
            .erased();
        Erc20::with_provider(provider, CDAI_CUSDC)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_wallets_use_node_accounts() {
        let node_accounts = vec![Address::with_last_byte(1), Address::with_last_byte(2)];
        let asserter = Asserter::new();
        asserter.push_success(&node_accounts);

        let accounts = resolve_accounts(&mocked(asserter), Vec::new()).await.unwrap();
        assert_eq!(accounts, node_accounts);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn configured_wallets_skip_node() {
        let wallets = vec![Address::with_last_byte(9)];
        // no queued response, asking the node would fail
        let token = mocked(Asserter::new());

        let accounts = resolve_accounts(&token, wallets.clone()).await.unwrap();
        assert_eq!(accounts, wallets);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn node_failure_is_reported() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("method not found");

        assert!(resolve_accounts(&mocked(asserter), Vec::new()).await.is_err());
    }

    #[test]
    fn defaults_target_cdai_cusdc_whale() {
        let config = TransferConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.chain_node, "http://127.0.0.1:8545");
        assert_eq!(config.network, "development");
        assert_eq!(config.token_label, "cDAI/cUSDC");
        assert_eq!(config.token_address, CDAI_CUSDC);
        assert_eq!(config.whale_account, CDAI_CUSDC_WHALE);
        assert!(config.test_wallets.0.is_empty());
    }

    #[test]
    fn parses_wallet_list() {
        let config = TransferConfig::from_lookup(|key| match key {
            "TEST_WALLETS" => Some(
                "0x0000000000000000000000000000000000000001, \
                 0000000000000000000000000000000000000002"
                    .into(),
            ),
            "NETWORK" => Some("mainnet-fork".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.network, "mainnet-fork");
        assert_eq!(
            config.test_wallets.0,
            vec![Address::with_last_byte(1), Address::with_last_byte(2)]
        );
    }

    #[test]
    fn rejects_malformed_whale() {
        let err = TransferConfig::from_lookup(|key| {
            (key == "WHALE_ACCOUNT").then(|| "0xnot-an-address".to_string())
        })
        .unwrap_err();
        assert!(err.missing.is_empty());
        assert_eq!(err.invalid[0].0, "WHALE_ACCOUNT");
    }
}
