//! Bridge testnet USDC from Goerli to Fuji
//!
//! Reads `SOURCE_RPC_URL`, `TARGET_RPC_URL` and `PRIVATE_KEY` from the
//! environment (or `.env`). Set `RELAY=1` to let the Wormhole relayer mint on
//! the destination chain instead of redeeming manually.
//!
//! Run with: `RUST_LOG=usdc_bridge=info cargo run --example bridge_usdc -- 10`

use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use usdc_bridge::providers::{
    AlloyChainClient, IrisAttestationProvider, TokioClock, WormholeRpcProvider,
};
use usdc_bridge::testing::RecordingNavigationGuard;
use usdc_bridge::{
    BridgeSession, CancellationFlag, EnvConfig, RedeemOrchestrator, Result, TransferOrchestrator,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = EnvConfig::load();
    let signer = env.signer()?.address();
    let amount = std::env::args().nth(1).unwrap_or_else(|| "1".to_string());

    let transfers = TransferOrchestrator::builder()
        .source(AlloyChainClient::new(env.source_provider()?).with_signer(signer))
        .attestation_provider(IrisAttestationProvider::new(env.iris_api_url.clone()))
        .vaa_provider(WormholeRpcProvider::new(env.wormhole_rpc_hosts.clone())?)
        .clock(TokioClock::new())
        .build();
    let redeems = RedeemOrchestrator::builder()
        .target(AlloyChainClient::new(env.target_provider()?).with_signer(signer))
        .clock(TokioClock::new())
        .build();

    let (updates, mut queue) = mpsc::unbounded_channel();
    let mut session = BridgeSession::new(RecordingNavigationGuard::default());
    session.set_wallet_status(true, None);
    session.set_amount(&amount)?;
    if std::env::var("RELAY").is_ok_and(|v| v == "1") {
        session.toggle_relay()?;
    }

    println!(
        "Bridging {amount} USDC from {} to {} (relay: {})",
        session.source_chain(),
        session.target_chain(),
        session.relay()
    );

    let request = session.transfer_request()?;
    let balance = transfers.source_balance(&request, &updates).await?;
    println!("Source balance: {balance} USDC");
    if !transfers.allowance_sufficient(&request, &updates).await? {
        println!("{}", session.approve_label());
        transfers
            .approve(&request, session.approval_amount(), &updates)
            .await?;
    }

    let receipt = transfers.transfer(&request, &updates).await?;
    session.drain(&mut queue);
    println!("Burned in {}", receipt.source_tx_hash);

    if session.should_watch_relayer() {
        let redeemed = redeems
            .watch_relayer_redemption(&request, &receipt, &CancellationFlag::new(), &updates)
            .await?;
        println!("Relayer redeemed: {redeemed}");
    } else {
        let redeemed = redeems.redeem(&request, &receipt, &updates).await?;
        println!("Redeemed in {}", redeemed.tx_hash);
    }

    session.drain(&mut queue);
    for notice in session.take_notices() {
        println!("[{:?}] {}", notice.severity, notice.message);
    }

    Ok(())
}
