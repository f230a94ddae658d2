//! # usdc-bridge
//!
//! Moves USDC between Ethereum Goerli and Avalanche Fuji through Circle's
//! Cross-Chain Transfer Protocol (CCTP), optionally through the Wormhole
//! Circle-integration relayer, which also delivers destination gas.
//!
//! A transfer has two halves:
//!
//! 1. [`TransferOrchestrator`] approves USDC, burns it on the source chain,
//!    waits for Circle's attestation and, when relaying, for the signed
//!    Wormhole VAA. The result is a complete [`TransferReceipt`].
//! 2. [`RedeemOrchestrator`] mints on the destination chain with that receipt,
//!    or watches for the relayer to do it.
//!
//! Both publish [`FlowUpdate`]s that a [`BridgeSession`] folds into view state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use usdc_bridge::providers::{
//!     AlloyChainClient, IrisAttestationProvider, TokioClock, WormholeRpcProvider,
//! };
//! use usdc_bridge::testing::RecordingNavigationGuard;
//! use usdc_bridge::{
//!     ApprovalAmount, BridgeSession, EnvConfig, RedeemOrchestrator, TransferOrchestrator,
//! };
//!
//! # async fn example() -> usdc_bridge::Result<()> {
//! let env = EnvConfig::load();
//! let signer = env.signer()?.address();
//!
//! let transfers = TransferOrchestrator::builder()
//!     .source(AlloyChainClient::new(env.source_provider()?).with_signer(signer))
//!     .attestation_provider(IrisAttestationProvider::new(env.iris_api_url.clone()))
//!     .vaa_provider(WormholeRpcProvider::new(env.wormhole_rpc_hosts.clone())?)
//!     .clock(TokioClock::new())
//!     .build();
//! let redeems = RedeemOrchestrator::builder()
//!     .target(AlloyChainClient::new(env.target_provider()?).with_signer(signer))
//!     .clock(TokioClock::new())
//!     .build();
//!
//! let (updates, mut queue) = tokio::sync::mpsc::unbounded_channel();
//! let mut session = BridgeSession::new(RecordingNavigationGuard::default());
//! session.set_wallet_status(true, None);
//! session.set_amount("25")?;
//!
//! let request = session.transfer_request()?;
//! if !transfers.allowance_sufficient(&request, &updates).await? {
//!     transfers.approve(&request, ApprovalAmount::Exact, &updates).await?;
//! }
//! let receipt = transfers.transfer(&request, &updates).await?;
//! redeems.redeem(&request, &receipt, &updates).await?;
//!
//! session.drain(&mut queue);
//! assert!(session.is_redeem_complete());
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`TransferOrchestrator`], [`RedeemOrchestrator`] - the two halves of the flow
//! - [`TransferRequest`], [`TransferReceipt`], [`RedeemReceipt`] - flow data
//! - [`BridgeSession`] - view state derived from [`FlowUpdate`]s
//! - [`BridgeChain`] - the per-chain address registry
//! - [`ChainClient`], [`AttestationProvider`], [`SignedVaaProvider`], [`Clock`],
//!   [`NavigationGuard`] - I/O seams, implemented in [`providers`] and [`testing`]
//! - [`WalletContext`] - wallet adapter registries of the non-EVM families
//! - [`BridgeError`] and [`Result`] - error types

mod bridge;
mod chain;
mod error;
mod protocol;
mod session;
mod traits;
mod wallets;

pub mod contracts;
pub mod providers;
pub mod testing;

pub use bridge::{
    find_circle_message_in_logs, parse_sequence_from_logs, poll_attestation, poll_signed_vaa,
    AllowanceState, ApprovalAmount, CancellationFlag, ConfirmationStatus, EnvConfig, FlowConfig,
    FlowObserver, FlowUpdate, NoopObserver, Notice, PollingConfig, RedeemEvent, RedeemMachine,
    RedeemOrchestrator, RedeemReceipt, RedeemState, Severity, TransferEvent, TransferMachine,
    TransferOrchestrator, TransferReceipt, TransferRequest, TransferState, ATTESTATION_PATH,
    IRIS_API, IRIS_API_SANDBOX, SIGNED_VAA_PATH, WORMHOLE_TESTNET_RPC_HOSTS,
};
pub use chain::{chain_for_domain, BridgeChain, SUPPORTED_CHAINS};
pub use error::{BridgeError, Result};
pub use protocol::{
    AttestationResponse, AttestationStatus, DomainId, GuardianSignature, InvalidDomainId,
    RelayTransferPayload, UsdcAmount, Vaa, WormholeChain, USDC_DECIMALS,
};
pub use session::{chain_from_path_param, BridgeSession, Step};
pub use traits::{
    AttestationProvider, ChainClient, Clock, MinedReceipt, NavigationGuard, SignedVaaProvider,
};
pub use wallets::{
    AdapterRegistry, ChainFamily, Endpoint, NetworkInfo, WalletAdapter, WalletContext,
    SOLANA_DEVNET_HOST,
};

// Public module for advanced users who need custom instrumentation
pub mod spans;
