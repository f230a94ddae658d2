//! Test utilities and fake implementations of the bridge traits
//!
//! These fakes let the orchestrators run end to end without a chain, the Iris
//! API or the guardian network. They cover the adversarial cases too: rejected
//! signatures, missing receipts, reverts, rate limiting and pending
//! attestations that never complete.
//!
//! The free functions build the wire formats the flow consumes (VAAs, relay
//! payloads and receipt logs) so tests can assert on exact bytes.

use alloy_primitives::{Address, Bytes, Log, TxHash, B256, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{SolEvent, SolValue};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::contracts::message_transmitter::MessageTransmitter::MessageSent;
use crate::contracts::wormhole_core::WormholeCore::LogMessagePublished;
use crate::traits::{
    AttestationProvider, ChainClient, Clock, MinedReceipt, NavigationGuard, SignedVaaProvider,
};
use crate::{AttestationResponse, BridgeError, Result, WormholeChain};

// ============================================================================
// Fake Chain Client
// ============================================================================

/// A fake chain client with scripted sends, receipts and `eth_call` results.
///
/// This allows testing scenarios like:
/// - No wallet connected
/// - The wallet rejecting a signature
/// - A transaction that never gets a receipt, or reverts
/// - Contract reads answered per function selector
#[derive(Clone, Debug, Default)]
pub struct FakeChainClient {
    state: Arc<Mutex<ChainState>>,
}

#[derive(Debug, Default)]
struct ChainState {
    signer: Option<Address>,
    sends: VecDeque<std::result::Result<TxHash, String>>,
    sent: Vec<TransactionRequest>,
    receipts: HashMap<TxHash, Option<MinedReceipt>>,
    call_queues: HashMap<[u8; 4], VecDeque<Bytes>>,
    call_responses: HashMap<[u8; 4], Bytes>,
    calls: Vec<TransactionRequest>,
    generated: u8,
}

impl FakeChainClient {
    pub fn new(signer: Option<Address>) -> Self {
        let client = Self::default();
        client.state.lock().unwrap().signer = signer;
        client
    }

    /// The next send returns `tx_hash`, and waiting on it yields `receipt`.
    pub fn queue_transaction(&self, tx_hash: TxHash, receipt: Option<MinedReceipt>) {
        let mut state = self.state.lock().unwrap();
        state.sends.push_back(Ok(tx_hash));
        state.receipts.insert(tx_hash, receipt);
    }

    /// The next send fails as if the wallet rejected it.
    pub fn fail_next_send(&self, reason: &str) {
        self.state
            .lock()
            .unwrap()
            .sends
            .push_back(Err(reason.to_string()));
    }

    /// Every call to the function with `selector` returns `value`.
    pub fn set_call_response<T: SolValue>(&self, selector: [u8; 4], value: T) {
        self.state
            .lock()
            .unwrap()
            .call_responses
            .insert(selector, value.abi_encode().into());
    }

    /// Calls to `selector` return these values in order before falling back
    /// to [`FakeChainClient::set_call_response`].
    pub fn queue_call_responses<T, I>(&self, selector: [u8; 4], values: I)
    where
        T: SolValue,
        I: IntoIterator<Item = T>,
    {
        let mut state = self.state.lock().unwrap();
        let queue = state.call_queues.entry(selector).or_default();
        queue.extend(values.into_iter().map(|value| Bytes::from(value.abi_encode())));
    }

    /// Transactions handed to the wallet, in order.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Read-only calls made, in order.
    pub fn calls(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().calls.clone()
    }
}

fn selector_of(tx: &TransactionRequest) -> Option<[u8; 4]> {
    let input = tx.input.input()?;
    input.get(..4)?.try_into().ok()
}

#[async_trait]
impl ChainClient for FakeChainClient {
    fn signer_address(&self) -> Option<Address> {
        self.state.lock().unwrap().signer
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(tx);

        match state.sends.pop_front() {
            Some(Ok(tx_hash)) => Ok(tx_hash),
            Some(Err(reason)) => Err(BridgeError::Provider(reason)),
            None => {
                state.generated += 1;
                Ok(TxHash::with_last_byte(state.generated))
            }
        }
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Option<MinedReceipt>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .receipts
            .get(&tx_hash)
            .cloned()
            .unwrap_or(None))
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        let mut state = self.state.lock().unwrap();
        let selector = selector_of(&tx);
        state.calls.push(tx);

        let Some(selector) = selector else {
            return Err(BridgeError::ContractCall("call without selector".to_string()));
        };
        if let Some(output) = state
            .call_queues
            .get_mut(&selector)
            .and_then(VecDeque::pop_front)
        {
            return Ok(output);
        }

        state.call_responses.get(&selector).cloned().ok_or_else(|| {
            BridgeError::ContractCall(format!(
                "no response for selector {}",
                alloy_primitives::hex::encode_prefixed(selector)
            ))
        })
    }
}

// ============================================================================
// Fake Attestation Provider
// ============================================================================

/// A fake attestation provider that simulates various API behaviors.
///
/// This allows testing scenarios like:
/// - Immediate success
/// - Pending → PendingConfirmations → Complete progression
/// - Rate limiting (429)
/// - Not found (404)
/// - Attestations that never complete
///
/// Unknown hashes and exhausted sequences answer `pending`.
#[derive(Clone, Debug, Default)]
pub struct FakeAttestationProvider {
    responses: Arc<Mutex<HashMap<B256, VecDeque<Result<AttestationResponse>>>>>,
    calls: Arc<Mutex<HashMap<B256, usize>>>,
}

impl FakeAttestationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a sequence of responses for a message hash.
    ///
    /// Each call to get_attestation returns the next response in the sequence.
    pub fn add_response_sequence(
        &self,
        message_hash: B256,
        responses: Vec<Result<AttestationResponse>>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert(message_hash, responses.into());
    }

    /// Configure an immediate complete response
    pub fn add_complete_response(&self, message_hash: B256, attestation: impl Into<Bytes>) {
        self.add_response_sequence(
            message_hash,
            vec![Ok(AttestationResponse::complete(attestation))],
        );
    }

    /// Configure a pending response that never completes (for timeout testing)
    pub fn add_always_pending(&self, message_hash: B256) {
        self.add_response_sequence(message_hash, Vec::new());
    }

    /// Number of requests made for a message hash
    pub fn get_call_count(&self, message_hash: B256) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&message_hash)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl AttestationProvider for FakeAttestationProvider {
    async fn get_attestation(&self, message_hash: B256) -> Result<AttestationResponse> {
        *self.calls.lock().unwrap().entry(message_hash).or_default() += 1;

        self.responses
            .lock()
            .unwrap()
            .get_mut(&message_hash)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(AttestationResponse::pending()))
    }
}

// ============================================================================
// Fake Signed VAA Provider
// ============================================================================

/// A fake guardian API keyed by sequence. Exhausted sequences answer "not yet
/// signed".
#[derive(Clone, Debug, Default)]
pub struct FakeVaaProvider {
    responses: Arc<Mutex<HashMap<u64, VecDeque<Result<Option<Bytes>>>>>>,
    requests: Arc<Mutex<Vec<(WormholeChain, B256, u64)>>>,
}

impl FakeVaaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response_sequence(&self, sequence: u64, responses: Vec<Result<Option<Bytes>>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(sequence, responses.into());
    }

    /// The VAA for `sequence` is available on the first request.
    pub fn add_signed_vaa(&self, sequence: u64, vaa: impl Into<Bytes>) {
        self.add_response_sequence(sequence, vec![Ok(Some(vaa.into()))]);
    }

    pub fn get_call_count(&self, sequence: u64) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, requested)| *requested == sequence)
            .count()
    }

    /// Every `(emitter_chain, emitter_address, sequence)` requested, in order.
    pub fn requests(&self) -> Vec<(WormholeChain, B256, u64)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignedVaaProvider for FakeVaaProvider {
    async fn get_signed_vaa(
        &self,
        emitter_chain: WormholeChain,
        emitter_address: B256,
        sequence: u64,
    ) -> Result<Option<Bytes>> {
        self.requests
            .lock()
            .unwrap()
            .push((emitter_chain, emitter_address, sequence));

        self.responses
            .lock()
            .unwrap()
            .get_mut(&sequence)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(None))
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// This enables testing timeout behavior without actually waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

// ============================================================================
// Recording Navigation Guard
// ============================================================================

/// Counts subscribe and unsubscribe calls from a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingNavigationGuard {
    pub subscribes: usize,
    pub unsubscribes: usize,
    pub subscribed: bool,
}

impl NavigationGuard for RecordingNavigationGuard {
    fn subscribe(&mut self) {
        self.subscribes += 1;
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.unsubscribes += 1;
        self.subscribed = false;
    }
}

// ============================================================================
// Wire format builders
// ============================================================================

/// A version 1 VAA with one zeroed guardian signature and emitter `0x11..11`.
pub fn build_vaa(emitter_chain: u16, sequence: u64, payload: &[u8]) -> Vec<u8> {
    let mut vaa = vec![1u8];
    vaa.extend_from_slice(&0u32.to_be_bytes());
    vaa.push(1);
    vaa.push(0);
    vaa.extend_from_slice(&[0u8; 65]);

    vaa.extend_from_slice(&1_700_000_000u32.to_be_bytes());
    vaa.extend_from_slice(&7u32.to_be_bytes());
    vaa.extend_from_slice(&emitter_chain.to_be_bytes());
    vaa.extend_from_slice(&[0x11; 32]);
    vaa.extend_from_slice(&sequence.to_be_bytes());
    vaa.push(1);
    vaa.extend_from_slice(payload);
    vaa
}

/// A relay transfer payload from domain 0 with nonce 9 and relayer fee 5.
pub fn encode_relay_payload(
    token: Address,
    amount: U256,
    target_domain: u32,
    to_native_token_amount: U256,
) -> Vec<u8> {
    let mut payload = vec![1u8];
    payload.extend_from_slice(token.into_word().as_slice());
    payload.extend_from_slice(&amount.to_be_bytes::<32>());
    payload.extend_from_slice(&0u32.to_be_bytes());
    payload.extend_from_slice(&target_domain.to_be_bytes());
    payload.extend_from_slice(&9u64.to_be_bytes());
    payload.extend_from_slice(&[0x22; 32]);
    payload.extend_from_slice(&[0x33; 32]);
    payload.extend_from_slice(&97u16.to_be_bytes());
    payload.push(1);
    payload.extend_from_slice(&U256::from(5u64).to_be_bytes::<32>());
    payload.extend_from_slice(&to_native_token_amount.to_be_bytes::<32>());
    payload.extend_from_slice(&[0x44; 32]);
    payload
}

/// A `MessageSent(bytes)` log emitted by `emitter`.
pub fn message_sent_log(emitter: Address, message: &[u8]) -> Log {
    let event = MessageSent {
        message: Bytes::copy_from_slice(message),
    };
    Log {
        address: emitter,
        data: event.encode_log_data(),
    }
}

/// A `LogMessagePublished` log emitted by the Wormhole core bridge.
pub fn log_message_published_log(core_bridge: Address, sender: Address, sequence: u64) -> Log {
    let event = LogMessagePublished {
        sender,
        sequence,
        nonce: 0,
        payload: Bytes::new(),
        consistencyLevel: 1,
    };
    Log {
        address: core_bridge,
        data: event.encode_log_data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttestationStatus;

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
        assert_eq!(clock.now() - start, Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_fake_attestation_provider_sequence_then_pending() {
        let provider = FakeAttestationProvider::new();
        let message_hash = B256::repeat_byte(1);
        provider.add_response_sequence(
            message_hash,
            vec![
                Err(BridgeError::AttestationNotFound),
                Ok(AttestationResponse::complete(vec![0xde, 0xad])),
            ],
        );

        assert!(provider.get_attestation(message_hash).await.is_err());
        let second = provider.get_attestation(message_hash).await.unwrap();
        assert_eq!(second.status, AttestationStatus::Complete);
        let third = provider.get_attestation(message_hash).await.unwrap();
        assert_eq!(third.status, AttestationStatus::Pending);
        assert_eq!(provider.get_call_count(message_hash), 3);
    }

    #[tokio::test]
    async fn test_fake_chain_client_scripted_sends() {
        let client = FakeChainClient::new(Some(Address::repeat_byte(1)));
        client.fail_next_send("user rejected transaction");

        let rejected = client.send_transaction(TransactionRequest::default()).await;
        assert!(matches!(rejected, Err(BridgeError::Provider(_))));

        let tx_hash = client
            .send_transaction(TransactionRequest::default())
            .await
            .unwrap();
        assert_eq!(client.wait_for_receipt(tx_hash).await.unwrap(), None);
        assert_eq!(client.sent_transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_fake_chain_client_answers_by_selector() {
        let client = FakeChainClient::new(None);
        let selector = [0xde, 0xad, 0xbe, 0xef];
        client.queue_call_responses(selector, [true]);
        client.set_call_response(selector, false);
        let tx = crate::contracts::transaction_to(Address::ZERO, selector.to_vec());

        let first = client.call(tx.clone()).await.unwrap();
        let second = client.call(tx.clone()).await.unwrap();
        assert!(bool::abi_decode(&first).unwrap());
        assert!(!bool::abi_decode(&second).unwrap());

        let unknown = crate::contracts::transaction_to(Address::ZERO, vec![0, 0, 0, 0]);
        assert!(matches!(
            client.call(unknown).await,
            Err(BridgeError::ContractCall(_))
        ));
    }

    #[test]
    fn test_wire_builders_have_expected_sizes() {
        assert_eq!(build_vaa(2, 1, &[0xaa; 3]).len(), 6 + 66 + 51 + 3);
        assert_eq!(
            encode_relay_payload(Address::ZERO, U256::ZERO, 1, U256::ZERO).len(),
            244
        );
    }
}
