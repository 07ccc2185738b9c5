//! Call Builder.
//!
//! [`CallBuilder::build`] is pure: it checks the shape of what it is given
//! and assembles an immutable [`CallRequest`], without any I/O. Arguments
//! are taken exactly as typed by the caller; nothing is inferred or
//! converted.
//!
//! ## Envelopes
//!
//! Requests cross the transport and signer boundaries as envelopes: the
//! base64 encoding of the request's JSON form. The binary network codec
//! lives behind the transport.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::identity::{is_address, is_contract_id};
use crate::types::{AccountState, ScArg};

/// Longest entry-point name a contract can declare
pub const MAX_METHOD_LEN: usize = 32;

// ============================================================================
// CallRequest
// ============================================================================

/// A fully assembled contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Target contract
    pub contract_id: String,
    /// Entry point name
    pub method: String,
    /// Ordered, typed arguments
    pub args: Vec<ScArg>,
    /// Account the call is built against
    pub source: AccountState,
    /// Sequence number the transaction carries
    pub sequence: i64,
    /// Network passphrase the call is bound to
    pub network_passphrase: String,
    /// Inclusion fee in stroops
    pub fee: u32,
    /// Validity window in seconds
    pub timeout_secs: u64,
}

impl CallRequest {
    /// Unsigned envelope for this request
    pub fn envelope(&self) -> Result<String> {
        encode_envelope(self)
    }

    /// Invoking identity
    pub fn source_account(&self) -> &str {
        &self.source.account_id
    }
}

/// A call after preparation, ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedCall {
    /// Unsigned envelope, including resource and footprint data
    pub envelope: String,
    /// Resource fee added by preparation, in stroops
    #[serde(default)]
    pub resource_fee: u64,
}

impl PreparedCall {
    /// Prepare `call` locally with the given resource fee.
    ///
    /// Transports that prepare out-of-process build the envelope themselves.
    pub fn from_call(call: &CallRequest, resource_fee: u64) -> Result<Self> {
        #[derive(Serialize)]
        struct Prepared<'a> {
            call: &'a CallRequest,
            resource_fee: u64,
        }

        Ok(Self {
            envelope: encode_envelope(&Prepared { call, resource_fee })?,
            resource_fee,
        })
    }
}

/// An envelope returned by the signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Signed envelope, as produced by the signer
    pub envelope: String,
}

impl SignedEnvelope {
    /// Wrap a signer's output
    pub fn new(envelope: impl Into<String>) -> Self {
        Self {
            envelope: envelope.into(),
        }
    }
}

/// Encode a value as an envelope (base64 of its JSON form).
pub fn encode_envelope<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(STANDARD.encode(json))
}

/// Decode an envelope produced by [`encode_envelope`].
pub fn decode_envelope<T: DeserializeOwned>(envelope: &str) -> Result<T> {
    let bytes = STANDARD
        .decode(envelope.trim())
        .map_err(|e| Error::Transport(format!("envelope is not base64: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

// ============================================================================
// CallBuilder
// ============================================================================

/// Assembles [`CallRequest`]s for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBuilder {
    network_passphrase: String,
    base_fee: u32,
    timeout_secs: u64,
}

impl CallBuilder {
    /// Create a builder for the given network
    pub fn new(network_passphrase: impl Into<String>, base_fee: u32, timeout_secs: u64) -> Self {
        Self {
            network_passphrase: network_passphrase.into(),
            base_fee,
            timeout_secs,
        }
    }

    /// Create a builder from client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.network_passphrase.clone(), config.base_fee, config.tx_timeout_secs)
    }

    /// Assemble a call.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - the contract id is not contract-shaped,
    ///   the method is not a valid entry-point name, an address argument is
    ///   not address-shaped, or an optional argument's payload does not
    ///   match its declared inner type
    pub fn build(
        &self,
        account: &AccountState,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
    ) -> Result<CallRequest> {
        if !is_contract_id(contract_id) {
            return Err(Error::InvalidArgument(format!(
                "{:?} is not a contract id",
                contract_id
            )));
        }
        validate_method(method)?;
        for (position, arg) in args.iter().enumerate() {
            validate_arg(method, position, arg)?;
        }

        Ok(CallRequest {
            contract_id: contract_id.to_string(),
            method: method.to_string(),
            args,
            source: account.clone(),
            sequence: account.next_sequence(),
            network_passphrase: self.network_passphrase.clone(),
            fee: self.base_fee,
            timeout_secs: self.timeout_secs,
        })
    }
}

fn validate_method(method: &str) -> Result<()> {
    let valid = !method.is_empty()
        && method.len() <= MAX_METHOD_LEN
        && method.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "{:?} is not a valid entry point name",
            method
        )))
    }
}

fn validate_arg(method: &str, position: usize, arg: &ScArg) -> Result<()> {
    match arg {
        ScArg::Address(address) if !is_address(address) => Err(Error::InvalidArgument(format!(
            "{}: argument {} is not an address: {:?}",
            method, position, address
        ))),
        ScArg::Option {
            inner,
            value: Some(payload),
        } => {
            if payload.sc_type() != *inner {
                return Err(Error::InvalidArgument(format!(
                    "{}: argument {} declared {} but holds {}",
                    method,
                    position,
                    arg.sc_type(),
                    payload.sc_type()
                )));
            }
            validate_arg(method, position, payload)
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScType;

    const TOKEN: &str = "CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M";
    const OWNER: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    fn builder() -> CallBuilder {
        CallBuilder::new("Test SDF Network ; September 2015", 100, 30)
    }

    #[test]
    fn test_build_assembles_request() {
        let account = AccountState::new(OWNER, 41);
        let call = builder()
            .build(&account, TOKEN, "buy", vec![ScArg::address(OWNER), ScArg::i128(10)])
            .unwrap();

        assert_eq!(call.contract_id, TOKEN);
        assert_eq!(call.method, "buy");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.sequence, 42);
        assert_eq!(call.fee, 100);
        assert_eq!(call.timeout_secs, 30);
        assert_eq!(call.source_account(), OWNER);
    }

    #[test]
    fn test_build_keeps_argument_order_and_tags() {
        let account = AccountState::synthetic(OWNER);
        let args = vec![ScArg::u32(7), ScArg::bool(true), ScArg::none(ScType::String)];
        let call = builder().build(&account, TOKEN, "list_listings", args.clone()).unwrap();
        assert_eq!(call.args, args);
    }

    #[test]
    fn test_build_rejects_bad_contract_and_method() {
        let account = AccountState::synthetic(OWNER);
        assert!(matches!(
            builder().build(&account, OWNER, "summary", vec![]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(builder().build(&account, TOKEN, "", vec![]).is_err());
        assert!(builder().build(&account, TOKEN, "quote-buy", vec![]).is_err());
        assert!(builder()
            .build(&account, TOKEN, &"a".repeat(MAX_METHOD_LEN + 1), vec![])
            .is_err());
    }

    #[test]
    fn test_build_rejects_malformed_address() {
        let account = AccountState::synthetic(OWNER);
        let err = builder()
            .build(&account, TOKEN, "set_token", vec![ScArg::address("GABC")])
            .unwrap_err();
        assert!(err.to_string().contains("argument 0"));
    }

    #[test]
    fn test_build_rejects_option_payload_mismatch() {
        let account = AccountState::synthetic(OWNER);
        let bad = ScArg::optional(ScType::Address, Some(ScArg::u32(1)));
        assert!(builder().build(&account, TOKEN, "init", vec![bad]).is_err());

        let nested_bad = ScArg::some(ScArg::address("nope"));
        assert!(builder().build(&account, TOKEN, "init", vec![nested_bad]).is_err());

        let good = ScArg::optional(ScType::Address, Some(ScArg::address(TOKEN)));
        assert!(builder().build(&account, TOKEN, "init", vec![good]).is_ok());
    }

    #[test]
    fn test_envelope_decodes_to_request() {
        let account = AccountState::new(OWNER, 1);
        let call = builder()
            .build(&account, TOKEN, "quote_buy", vec![ScArg::i128(-5_000_000)])
            .unwrap();
        let decoded: CallRequest = decode_envelope(&call.envelope().unwrap()).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_decode_envelope_rejects_garbage() {
        assert!(matches!(
            decode_envelope::<CallRequest>("not base64!"),
            Err(Error::Transport(_))
        ));
    }

    #[test]
    fn test_prepared_envelope_differs_from_unsigned_call() {
        let call = builder()
            .build(&AccountState::new(OWNER, 1), TOKEN, "sell", vec![])
            .unwrap();
        let prepared = PreparedCall::from_call(&call, 5_000).unwrap();
        assert_eq!(prepared.resource_fee, 5_000);
        assert_ne!(prepared.envelope, call.envelope().unwrap());
    }
}
