//! Verification of Telegram Mini App init data.
//!
//! The panel sends the raw `Telegram.WebApp.initData` string with every
//! authenticated request. The string is an ampersand-joined list of
//! percent-encoded `key=value` pairs signed by Telegram: the `hash` entry
//! is HMAC-SHA256 over the remaining pairs (sorted by key, decoded, joined
//! with newlines) under a key derived from the bot token.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Domain-separation label fixed by the Mini App signing scheme
const SIGNING_KEY_LABEL: &[u8] = b"WebAppData";

/// Identity extracted from a successfully verified assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: i64,
    pub username: String,
}

/// Outcome of verification. Callers must branch; there is no panic or
/// error path out of the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Verified(VerifiedIdentity),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInitData,
    /// No bot token configured; verification degrades to always-fail
    MissingSecret,
    MissingHash,
    MalformedHash,
    SignatureMismatch,
    InvalidEncoding,
    MissingUser,
    MalformedUser,
}

/// The `user` field payload. Telegram sends more fields (first_name,
/// language_code, ...); only the id and username matter here.
#[derive(Debug, Deserialize)]
struct WebAppUser {
    id: i64,
    #[serde(default)]
    username: String,
}

/// Stateless verifier around an injected shared secret, so tests can
/// substitute fixture tokens instead of reaching for process globals.
#[derive(Debug, Clone)]
pub struct InitDataVerifier {
    bot_token: Option<String>,
}

impl InitDataVerifier {
    pub fn new(bot_token: Option<String>) -> Self {
        Self { bot_token }
    }

    pub fn verify(&self, init_data: &str) -> Verification {
        let Some(token) = self.bot_token.as_deref() else {
            return Verification::Rejected(RejectReason::MissingSecret);
        };
        if init_data.trim().is_empty() {
            return Verification::Rejected(RejectReason::EmptyInitData);
        }

        // Split on '&' then the first '='; entries without '=' are ignored.
        // Later duplicates win, matching the ordered-mapping semantics of
        // the signing side.
        let mut pairs: BTreeMap<&str, &str> = BTreeMap::new();
        for entry in init_data.split('&') {
            if let Some((key, value)) = entry.split_once('=') {
                pairs.insert(key, value);
            }
        }

        // The received signature itself never participates in the signed content
        let Some(received_hash) = pairs.remove("hash") else {
            return Verification::Rejected(RejectReason::MissingHash);
        };
        let received_hash = match hex::decode(received_hash) {
            Ok(bytes) if bytes.len() == 32 => bytes,
            _ => return Verification::Rejected(RejectReason::MalformedHash),
        };

        // Canonical data-check string: keys sorted (BTreeMap iteration order),
        // values percent-decoded, joined as key=value lines
        let mut lines = Vec::with_capacity(pairs.len());
        for (key, value) in &pairs {
            let decoded = match percent_decode_str(value).decode_utf8() {
                Ok(v) => v,
                Err(_) => return Verification::Rejected(RejectReason::InvalidEncoding),
            };
            lines.push(format!("{}={}", key, decoded));
        }
        let data_check_string = lines.join("\n");

        // Signing key is keyed over the fixed label, then over the token
        let mut key_mac = HmacSha256::new_from_slice(SIGNING_KEY_LABEL)
            .expect("HMAC can take key of any size");
        key_mac.update(token.as_bytes());
        let signing_key = key_mac.finalize().into_bytes();

        let mut mac = HmacSha256::new_from_slice(&signing_key)
            .expect("HMAC can take key of any size");
        mac.update(data_check_string.as_bytes());
        if mac.verify_slice(&received_hash).is_err() {
            return Verification::Rejected(RejectReason::SignatureMismatch);
        }

        // Signature holds; the user field is trustworthy now
        let Some(raw_user) = pairs.get("user") else {
            return Verification::Rejected(RejectReason::MissingUser);
        };
        let decoded_user = match percent_decode_str(raw_user).decode_utf8() {
            Ok(v) => v,
            Err(_) => return Verification::Rejected(RejectReason::InvalidEncoding),
        };
        let user: WebAppUser = match serde_json::from_str(&decoded_user) {
            Ok(u) => u,
            Err(_) => return Verification::Rejected(RejectReason::MalformedUser),
        };

        Verification::Verified(VerifiedIdentity {
            user_id: user.id,
            username: user.username,
        })
    }
}
