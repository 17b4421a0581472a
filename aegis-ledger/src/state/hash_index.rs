use aegis_common::error::{AegisError, Result};

use crate::state::key::{kinds, CompositeKey};
use crate::substrate::{StateTxn, StateView};

/// Derived index from a degree's content hash to its degree id.
///
/// Written atomically alongside the degree record at registration. A binding
/// is permanent: revocation changes the degree's status, never the hash
/// mapping, so a verifier can replay history even for a revoked degree.
pub struct HashIndex;

impl HashIndex {
    /// Binds `hash -> degree_id`.
    ///
    /// Idempotent when the hash is already bound to the same degree id;
    /// fails with [`AegisError::DuplicateHash`] when bound to a different one.
    pub fn bind(txn: &mut dyn StateTxn, hash: &str, degree_id: &str) -> Result<()> {
        match Self::resolve(txn.as_view(), hash)? {
            Some(existing) if existing == degree_id => Ok(()),
            Some(_) => Err(AegisError::DuplicateHash(hash.to_string())),
            None => {
                let key = Self::key(hash)?;
                txn.put(&key.render(), degree_id.as_bytes().to_vec())
            }
        }
    }

    /// Resolves a content hash to the degree id it is bound to, if any.
    pub fn resolve(view: &dyn StateView, hash: &str) -> Result<Option<String>> {
        let key = match Self::key(hash) {
            Ok(key) => key,
            // A hash that cannot even form a key is simply not bound.
            Err(AegisError::InvalidKey(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        match view.get(&key.render())? {
            Some(bytes) => {
                let degree_id = String::from_utf8(bytes).map_err(|_| {
                    AegisError::IntegrityViolation(format!(
                        "hash index entry for '{}' is not valid UTF-8",
                        hash
                    ))
                })?;
                Ok(Some(degree_id))
            }
            None => Ok(None),
        }
    }

    /// Checks the shape of a caller-submitted digest: non-empty, hex-encoded.
    /// The ledger never recomputes the digest itself.
    pub fn validate_digest(hash: &str) -> Result<()> {
        if hash.is_empty() {
            return Err(AegisError::InvalidHash("empty digest".to_string()));
        }
        if hex::decode(hash).is_err() {
            return Err(AegisError::InvalidHash(format!(
                "'{}' is not hex-encoded",
                hash
            )));
        }
        Ok(())
    }

    fn key(hash: &str) -> Result<CompositeKey> {
        CompositeKey::new(kinds::HASH, &[hash])
    }
}
