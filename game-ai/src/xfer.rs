//! The persistence ("xfer") contract every machine and state honors (§6).
//!
//! The original engine's `doXfer(Xfer*)` walks a fixed field order and tags
//! the blob with a version number checked on load. This crate gets the same
//! contract for free by deriving `Serialize`/`Deserialize` directly on the
//! snapshot types (mirroring `game-world::save_load::GameState`) and wrapping
//! them in one versioned envelope backed by `bincode`, rather than hand
//! rolling a cursor-based binary reader/writer.

use serde::{Deserialize, Serialize};

/// Current on-disk version of the behavior-core save format. Bump this and
/// extend [`BehaviorCoreSave`] additively when the snapshot shape changes;
/// old versions are rejected at load rather than partially reinterpreted.
pub const BEHAVIOR_CORE_SAVE_VERSION: u32 = 1;

/// Error returned by [`xfer_save`]/[`xfer_load`]. Distinct from the
/// behavioral `StateReturn::Failure` taxonomy in §7 — this is a genuine
/// programming/IO error, not a normal control-flow outcome.
#[derive(Debug)]
pub enum XferError {
    Io(std::io::Error),
    Encode(bincode::Error),
    UnsupportedVersion { found: u32, expected: u32 },
}

impl std::fmt::Display for XferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XferError::Io(e) => write!(f, "xfer io error: {e}"),
            XferError::Encode(e) => write!(f, "xfer encode error: {e}"),
            XferError::UnsupportedVersion { found, expected } => write!(
                f,
                "xfer save version {found} is not supported (expected {expected})"
            ),
        }
    }
}

impl std::error::Error for XferError {}

impl From<std::io::Error> for XferError {
    fn from(e: std::io::Error) -> Self {
        XferError::Io(e)
    }
}

impl From<bincode::Error> for XferError {
    fn from(e: bincode::Error) -> Self {
        XferError::Encode(e)
    }
}

/// A versioned envelope around any serializable snapshot `T`. The version
/// tag is read before `T` is ever deserialized, so an unsupported version is
/// rejected without attempting to interpret bytes against the wrong shape.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Serialize `snapshot` into a versioned byte blob.
pub fn xfer_save<T: Serialize>(snapshot: &T) -> Result<Vec<u8>, XferError> {
    let envelope = Envelope {
        version: BEHAVIOR_CORE_SAVE_VERSION,
        payload: snapshot,
    };
    Ok(bincode::serialize(&envelope)?)
}

/// Deserialize a versioned byte blob back into `T`. Rejects (fatal, per §7)
/// any version other than [`BEHAVIOR_CORE_SAVE_VERSION`] — version upgrades
/// are meant to be additive fields guarded by this check, not silent reinterpretation.
pub fn xfer_load<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, XferError> {
    #[derive(Deserialize)]
    struct OwnedEnvelope<T> {
        version: u32,
        payload: T,
    }
    let envelope: OwnedEnvelope<T> = bincode::deserialize(bytes)?;
    if envelope.version != BEHAVIOR_CORE_SAVE_VERSION {
        return Err(XferError::UnsupportedVersion {
            found: envelope.version,
            expected: BEHAVIOR_CORE_SAVE_VERSION,
        });
    }
    Ok(envelope.payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dummy {
        a: u32,
        b: String,
    }

    #[test]
    fn round_trip_preserves_fields() {
        let original = Dummy {
            a: 42,
            b: "victim-pos".into(),
        };
        let bytes = xfer_save(&original).expect("save");
        let restored: Dummy = xfer_load(&bytes).expect("load");
        assert_eq!(original, restored);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut bytes = xfer_save(&Dummy {
            a: 1,
            b: "x".into(),
        })
        .unwrap();
        // Corrupt the leading version tag (first bincode-encoded u32, little-endian).
        bytes[0] = 0xFF;
        bytes[1] = 0xFF;
        let result: Result<Dummy, XferError> = xfer_load(&bytes);
        assert!(matches!(result, Err(XferError::UnsupportedVersion { .. })));
    }
}
