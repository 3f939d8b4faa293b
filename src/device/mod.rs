//! Signing device capability
//!
//! The device holds the keys; this crate only ever asks it for
//! addresses and signatures. The wire transport is an external
//! collaborator, so everything here is expressed against the
//! [`DeviceClient`] trait and test suites drive it with deterministic
//! fakes.
//!
//! The device is a single exclusively-owned resource for the duration
//! of one signing run; all trait methods take `&mut self` and no two
//! components address it concurrently.

use crate::types::{
    InputScriptKind, Network, SignedTransaction, TxInputDescriptor, TxOutputDescriptor,
};
use crate::wallet::DerivationPath;

/// Error types for device communication
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("no signing device found")]
    NoDeviceFound,

    #[error("device transport failed: {0}")]
    Transport(String),

    #[error("request rejected on device: {0}")]
    Rejected(String),

    #[error("device protocol error: {0}")]
    Protocol(String),
}

/// Capability interface of a connected signing device
pub trait DeviceClient {
    /// Derive and return the address at `path` for the given script kind.
    ///
    /// One call is one request/response round-trip with the device.
    fn get_address(
        &mut self,
        network: Network,
        path: &DerivationPath,
        script_kind: InputScriptKind,
    ) -> Result<String, DeviceError>;

    /// Sign an arbitrary message with the key at `path`.
    fn sign_message(
        &mut self,
        network: Network,
        path: &DerivationPath,
        message: &str,
        script_kind: InputScriptKind,
    ) -> Result<Vec<u8>, DeviceError>;

    /// Sign an assembled transaction and return the signatures plus the
    /// serialized transaction bytes.
    fn sign_tx(
        &mut self,
        network: Network,
        input: &TxInputDescriptor,
        outputs: &[TxOutputDescriptor],
    ) -> Result<SignedTransaction, DeviceError>;

    /// Release the device session.
    fn close(&mut self) {}
}

/// Enumerate connected signing devices.
///
/// The USB/HID transport is supplied by the embedding application; this
/// build carries no transport backend, so enumeration yields nothing and
/// the CLI reports the device as unavailable. Library callers pass their
/// own [`DeviceClient`] implementation directly.
pub fn enumerate() -> Vec<Box<dyn DeviceClient>> {
    Vec::new()
}
