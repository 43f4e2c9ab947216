//! Client-side locale negotiation.
//!
//! - `resolve`: the pure priority chain (URL → cookie → local storage →
//!   browser languages → default), also used server-side
//! - `storage`: injected cookie / local-storage / navigation collaborators
//! - `state`: the `LocaleNegotiator` that owns the active locale

mod resolve;
mod state;
mod storage;

pub use resolve::{resolve_locale, resolve_request_locale, LocaleSource, Resolution, ResolveInputs};
pub use state::{LocaleNegotiator, NegotiatorError, NegotiatorState, PersistenceKeys};
pub use storage::{
    MemoryStore, Navigator, PreferenceStore, RecordingNavigator, StorageError, UnavailableStore,
};
