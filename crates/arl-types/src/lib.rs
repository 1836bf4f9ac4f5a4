//! Record types for the Asset Record Ledger (ARL).
//!
//! Three record kinds share one ledger key namespace:
//!
//! - [`Asset`]: an opaque asset document, keyed by a caller-supplied asset ID
//! - [`User`]: a user profile, keyed by its `UserId`
//! - [`Authorization`]: a grant letting one user read one asset, keyed by
//!   its `AuthCode`
//!
//! Every record is stored as a flat JSON object whose field names match the
//! wire names exactly (`MCStatus`, `ForUserId`, ...). Other readers of the
//! ledger depend on those names, so they never change.

pub mod asset;
pub mod authorization;
pub mod error;
pub mod kind;
pub mod record;
pub mod user;

pub use asset::Asset;
pub use authorization::{Authorization, DENIED_APPROVAL};
pub use error::TypeError;
pub use kind::RecordKind;
pub use record::{Record, ASSET_RANGE_END, ASSET_RANGE_START, RECORD_EVENT};
pub use user::User;
