//! The authorization-gated asset read.
//!
//! [`RecordStore::read_asset`] walks a fixed, fail-fast sequence of
//! [`AccessCheck`]s. The first failing check decides the error; the asset is
//! decoded only after every check passes. Run it against a consistent ledger
//! view (a transaction or read view) so the checks and the final read see
//! the same state.

use std::fmt;

use arl_ledger::Ledger;
use arl_types::{Asset, Authorization, RecordKind};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::RecordStore;

/// The three keys presented by a gated read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRequest<'r> {
    pub asset_id: &'r str,
    pub user_id: &'r str,
    pub auth_code: &'r str,
}

/// One step of the gated read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessCheck {
    /// A record is stored at the asset key.
    AssetPresent,
    /// A record is stored at the user key.
    UserPresent,
    /// A record is stored at the authorization key.
    GrantPresent,
    /// The grant's `ForUserId` equals the requesting user.
    GrantHolder,
    /// The grant's `Approval` is not `"N"`.
    GrantApproved,
}

/// Evaluation order of the gated read.
pub const READ_ASSET_CHECKS: [AccessCheck; 5] = [
    AccessCheck::AssetPresent,
    AccessCheck::UserPresent,
    AccessCheck::GrantPresent,
    AccessCheck::GrantHolder,
    AccessCheck::GrantApproved,
];

impl AccessCheck {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssetPresent => "asset-present",
            Self::UserPresent => "user-present",
            Self::GrantPresent => "grant-present",
            Self::GrantHolder => "grant-holder",
            Self::GrantApproved => "grant-approved",
        }
    }
}

/// Why an existing grant did not let the user read the asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
    /// The grant names a different user.
    NotHolder,
    /// The grant's approval flag is `"N"`.
    NotApproved,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotHolder => f.write_str("authorization is held by another user"),
            Self::NotApproved => f.write_str("authorization is not approved"),
        }
    }
}

impl<L: Ledger + ?Sized> RecordStore<'_, L> {
    /// Read the asset at `asset_id` on behalf of `user_id`, presenting the
    /// grant stored at `auth_code`.
    ///
    /// Fails with `NotFound` if the asset, the user key, or the grant is
    /// absent, and with `Unauthorized` if the grant names another user or is
    /// marked `"N"`. The grant's `ForAssetId` is not consulted.
    pub fn read_asset(&self, asset_id: &str, user_id: &str, auth_code: &str) -> StoreResult<Asset> {
        let request = AccessRequest {
            asset_id,
            user_id,
            auth_code,
        };

        let mut grant = None;
        for check in READ_ASSET_CHECKS {
            if let Err(err) = self.run_check(check, &request, &mut grant) {
                debug!(
                    check = check.name(),
                    asset_id,
                    user_id,
                    auth_code,
                    error = %err,
                    "gated asset read refused"
                );
                return Err(err);
            }
        }

        self.read(asset_id)
    }

    fn run_check(
        &self,
        check: AccessCheck,
        request: &AccessRequest<'_>,
        grant: &mut Option<Authorization>,
    ) -> StoreResult<()> {
        match check {
            AccessCheck::AssetPresent => self.require(RecordKind::Asset, request.asset_id),
            AccessCheck::UserPresent => self.require(RecordKind::User, request.user_id),
            AccessCheck::GrantPresent => self.require(RecordKind::Authorization, request.auth_code),
            AccessCheck::GrantHolder => {
                let loaded = self.read_authorization(request.auth_code)?;
                let held = loaded.is_held_by(request.user_id);
                *grant = Some(loaded);
                if held {
                    Ok(())
                } else {
                    Err(unauthorized(request, Denial::NotHolder))
                }
            }
            AccessCheck::GrantApproved => {
                let loaded = match grant.take() {
                    Some(loaded) => loaded,
                    None => self.read_authorization(request.auth_code)?,
                };
                if loaded.is_denied() {
                    Err(unauthorized(request, Denial::NotApproved))
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn unauthorized(request: &AccessRequest<'_>, denial: Denial) -> StoreError {
    StoreError::Unauthorized {
        user_id: request.user_id.to_string(),
        asset_id: request.asset_id.to_string(),
        denial,
    }
}
