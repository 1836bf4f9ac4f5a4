use std::path::PathBuf;

use arl_sdk::{Asset, Authorization, User};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arl",
    about = "Asset Record Ledger: asset, user, and authorization records with gated reads",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Ledger snapshot file (overrides the config file)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Config file (defaults to ./arl.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an asset under a new key
    CreateAsset(AssetArgs),
    /// Replace an existing asset
    UpdateAsset(AssetArgs),
    /// Create a user
    CreateUser(UserArgs),
    /// Replace an existing user
    UpdateUser(UserArgs),
    /// Grant a user access to an asset
    Grant(AuthArgs),
    /// Replace an existing authorization
    UpdateAuth(AuthArgs),
    /// Read an asset on behalf of a user, presenting an authorization
    ReadAsset(ReadAssetArgs),
    /// Read an asset without an authorization check
    GetAsset(KeyArgs),
    /// Read a user
    ReadUser(KeyArgs),
    /// Read an authorization
    ReadAuth(KeyArgs),
    /// Delete an asset
    DeleteAsset(KeyArgs),
    /// List every entry in the asset key range
    ListAssets(ListArgs),
    /// Check whether a record exists
    Exists(ExistsArgs),
}

#[derive(Args)]
pub struct AssetArgs {
    pub asset_id: String,
    #[arg(long = "type", default_value_t)]
    pub asset_type: String,
    #[arg(long, default_value_t)]
    pub id: String,
    #[arg(long, default_value_t)]
    pub date_issue: String,
    #[arg(long, default_value_t)]
    pub dr_no: String,
    #[arg(long, default_value_t)]
    pub group: String,
    #[arg(long, default_value_t)]
    pub location: String,
    #[arg(long, default_value_t)]
    pub fr_date: String,
    #[arg(long, default_value_t)]
    pub to_date: String,
    #[arg(long, default_value_t)]
    pub mc_status: String,
}

impl AssetArgs {
    pub fn to_asset(&self) -> Asset {
        Asset {
            id: self.id.clone(),
            asset_type: self.asset_type.clone(),
            date_issue: self.date_issue.clone(),
            dr_no: self.dr_no.clone(),
            group: self.group.clone(),
            location: self.location.clone(),
            fr_date: self.fr_date.clone(),
            to_date: self.to_date.clone(),
            mc_status: self.mc_status.clone(),
        }
    }
}

#[derive(Args)]
pub struct UserArgs {
    pub user_id: String,
    #[arg(long = "type", default_value_t)]
    pub user_type: String,
    #[arg(long, default_value_t)]
    pub username: String,
    #[arg(long, default_value_t)]
    pub date: String,
}

impl UserArgs {
    pub fn to_user(&self) -> User {
        User {
            user_id: self.user_id.clone(),
            user_type: self.user_type.clone(),
            username: self.username.clone(),
            date: self.date.clone(),
        }
    }
}

#[derive(Args)]
pub struct AuthArgs {
    pub auth_code: String,
    #[arg(long = "type", default_value_t)]
    pub auth_type: String,
    #[arg(long, default_value_t)]
    pub for_asset: String,
    #[arg(long, default_value_t)]
    pub for_user: String,
    #[arg(long, default_value_t)]
    pub approval: String,
}

impl AuthArgs {
    pub fn to_authorization(&self) -> Authorization {
        Authorization {
            auth_code: self.auth_code.clone(),
            auth_type: self.auth_type.clone(),
            for_asset_id: self.for_asset.clone(),
            for_user_id: self.for_user.clone(),
            approval: self.approval.clone(),
        }
    }
}

#[derive(Args)]
pub struct ReadAssetArgs {
    pub asset_id: String,
    pub user_id: String,
    pub auth_code: String,
}

#[derive(Args)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct ExistsArgs {
    pub kind: KindArg,
    pub key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Asset,
    User,
    Auth,
}
