use std::borrow::Cow;

use crate::address::literal;
use crate::record::DeployConfig;

/// Optimism Goerli (chain id 420).
pub static OPTIMISM_GOERLI: DeployConfig = DeployConfig {
    ddd: literal!("0x9C6373dE60c2D3297b18A8f964618ac46E011B58"),
    // EcoPod test account
    l2_proxy_owner_address: literal!("0x8F0EBDaA1cF7106bE861753B0f9F5c0250fE0819"),
    optimist_name: Cow::Borrowed("Optimist"),
    optimist_symbol: Cow::Borrowed("OPTIMIST"),
    optimist_base_uri_attestor_address: literal!("0x8F0EBDaA1cF7106bE861753B0f9F5c0250fE0819"),
    optimist_inviter_invite_granter: literal!("0x8F0EBDaA1cF7106bE861753B0f9F5c0250fE0819"),
    optimist_inviter_name: Cow::Borrowed("OptimistInviter"),
    optimist_allowlist_allowlist_attestor: literal!("0x8F0EBDaA1cF7106bE861753B0f9F5c0250fE0819"),
    optimist_allowlist_coinbase_quest_attestor: literal!("0x9A75024c09b48B78205dfCf9D9FC5E026CD9A416"),
    faucet_admin: literal!("0xEa193Fd9565284E7534dDDA15b07B119e7792644"),
    github_fam_admin: literal!("0xEa193Fd9565284E7534dDDA15b07B119e7792644"),
    github_fam_name: Cow::Borrowed("GithubFam"),
    github_fam_version: Cow::Borrowed("1"),
    optimist_fam_admin: literal!("0xEa193Fd9565284E7534dDDA15b07B119e7792644"),
    optimist_fam_name: Cow::Borrowed("OptimistFam"),
    optimist_fam_version: Cow::Borrowed("1"),
};
