// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracked account records and the create-account draft.

use crate::models::quota::{self, ProgressFill};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Connection type as reported by the quota API.
///
/// Unrecognized wire values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    #[default]
    Landline,
    WeAir,
    /// Legacy name for WE Air.
    Mobile,
    Other(String),
}

impl AccountType {
    /// Placeholder for records that carry no type at all.
    pub fn unknown() -> Self {
        AccountType::Other(String::new())
    }

    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Landline => "LANDLINE",
            AccountType::WeAir => "WE_AIR",
            AccountType::Mobile => "MOBILE",
            AccountType::Other(s) => s,
        }
    }

    /// Display group for this type, if any.
    pub fn group(&self) -> Option<AccountGroup> {
        match self {
            AccountType::Landline => Some(AccountGroup::Landlines),
            AccountType::WeAir | AccountType::Mobile => Some(AccountGroup::WeAir),
            AccountType::Other(_) => None,
        }
    }
}

impl From<String> for AccountType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "LANDLINE" => AccountType::Landline,
            "WE_AIR" => AccountType::WeAir,
            "MOBILE" => AccountType::Mobile,
            _ => AccountType::Other(value),
        }
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard section an account is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum AccountGroup {
    Landlines,
    WeAir,
}

impl AccountGroup {
    /// Sections in display order.
    pub const ALL: [AccountGroup; 2] = [AccountGroup::Landlines, AccountGroup::WeAir];

    pub fn title(self) -> &'static str {
        match self {
            AccountGroup::Landlines => "Landlines",
            AccountGroup::WeAir => "WE Air (4G)",
        }
    }
}

/// One tracked connection with its quota balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub identifier: String,
    /// Null or missing on the wire decodes as an ungrouped `Other("")`.
    #[serde(
        rename = "type",
        default = "AccountType::unknown",
        deserialize_with = "type_or_unknown"
    )]
    pub account_type: AccountType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub used_gb: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_gb: f64,
    /// Taken as reported; not cross-checked against `total_gb - used_gb`.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub remain_gb: f64,
    #[serde(default)]
    pub expires_on: Option<String>,
    #[serde(default)]
    pub offer_name: Option<String>,
}

impl Account {
    /// Label shown on the card.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unnamed Account",
        }
    }

    /// Date part of `expires_on` (first whitespace-delimited token).
    pub fn expiry_date(&self) -> Option<&str> {
        self.expires_on
            .as_deref()
            .and_then(|s| s.split_whitespace().next())
    }

    pub fn percent_left(&self) -> f64 {
        quota::percent_left(self.remain_gb, self.total_gb)
    }

    pub fn is_low(&self) -> bool {
        quota::is_low(self.remain_gb, self.total_gb)
    }

    pub fn progress(&self) -> ProgressFill {
        quota::progress_fill(self.used_gb, self.total_gb)
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn type_or_unknown<'de, D>(deserializer: D) -> Result<AccountType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(AccountType::from)
        .unwrap_or_else(AccountType::unknown))
}

/// Accounts partitioned by display group, in collection order.
///
/// Accounts whose type maps to no group appear in neither list.
#[derive(Debug, Default)]
pub struct AccountGroups<'a> {
    pub landlines: Vec<&'a Account>,
    pub we_air: Vec<&'a Account>,
}

impl<'a> AccountGroups<'a> {
    pub fn from_accounts(accounts: &'a [Account]) -> Self {
        let mut groups = Self::default();
        for account in accounts {
            match account.account_type.group() {
                Some(AccountGroup::Landlines) => groups.landlines.push(account),
                Some(AccountGroup::WeAir) => groups.we_air.push(account),
                None => {}
            }
        }
        groups
    }

    pub fn get(&self, group: AccountGroup) -> &[&'a Account] {
        match group {
            AccountGroup::Landlines => &self.landlines,
            AccountGroup::WeAir => &self.we_air,
        }
    }
}

/// Payload for `POST /accounts` on the quota API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AccountDraft {
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,
    /// Account password on the carrier portal.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(id: &str, account_type: &str) -> Account {
        serde_json::from_value(json!({
            "identifier": id,
            "type": account_type,
            "used_gb": 1.0,
            "total_gb": 10.0,
            "remain_gb": 9.0
        }))
        .unwrap()
    }

    #[test]
    fn test_type_round_trips_unknown_values() {
        let t: AccountType = serde_json::from_value(json!("ADSL")).unwrap();
        assert_eq!(t, AccountType::Other("ADSL".to_string()));
        assert_eq!(serde_json::to_value(&t).unwrap(), json!("ADSL"));
        assert_eq!(serde_json::to_value(AccountType::WeAir).unwrap(), json!("WE_AIR"));
    }

    #[test]
    fn test_mobile_groups_with_we_air() {
        assert_eq!(AccountType::Mobile.group(), Some(AccountGroup::WeAir));
        assert_eq!(AccountType::WeAir.group(), Some(AccountGroup::WeAir));
        assert_eq!(AccountType::Landline.group(), Some(AccountGroup::Landlines));
        assert_eq!(AccountType::Other("X".into()).group(), None);
    }

    #[test]
    fn test_null_or_missing_type_is_ungrouped() {
        let null_type: Account =
            serde_json::from_value(json!({"identifier": "B", "type": null})).unwrap();
        let no_type: Account = serde_json::from_value(json!({"identifier": "C"})).unwrap();

        assert_eq!(null_type.account_type, AccountType::unknown());
        assert_eq!(no_type.account_type.group(), None);
    }

    #[test]
    fn test_null_and_missing_numbers_are_zero() {
        let acc: Account = serde_json::from_value(json!({
            "identifier": "0221234567",
            "type": "LANDLINE",
            "used_gb": null,
            "remain_gb": 3.5,
            "extra_field": true
        }))
        .unwrap();

        assert_eq!(acc.used_gb, 0.0);
        assert_eq!(acc.total_gb, 0.0);
        assert_eq!(acc.remain_gb, 3.5);
        assert!(acc.name.is_none());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut acc = account("A", "LANDLINE");
        assert_eq!(acc.display_name(), "Unnamed Account");
        acc.name = Some(String::new());
        assert_eq!(acc.display_name(), "Unnamed Account");
        acc.name = Some("Home".to_string());
        assert_eq!(acc.display_name(), "Home");
    }

    #[test]
    fn test_expiry_date_takes_first_token() {
        let mut acc = account("A", "LANDLINE");
        assert_eq!(acc.expiry_date(), None);
        acc.expires_on = Some("2026-11-01 23:59:59".to_string());
        assert_eq!(acc.expiry_date(), Some("2026-11-01"));
        acc.expires_on = Some("   ".to_string());
        assert_eq!(acc.expiry_date(), None);
    }

    #[test]
    fn test_groups_are_disjoint_and_ordered() {
        let accounts = vec![
            account("A", "WE_AIR"),
            account("B", "LANDLINE"),
            account("C", "MOBILE"),
            account("D", "FIBER"),
            account("E", "LANDLINE"),
        ];

        let groups = AccountGroups::from_accounts(&accounts);
        let landlines: Vec<_> = groups.landlines.iter().map(|a| a.identifier.as_str()).collect();
        let we_air: Vec<_> = groups.we_air.iter().map(|a| a.identifier.as_str()).collect();

        assert_eq!(landlines, vec!["B", "E"]);
        assert_eq!(we_air, vec!["A", "C"]);
        assert_eq!(groups.get(AccountGroup::Landlines).len(), 2);
    }

    #[test]
    fn test_draft_requires_identifier_and_password() {
        let draft = AccountDraft {
            account_type: AccountType::WeAir,
            identifier: "015000000".to_string(),
            password: String::new(),
            name: String::new(),
        };
        assert!(draft.validate().is_err());

        let draft = AccountDraft {
            password: "x".to_string(),
            ..draft
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft: AccountDraft =
            serde_json::from_value(json!({"identifier": "B", "password": "x"})).unwrap();
        assert_eq!(draft.account_type, AccountType::Landline);
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"type": "LANDLINE", "identifier": "B", "password": "x", "name": ""})
        );
    }
}
