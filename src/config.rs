use std::{env, ops::RangeInclusive, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{AccountNumber, CheckingLimits, OverdraftPolicy};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value `{value}` for {key}: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Business constants of the bank.
///
/// [`BankConfig::default`] reproduces the rules the bank has always run with,
/// [`BankConfig::from_env`] lets a deployment override them:
///
/// - `BANK_AGENCY`: agency code of every account (default `0001`)
/// - `BANK_WITHDRAWAL_LIMIT`: checking account per-withdrawal limit (default 500)
/// - `BANK_MAX_WITHDRAWALS`: checking account withdrawal cap (default 3)
/// - `BANK_OVERDRAFT_THRESHOLD`: minimal salary for overdraft advice (default 2000)
/// - `BANK_OVERDRAFT_RATE`: share of the salary offered as overdraft (default 0.20)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub agency: String,
    pub checking: CheckingLimits,
    pub overdraft: OverdraftPolicy,
    pub account_numbers: RangeInclusive<AccountNumber>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            agency: "0001".to_string(),
            checking: CheckingLimits::default(),
            overdraft: OverdraftPolicy::default(),
            account_numbers: 10000..=99999,
        }
    }
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(agency) = lookup("BANK_AGENCY") {
            config.agency = agency.trim().to_string();
        }
        if let Some(limit) = parse_var::<Decimal, _>(&lookup, "BANK_WITHDRAWAL_LIMIT")? {
            config.checking.withdrawal_limit = positive("BANK_WITHDRAWAL_LIMIT", limit)?;
        }
        if let Some(max) = parse_var::<usize, _>(&lookup, "BANK_MAX_WITHDRAWALS")? {
            config.checking.max_withdrawals = max;
        }
        if let Some(threshold) = parse_var::<Decimal, _>(&lookup, "BANK_OVERDRAFT_THRESHOLD")? {
            config.overdraft.salary_threshold = positive("BANK_OVERDRAFT_THRESHOLD", threshold)?;
        }
        if let Some(rate) = parse_var::<Decimal, _>(&lookup, "BANK_OVERDRAFT_RATE")? {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    key: "BANK_OVERDRAFT_RATE",
                    value: rate.to_string(),
                    message: "rate must be between 0 and 1".to_string(),
                });
            }
            config.overdraft.rate = rate;
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|err: T::Err| ConfigError::InvalidValue {
                    key,
                    value,
                    message: err.to_string(),
                })
        })
        .transpose()
}

fn positive(key: &'static str, value: Decimal) -> Result<Decimal, ConfigError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            message: "must be greater than zero".to_string(),
        })
    }
}
