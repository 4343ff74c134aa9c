use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{customer::TaxId, statement::Statement};

pub type AccountNumber = u32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Insufficient funds{}", overdraft_hint(.overdraft))]
    InsufficientFunds { overdraft: Option<Decimal> },
    #[error("Amount exceeds the withdrawal limit of {limit:.2}")]
    LimitExceeded { limit: Decimal },
    #[error("Maximum number of withdrawals ({max}) reached")]
    WithdrawalCapExceeded { max: usize },
    #[error("Deposit would overflow the account balance")]
    BalanceOverflow,
}

fn overdraft_hint(overdraft: &Option<Decimal>) -> String {
    match overdraft {
        Some(limit) => format!(", overdraft limit of {limit:.2} available"),
        None => ", no overdraft available".to_string(),
    }
}

/// Per-withdrawal limit and lifetime withdrawal cap of a checking account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingLimits {
    pub withdrawal_limit: Decimal,
    pub max_withdrawals: usize,
}

impl Default for CheckingLimits {
    fn default() -> Self {
        Self {
            withdrawal_limit: Decimal::new(500, 0),
            max_withdrawals: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Standard,
    Checking(CheckingLimits),
}

/// Kind of account as named in operation files, limits come from configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKindName {
    #[default]
    Standard,
    Checking,
}

impl AccountKind {
    pub fn name(&self) -> AccountKindName {
        match self {
            AccountKind::Standard => AccountKindName::Standard,
            AccountKind::Checking(_) => AccountKindName::Checking,
        }
    }
}

/// Advisory overdraft ("cheque especial") figure offered on insufficient funds.
///
/// It is never credited to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdraftPolicy {
    pub salary_threshold: Decimal,
    pub rate: Decimal,
}

impl Default for OverdraftPolicy {
    fn default() -> Self {
        Self {
            salary_threshold: Decimal::new(2000, 0),
            rate: Decimal::new(20, 2),
        }
    }
}

impl OverdraftPolicy {
    pub fn limit_for(&self, reference_salary: Decimal) -> Option<Decimal> {
        if reference_salary < self.salary_threshold {
            return None;
        }
        reference_salary.checked_mul(self.rate)
    }
}

#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    agency: String,
    owner: TaxId,
    balance: Decimal,
    statement: Statement,
    kind: AccountKind,
    overdraft: OverdraftPolicy,
    reference_salary: Option<Decimal>,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        agency: impl Into<String>,
        owner: TaxId,
        kind: AccountKind,
        overdraft: OverdraftPolicy,
    ) -> Self {
        Self {
            number,
            agency: agency.into(),
            owner,
            balance: Decimal::ZERO,
            statement: Statement::default(),
            kind,
            overdraft,
            reference_salary: None,
        }
    }

    pub fn with_reference_salary(mut self, salary: Decimal) -> Self {
        self.reference_salary = Some(salary);
        self
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn agency(&self) -> &str {
        &self.agency
    }

    pub fn owner(&self) -> &TaxId {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub(crate) fn statement_mut(&mut self) -> &mut Statement {
        &mut self.statement
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn reference_salary(&self) -> Option<Decimal> {
        self.reference_salary
    }

    /// Overdraft figure the account would be offered right now.
    ///
    /// Without a supplied reference salary the current balance is used instead.
    pub fn overdraft_limit(&self) -> Option<Decimal> {
        self.overdraft.limit_for(self.reference_salary.unwrap_or(self.balance))
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if let AccountKind::Checking(limits) = self.kind {
            let withdrawals = self.statement.withdrawal_count();
            if amount > limits.withdrawal_limit {
                return Err(AccountError::LimitExceeded {
                    limit: limits.withdrawal_limit,
                });
            }
            if withdrawals >= limits.max_withdrawals {
                return Err(AccountError::WithdrawalCapExceeded {
                    max: limits.max_withdrawals,
                });
            }
        }
        self.withdraw_from_balance(amount)
    }

    fn withdraw_from_balance(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                overdraft: self.overdraft_limit(),
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::transaction::Transaction;

    use super::*;

    fn standard() -> Account {
        Account::new(
            10001,
            "0001",
            "123".into(),
            AccountKind::Standard,
            OverdraftPolicy::default(),
        )
    }

    fn checking() -> Account {
        Account::new(
            10002,
            "0001",
            "123".into(),
            AccountKind::Checking(CheckingLimits::default()),
            OverdraftPolicy::default(),
        )
    }

    #[test]
    fn deposit() {
        let mut acc = standard();
        acc.deposit(dec!(13)).unwrap();
        assert_eq!(acc.balance(), dec!(13));

        assert_eq!(acc.deposit(dec!(0)), Err(AccountError::InvalidAmount));
        assert_eq!(acc.deposit(dec!(-1)), Err(AccountError::InvalidAmount));
        assert_eq!(acc.balance(), dec!(13));
    }

    #[test]
    fn deposit_overflow_keeps_balance() {
        let mut acc = standard();
        acc.deposit(Decimal::MAX).unwrap();

        let err = acc.deposit(dec!(1)).unwrap_err();
        assert_eq!(err, AccountError::BalanceOverflow);
        assert_eq!(err.to_string(), "Deposit would overflow the account balance");
        assert_eq!(acc.deposit(Decimal::MAX), Err(AccountError::BalanceOverflow));
        assert_eq!(acc.balance(), Decimal::MAX);

        // money can still leave the account
        acc.withdraw(dec!(1)).unwrap();
        assert_eq!(acc.balance(), Decimal::MAX - dec!(1));
    }

    #[test]
    fn withdraw() {
        let mut acc = standard();
        acc.deposit(dec!(100)).unwrap();

        acc.withdraw(dec!(40)).unwrap();
        assert_eq!(acc.balance(), dec!(60));

        // everything left can be taken
        acc.withdraw(dec!(60)).unwrap();
        assert_eq!(acc.balance(), dec!(0));

        assert_eq!(acc.withdraw(dec!(0)), Err(AccountError::InvalidAmount));
        assert_eq!(acc.withdraw(dec!(-5)), Err(AccountError::InvalidAmount));
        assert_eq!(acc.balance(), dec!(0));
    }

    #[test]
    fn insufficient_funds_with_overdraft_advice() {
        let mut acc = standard();
        acc.deposit(dec!(50)).unwrap();

        // balance is the reference when no salary was supplied
        let err = acc.withdraw(dec!(1000)).unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds { overdraft: None });
        assert_eq!(err.to_string(), "Insufficient funds, no overdraft available");

        let mut acc = acc.with_reference_salary(dec!(2500));
        let err = acc.withdraw(dec!(1000)).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                overdraft: Some(dec!(500))
            }
        );
        assert_eq!(
            err.to_string(),
            "Insufficient funds, overdraft limit of 500.00 available"
        );
        // advice only, nothing is granted
        assert_eq!(acc.balance(), dec!(50));

        let mut acc = acc.with_reference_salary(dec!(1999.99));
        assert_eq!(
            acc.withdraw(dec!(1000)),
            Err(AccountError::InsufficientFunds { overdraft: None })
        );
    }

    #[test]
    fn overdraft_from_large_balance() {
        let mut acc = standard();
        acc.deposit(dec!(2000)).unwrap();
        assert_eq!(acc.overdraft_limit(), Some(dec!(400)));
        assert_eq!(
            acc.withdraw(dec!(2001)),
            Err(AccountError::InsufficientFunds {
                overdraft: Some(dec!(400))
            })
        );
        assert_eq!(acc.balance(), dec!(2000));
    }

    #[test]
    fn checking_limit_before_cap() {
        let mut acc = checking();
        acc.deposit(dec!(5000)).unwrap();

        let err = acc.withdraw(dec!(600)).unwrap_err();
        assert_eq!(err, AccountError::LimitExceeded { limit: dec!(500) });
        assert_eq!(err.to_string(), "Amount exceeds the withdrawal limit of 500.00");

        for _ in 0..3 {
            Transaction::Withdrawal { amount: dec!(100) }
                .register(&mut acc)
                .unwrap();
        }
        // over the limit still reports the limit, even with the cap reached
        assert_eq!(
            acc.withdraw(dec!(600)),
            Err(AccountError::LimitExceeded { limit: dec!(500) })
        );
        let err = acc.withdraw(dec!(1)).unwrap_err();
        assert_eq!(err, AccountError::WithdrawalCapExceeded { max: 3 });
        assert_eq!(err.to_string(), "Maximum number of withdrawals (3) reached");
        assert_eq!(acc.balance(), dec!(4700));
    }

    #[test]
    fn checking_rules_run_before_balance_check() {
        let mut acc = checking();
        // empty account, but the limit is reported first
        assert_eq!(
            acc.withdraw(dec!(501)),
            Err(AccountError::LimitExceeded { limit: dec!(500) })
        );
        assert_eq!(
            acc.withdraw(dec!(10)),
            Err(AccountError::InsufficientFunds { overdraft: None })
        );
    }

    #[test]
    fn overdraft_policy() {
        let policy = OverdraftPolicy::default();
        assert_eq!(policy.limit_for(dec!(1999)), None);
        assert_eq!(policy.limit_for(dec!(2000)), Some(dec!(400)));
        assert_eq!(policy.limit_for(dec!(3000)), Some(dec!(600)));
    }
}
