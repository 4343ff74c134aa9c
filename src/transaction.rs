use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::account::{Account, AccountError};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// Money movement requested against a single account.
///
/// The amount is not validated here, the account decides whether it accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit { amount },
            TransactionKind::Withdrawal => Self::Withdrawal { amount },
        }
    }

    pub fn amount(&self) -> Decimal {
        match *self {
            Self::Deposit { amount } | Self::Withdrawal { amount } => amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Deposit { .. } => TransactionKind::Deposit,
            Self::Withdrawal { .. } => TransactionKind::Withdrawal,
        }
    }

    /// Applies the transaction to `account` and records it in the account statement.
    ///
    /// The statement is only touched when the account accepted the operation,
    /// so a failed transaction leaves no trace.
    pub fn register(&self, account: &mut Account) -> Result<(), AccountError> {
        match *self {
            Self::Deposit { amount } => account.deposit(amount)?,
            Self::Withdrawal { amount } => account.withdraw(amount)?,
        }
        let balance = account.balance();
        account.statement_mut().record(self.kind(), self.amount(), balance);
        Ok(())
    }
}
