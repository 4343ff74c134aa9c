use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use crate::transaction::TransactionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementEntry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Account balance right after the transaction.
    pub balance: Decimal,
    pub timestamp: DateTime<Local>,
}

/// Append-only record of the transactions an account has completed.
#[derive(Debug, Default)]
pub struct Statement {
    entries: Vec<StatementEntry>,
}

impl Statement {
    pub fn entries(&self) -> &[StatementEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn withdrawal_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == TransactionKind::Withdrawal)
            .count()
    }

    // only transactions may record, after the account accepted them
    pub(crate) fn record(&mut self, kind: TransactionKind, amount: Decimal, balance: Decimal) {
        self.entries.push(StatementEntry {
            kind,
            amount,
            balance,
            timestamp: Local::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn record_keeps_insertion_order() {
        let mut statement = Statement::default();
        assert!(statement.is_empty());

        statement.record(TransactionKind::Deposit, dec!(100), dec!(100));
        statement.record(TransactionKind::Withdrawal, dec!(30), dec!(70));
        statement.record(TransactionKind::Deposit, dec!(5), dec!(75));

        let kinds: Vec<_> = statement.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::Deposit
            ]
        );
        assert_eq!(statement.len(), 3);
        let entries = statement.entries();
        assert_eq!(entries[2].balance, dec!(75));
        assert!(entries[0].timestamp <= entries[1].timestamp);
        assert!(entries[1].timestamp <= entries[2].timestamp);
    }

    #[test]
    fn count_withdrawals_only() {
        let mut statement = Statement::default();
        statement.record(TransactionKind::Deposit, dec!(100), dec!(100));
        assert_eq!(statement.withdrawal_count(), 0);
        statement.record(TransactionKind::Withdrawal, dec!(10), dec!(90));
        statement.record(TransactionKind::Withdrawal, dec!(10), dec!(80));
        assert_eq!(statement.withdrawal_count(), 2);
    }
}
