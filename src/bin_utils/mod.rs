//! Batch driver for the `bank-sim` binary: reads operations from CSV, applies
//! them to a bank and prints the resulting accounts (or one statement) as CSV.

use std::io::{Read, Write};

use crate::{
    account::{AccountKindName, AccountNumber},
    bank::{Bank, BankError, NewCustomer, in_memory_bank::InMemoryBank},
    customer::TaxId,
    transaction::{Transaction, TransactionKind},
};
use anyhow::{Context, Result};
use csv_parser::{CsvOperationParser, Operation, OperationKind};
use csv_printer::{AccountRow, StatementRow, print_accounts, print_statement};
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Field `{field}` is required for {op:?}")]
    FieldRequired {
        op: OperationKind,
        field: &'static str,
    },
    #[error(transparent)]
    Bank(#[from] BankError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub bank: InMemoryBank,
    /// Print the statement of this account instead of the account summary.
    pub statement_of: Option<AccountNumber>,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        for (line, row) in parser {
            let result = row
                .map_err(OperationError::from)
                .and_then(|operation| apply_operation(&mut self.bank, operation));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        match self.statement_of {
            Some(number) => {
                let account = self
                    .bank
                    .account(number)
                    .with_context(|| format!("Account {number} not found"))?;
                print_statement(
                    self.output,
                    account.statement().entries().iter().map(|entry| StatementRow {
                        kind: entry.kind.to_string(),
                        amount: entry.amount,
                        balance: entry.balance,
                        timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    }),
                )
            }
            None => {
                let bank = &self.bank;
                print_accounts(
                    self.output,
                    bank.customers()
                        .flat_map(|customer| customer.accounts().iter())
                        .filter_map(|number| bank.account(*number))
                        .map(|acc| AccountRow {
                            tax_id: acc.owner().to_string(),
                            agency: acc.agency().to_string(),
                            account: acc.number(),
                            kind: match acc.kind().name() {
                                AccountKindName::Standard => "standard",
                                AccountKindName::Checking => "checking",
                            },
                            balance: acc.balance(),
                            withdrawals: acc.statement().withdrawal_count(),
                        }),
                )
            }
        }
    }
}

fn apply_operation(bank: &mut impl Bank, operation: Operation) -> Result<(), OperationError> {
    let op = operation.op;
    let tax_id = TaxId::from(operation.tax_id);
    match op {
        OperationKind::Signup => {
            bank.create_customer(NewCustomer {
                tax_id,
                name: required(operation.name, op, "name")?,
                birth_date: required(operation.birth_date, op, "birth_date")?,
                address: operation.address.unwrap_or_default(),
            })?;
        }
        OperationKind::Open => {
            let kind = operation.kind.unwrap_or_default();
            match operation.account {
                Some(number) => bank.create_account(number, &tax_id, kind)?,
                None => bank.open_account(&tax_id, kind)?,
            };
        }
        OperationKind::Deposit | OperationKind::Withdraw => {
            let kind = if op == OperationKind::Deposit {
                TransactionKind::Deposit
            } else {
                TransactionKind::Withdrawal
            };
            let amount = required(operation.amount, op, "amount")?;
            bank.submit_transaction(&tax_id, operation.account, Transaction::new(kind, amount))?;
        }
    }
    Ok(())
}

fn required<T>(
    value: Option<T>,
    op: OperationKind,
    field: &'static str,
) -> Result<T, OperationError> {
    value.ok_or(OperationError::FieldRequired { op, field })
}
