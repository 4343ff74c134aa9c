use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountKindName, AccountNumber},
    customer::{Customer, TaxId},
    transaction::Transaction,
};

pub mod in_memory_bank;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Customer with tax id {tax_id} already exists")]
    DuplicateCustomer { tax_id: TaxId },
    #[error("Customer with tax id {tax_id} not found")]
    CustomerNotFound { tax_id: TaxId },
    #[error("Full name is required, got `{name}`")]
    IncompleteName { name: String },
    #[error("Invalid birth date `{value}`, expected dd/mm/YYYY")]
    InvalidDateFormat { value: String },
    #[error("Customer {tax_id} has no account")]
    NoAccount { tax_id: TaxId },
    #[error("Account {number} not found")]
    AccountNotFound { number: AccountNumber },
    #[error("Account {number} does not belong to customer {tax_id}")]
    AccountNotOwned {
        number: AccountNumber,
        tax_id: TaxId,
    },
    #[error("Account number {number} is already taken")]
    AccountNumberTaken { number: AccountNumber },
    #[error("No free account numbers left")]
    AccountNumbersExhausted,
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Signup data as entered by the customer, validated by [`Bank::create_customer`].
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub tax_id: TaxId,
    pub name: String,
    /// `dd/mm/YYYY`
    pub birth_date: String,
    pub address: String,
}

/// Repository of customers and their accounts, the only way to reach the
/// domain model from outside.
pub trait Bank {
    fn find_customer_by_tax_id(&self, tax_id: &TaxId) -> Option<&Customer>;

    /// Registers a customer and opens its first (standard) account.
    fn create_customer(&mut self, request: NewCustomer) -> Result<&Account, BankError>;

    /// Opens an additional account with a caller chosen number.
    fn create_account(
        &mut self,
        number: AccountNumber,
        tax_id: &TaxId,
        kind: AccountKindName,
    ) -> Result<&Account, BankError>;

    /// Opens an additional account with a generated number.
    fn open_account(
        &mut self,
        tax_id: &TaxId,
        kind: AccountKindName,
    ) -> Result<&Account, BankError>;

    /// Applies `transaction` to one of the customer's accounts, the primary
    /// one when `number` is not given.
    fn submit_transaction(
        &mut self,
        tax_id: &TaxId,
        number: Option<AccountNumber>,
        transaction: Transaction,
    ) -> Result<(), BankError>;

    fn list_accounts(&self, tax_id: &TaxId) -> Result<Vec<&Account>, BankError>;

    fn account(&self, number: AccountNumber) -> Option<&Account>;

    /// Calls `next` for a fresh signup request until one carries a valid full
    /// name, at most `max_attempts` times. Any other failure stops the loop.
    fn signup_with_retries<F>(
        &mut self,
        max_attempts: usize,
        mut next: F,
    ) -> Result<AccountNumber, BankError>
    where
        Self: Sized,
        F: FnMut(usize) -> NewCustomer,
    {
        let mut last_err = BankError::IncompleteName {
            name: String::new(),
        };
        for attempt in 0..max_attempts {
            match self.create_customer(next(attempt)).map(Account::number) {
                Err(err @ BankError::IncompleteName { .. }) => {
                    tracing::debug!(attempt, "signup rejected: {err}");
                    last_err = err;
                }
                result => return result,
            }
        }
        Err(last_err)
    }
}
