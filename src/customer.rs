use std::fmt;

use chrono::NaiveDate;

use crate::{
    account::{Account, AccountError, AccountNumber},
    transaction::Transaction,
};

/// Customer tax identifier (CPF), unique per bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaxId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for TaxId {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct Customer {
    tax_id: TaxId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Customer {
    pub fn new(tax_id: TaxId, name: String, birth_date: NaiveDate, address: String) -> Self {
        Self {
            tax_id,
            name,
            birth_date,
            address,
            accounts: Vec::new(),
        }
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Account numbers in the order the accounts were opened.
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn primary_account(&self) -> Option<AccountNumber> {
        self.accounts.first().copied()
    }

    pub fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    pub fn submit_transaction(
        &self,
        account: &mut Account,
        transaction: &Transaction,
    ) -> Result<(), AccountError> {
        transaction.register(account)
    }
}
