use std::collections::{HashMap, hash_map::Entry};

use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    account::{Account, AccountError, AccountKind, AccountKindName, AccountNumber},
    config::BankConfig,
    customer::{Customer, TaxId},
    transaction::Transaction,
};

use super::{Bank, BankError, NewCustomer};

/// Random draws before falling back to scanning for a free number.
const RANDOM_NUMBER_ATTEMPTS: usize = 32;

const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

pub struct InMemoryBank {
    config: BankConfig,
    // insertion order, looked up linearly
    customers: Vec<Customer>,
    accounts: HashMap<AccountNumber, Account>,
    rng: StdRng,
}

impl Default for InMemoryBank {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

impl InMemoryBank {
    pub fn new(config: BankConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Bank whose generated account numbers are reproducible.
    pub fn with_seed(config: BankConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BankConfig, rng: StdRng) -> Self {
        Self {
            config,
            customers: Vec::new(),
            accounts: HashMap::new(),
            rng,
        }
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    fn account_kind(&self, name: AccountKindName) -> AccountKind {
        match name {
            AccountKindName::Standard => AccountKind::Standard,
            AccountKindName::Checking => AccountKind::Checking(self.config.checking),
        }
    }

    fn next_account_number(&mut self) -> Result<AccountNumber, BankError> {
        let range = self.config.account_numbers.clone();
        if range.is_empty() {
            return Err(BankError::AccountNumbersExhausted);
        }
        for _ in 0..RANDOM_NUMBER_ATTEMPTS {
            let number = self.rng.gen_range(range.clone());
            if !self.accounts.contains_key(&number) {
                return Ok(number);
            }
        }
        range
            .into_iter()
            .find(|number| !self.accounts.contains_key(number))
            .ok_or(BankError::AccountNumbersExhausted)
    }

    fn insert_account(
        &mut self,
        number: AccountNumber,
        tax_id: &TaxId,
        kind: AccountKindName,
    ) -> Result<&Account, BankError> {
        let kind = self.account_kind(kind);
        let Some(customer) = self.customers.iter_mut().find(|c| c.tax_id() == tax_id) else {
            return Err(BankError::CustomerNotFound {
                tax_id: tax_id.clone(),
            });
        };
        let Entry::Vacant(entry) = self.accounts.entry(number) else {
            return Err(BankError::AccountNumberTaken { number });
        };
        customer.add_account(number);
        info!(%tax_id, number, ?kind, "account opened");
        Ok(entry.insert(Account::new(
            number,
            self.config.agency.clone(),
            tax_id.clone(),
            kind,
            self.config.overdraft,
        )))
    }
}

impl Bank for InMemoryBank {
    fn find_customer_by_tax_id(&self, tax_id: &TaxId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.tax_id() == tax_id)
    }

    fn create_customer(&mut self, request: NewCustomer) -> Result<&Account, BankError> {
        let NewCustomer {
            tax_id,
            name,
            birth_date,
            address,
        } = request;
        if self.find_customer_by_tax_id(&tax_id).is_some() {
            return Err(BankError::DuplicateCustomer { tax_id });
        }
        let name = name.trim();
        if name.split_whitespace().count() < 2 {
            return Err(BankError::IncompleteName {
                name: name.to_string(),
            });
        }
        let birth_date = NaiveDate::parse_from_str(birth_date.trim(), BIRTH_DATE_FORMAT)
            .map_err(|_| BankError::InvalidDateFormat { value: birth_date })?;
        let number = self.next_account_number()?;

        self.customers.push(Customer::new(
            tax_id.clone(),
            name.to_string(),
            birth_date,
            address.trim().to_string(),
        ));
        info!(%tax_id, "customer created");
        self.insert_account(number, &tax_id, AccountKindName::Standard)
    }

    fn create_account(
        &mut self,
        number: AccountNumber,
        tax_id: &TaxId,
        kind: AccountKindName,
    ) -> Result<&Account, BankError> {
        self.insert_account(number, tax_id, kind)
    }

    fn open_account(
        &mut self,
        tax_id: &TaxId,
        kind: AccountKindName,
    ) -> Result<&Account, BankError> {
        if self.find_customer_by_tax_id(tax_id).is_none() {
            return Err(BankError::CustomerNotFound {
                tax_id: tax_id.clone(),
            });
        }
        let number = self.next_account_number()?;
        self.insert_account(number, tax_id, kind)
    }

    fn submit_transaction(
        &mut self,
        tax_id: &TaxId,
        number: Option<AccountNumber>,
        transaction: Transaction,
    ) -> Result<(), BankError> {
        let customer = self
            .customers
            .iter()
            .find(|c| c.tax_id() == tax_id)
            .ok_or_else(|| BankError::CustomerNotFound {
                tax_id: tax_id.clone(),
            })?;
        let number = match number {
            Some(number) => number,
            None => customer
                .primary_account()
                .ok_or_else(|| BankError::NoAccount {
                    tax_id: tax_id.clone(),
                })?,
        };
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(BankError::AccountNotFound { number })?;
        if account.owner() != customer.tax_id() {
            return Err(BankError::AccountNotOwned {
                number,
                tax_id: tax_id.clone(),
            });
        }

        match customer.submit_transaction(account, &transaction) {
            Ok(()) => {
                debug!(
                    number,
                    kind = %transaction.kind(),
                    amount = %transaction.amount(),
                    balance = %account.balance(),
                    "transaction registered"
                );
                Ok(())
            }
            Err(err) => {
                if let AccountError::InsufficientFunds {
                    overdraft: Some(limit),
                } = &err
                {
                    info!(number, %limit, "overdraft limit available");
                }
                debug!(number, kind = %transaction.kind(), "transaction denied: {err}");
                Err(err.into())
            }
        }
    }

    fn list_accounts(&self, tax_id: &TaxId) -> Result<Vec<&Account>, BankError> {
        let customer = self.find_customer_by_tax_id(tax_id).ok_or_else(|| {
            BankError::CustomerNotFound {
                tax_id: tax_id.clone(),
            }
        })?;
        Ok(customer
            .accounts()
            .iter()
            .filter_map(|number| self.accounts.get(number))
            .collect())
    }

    fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }
}
