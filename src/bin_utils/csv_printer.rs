use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::AccountNumber;

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub tax_id: String,
    pub agency: String,
    pub account: AccountNumber,
    pub kind: &'static str,
    pub balance: Decimal,
    pub withdrawals: usize,
}

#[derive(Debug, Serialize)]
pub struct StatementRow {
    pub kind: String,
    pub amount: Decimal,
    pub balance: Decimal,
    pub timestamp: String,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, accounts)
}

pub fn print_statement<W>(
    output: &mut W,
    entries: impl Iterator<Item = StatementRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, entries)
}

fn print_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
