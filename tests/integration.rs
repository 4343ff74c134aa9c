use std::{cell::RefCell, rc::Rc, str::from_utf8};

use bank_sim::{
    bank::in_memory_bank::InMemoryBank,
    bin_utils::{OperationError, Service},
    config::BankConfig,
};

const TEST_FILE: &str = include_str!("operations.csv");

fn run(statement_of: Option<u32>) -> (Vec<String>, Vec<String>) {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let mut output = Vec::new();
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        bank: InMemoryBank::with_seed(BankConfig::default(), 42),
        statement_of,
        error_printer: Box::new({
            let errors = errors.clone();
            move |line: u64, err: OperationError| errors.borrow_mut().push(format!("{line}: {err}"))
        }),
    };
    service.run().unwrap();
    let lines = from_utf8(&output)
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect();
    let errors = errors.borrow().clone();
    (lines, errors)
}

#[test]
fn process_operations() {
    let (lines, errors) = run(None);

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "tax_id,agency,account,kind,balance,withdrawals");
    // signup accounts get a random number
    let columns: Vec<Vec<&str>> = lines[1..].iter().map(|l| l.split(',').collect()).collect();
    assert_eq!(
        [columns[0][0], columns[0][1], columns[0][3], columns[0][4], columns[0][5]],
        ["111", "0001", "standard", "50", "1"]
    );
    assert_eq!(
        [columns[1][0], columns[1][1], columns[1][3], columns[1][4], columns[1][5]],
        ["222", "0001", "standard", "0", "0"]
    );
    // an overflowing deposit is reported and later rows still apply
    assert_eq!(
        [columns[3][0], columns[3][3], columns[3][4], columns[3][5]],
        ["555", "standard", "49999999999999999999999999999", "1"]
    );
    for row in [&columns[0], &columns[1], &columns[3]] {
        let number: u32 = row[2].parse().unwrap();
        assert!((10000..=99999).contains(&number));
    }
    assert_eq!(lines[3], "222,0001,7,checking,700,3");

    let expected = [
        "already exists",
        "Full name is required",
        "Invalid birth date",
        "Insufficient funds, no overdraft available",
        "withdrawal limit of 500.00",
        "Maximum number of withdrawals (3) reached",
        "Amount must be greater than zero",
        "Field `amount` is required for Withdraw",
        "Deposit would overflow the account balance",
    ];
    assert_eq!(errors.len(), expected.len(), "{errors:#?}");
    for (error, expected) in errors.iter().zip(expected) {
        assert!(error.contains(expected), "`{error}` should contain `{expected}`");
    }
}

#[test]
fn print_account_statement() {
    let (lines, _) = run(Some(7));

    assert_eq!(lines[0], "kind,amount,balance,timestamp");
    let entries: Vec<Vec<&str>> = lines[1..]
        .iter()
        .map(|line| line.split(',').take(3).collect())
        .collect();
    assert_eq!(
        entries,
        [
            ["Deposit", "1000", "1000"],
            ["Withdrawal", "100", "900"],
            ["Withdrawal", "100", "800"],
            ["Withdrawal", "100", "700"],
        ]
    );
}
