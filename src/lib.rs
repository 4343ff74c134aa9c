/// Accounts, their balance rules and the checking account limits.
/// An account never records into its statement by itself, see [`transaction`].
pub mod account;

/// Append-only statement of an account.
pub mod statement;

/// Deposits and withdrawals, the only way to move money on an account.
pub mod transaction;

/// Customers and the ordered list of accounts they own.
pub mod customer;

/// Bank interface, plus "in memory" implementation.
/// Owns customers and accounts and is the entry point for every operation.
///
/// NOTE: The trait keeps callers independent of the storage, so the in memory
/// implementation can be replaced without touching them.
pub mod bank;

/// Business constants, overridable from the environment.
pub mod config;

/// CSV batch driver used by the binary. Lives in the library so the
/// integration tests can run it against an in-memory buffer.
pub mod bin_utils;
