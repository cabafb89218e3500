//! Test utilities, available behind the `test-utils` feature.

pub mod mocks;

pub use mocks::{MockLedgerRpc, RecordedCall};
