//! Abstract asset-ledger traits for lpstake.
//!
//! The pool never moves tokens itself. Every balance change goes through an
//! [`AssetLedger`] implementation (a chain token contract, a custody service,
//! or the in-memory ledger in `lpstake-nullables` for tests). The rest of the
//! codebase depends only on the trait.

pub mod error;
pub mod ledger;
pub mod settlement;

pub use error::AssetError;
pub use ledger::AssetLedger;
pub use settlement::{Movement, Settlement};
