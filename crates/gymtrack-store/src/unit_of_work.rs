//! Unit of work
//!
//! A scoped transaction handle. Exactly one exists per operation; it is
//! committed explicitly and rolled back on every other exit path,
//! including early returns and panics, because the underlying
//! `rusqlite::Transaction` rolls back on drop.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Transactional handle over the store's connection
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> UnitOfWork<'conn> {
    /// Start a unit of work on `conn`
    ///
    /// Takes the write lock up front so a commit cannot fail with
    /// SQLITE_BUSY after work has been done.
    pub(crate) fn begin(conn: &'conn mut Connection) -> Result<Self> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Ok(Self { tx })
    }

    /// The transaction statements run against
    pub fn tx(&self) -> &Transaction<'conn> {
        &self.tx
    }

    /// Make every change in this unit of work durable
    ///
    /// # Errors
    /// The mapped store error; the transaction is rolled back in that case.
    pub fn commit(self) -> Result<()> {
        self.tx.commit().map_err(from_rusqlite)
    }

    /// Discard every change in this unit of work
    ///
    /// # Errors
    /// `Storage` if SQLite refuses the rollback.
    pub fn rollback(self) -> Result<()> {
        self.tx.rollback().map_err(from_rusqlite)
    }
}
