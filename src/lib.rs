//! Loyalty order reconciliation and balance ledger.
//!
//! - [`admission::OrderAdmission`] validates and registers order numbers
//! - [`poller::ReconciliationPoller`] converges pending orders with the accrual authority
//! - [`ledger::BalanceLedger`] credits and withdraws points per owner
//!
//! Storage and the authority sit behind the traits in [`domain::traits`].

pub mod accrual_client;
pub mod admission;
pub mod balance_repository;
pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod ledger;
pub mod order_repository;
pub mod poller;
pub mod report;
