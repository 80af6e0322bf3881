//! Reconciliation poller
//!
//! Walks every `NEW`/`PROCESSING` order, asks the accrual authority where it
//! stands, advances the local status and credits the owner once an accrual
//! is final. A failing order is logged and left for the next cycle; nothing
//! here stops the loop except the shutdown token.
//!
//! Assumes a single poller instance: the `NEW -> PROCESSING` write is a
//! progress marker, not a lease.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::{AccrualClient, Error, Order, OrderStatus, OrderStore, Points};
use crate::ledger::BalanceLedger;

/// Tally of one pass over the pending orders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub pending: usize,
    pub updated: usize,
    pub credited: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Left untouched because the cycle deadline passed.
    pub deferred: usize,
}

enum Outcome {
    Updated { credited: bool },
    Skipped,
}

#[derive(Clone)]
pub struct ReconciliationPoller {
    orders: Arc<dyn OrderStore>,
    ledger: BalanceLedger,
    accrual: Arc<dyn AccrualClient>,
    interval: Duration,
    cycle_deadline: Duration,
}

impl ReconciliationPoller {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        ledger: BalanceLedger,
        accrual: Arc<dyn AccrualClient>,
        interval: Duration,
        cycle_deadline: Duration,
    ) -> Self {
        Self {
            orders,
            ledger,
            accrual,
            interval,
            cycle_deadline,
        }
    }

    /// Runs cycles until `shutdown` fires. A cycle already under way is
    /// finished; no new one starts after cancellation.
    pub async fn run(&self, shutdown: CancellationToken) {
        tracing::info!(interval = ?self.interval, "Reconciliation poller started");

        while !shutdown.is_cancelled() {
            let report = self.run_cycle().await;
            tracing::info!(
                pending = report.pending,
                updated = report.updated,
                credited = report.credited,
                skipped = report.skipped,
                failed = report.failed,
                deferred = report.deferred,
                "Reconciliation cycle finished"
            );

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("Reconciliation poller stopped");
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let deadline = Instant::now() + self.cycle_deadline;
        let mut report = CycleReport::default();

        let pending = match tokio::time::timeout_at(deadline, self.orders.get_pending()).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to load pending orders");
                return report;
            }
            Err(_) => {
                tracing::warn!("Loading pending orders hit the cycle deadline");
                return report;
            }
        };
        report.pending = pending.len();

        for (done, order) in pending.into_iter().enumerate() {
            if Instant::now() >= deadline {
                report.deferred = report.pending - done;
                tracing::warn!(
                    deferred = report.deferred,
                    "Cycle deadline reached, remaining orders wait for the next cycle"
                );
                break;
            }

            let number = order.number.clone();
            match self.reconcile(order).await {
                Ok(Outcome::Updated { credited }) => {
                    report.updated += 1;
                    if credited {
                        report.credited += 1;
                    }
                }
                Ok(Outcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(order = %number, error = %e, "Order reconciliation failed");
                }
            }
        }

        report
    }

    async fn reconcile(&self, mut order: Order) -> Result<Outcome, Error> {
        let before = order.status;

        // Persisted right away so a crash mid-cycle does not see it as brand new.
        if order.status == OrderStatus::New {
            order.advance(OrderStatus::Processing)?;
            self.orders.update(&order).await?;
        }

        let reply = self.accrual.fetch(&order.number).await?;

        let Some(status) = reply.known_status() else {
            tracing::warn!(
                order = %order.number,
                status = %reply.status,
                "Unknown accrual status, skipping order"
            );
            if order.status != before {
                order.advance(before)?;
                self.orders.update(&order).await?;
            }
            return Ok(Outcome::Skipped);
        };

        order.advance(status.order_status())?;
        tracing::debug!(order = %order.number, status = %order.status, "Accrual status received");

        let mut credited = false;
        if order.status == OrderStatus::Processed {
            if let Some(accrual) = reply.accrual.filter(Points::is_positive) {
                // Credit first: if it fails the order stays pending and is
                // credited on a later cycle instead of being lost.
                self.ledger.credit(order.owner, accrual).await?;
                order.accrual = Some(accrual);
                credited = true;
            }
        }

        if let Err(e) = self.orders.update(&order).await {
            if credited {
                tracing::error!(
                    order = %order.number,
                    owner = order.owner,
                    error = %e,
                    "Order update failed after its accrual was credited"
                );
            }
            return Err(e);
        }

        if credited {
            tracing::info!(%order, "Accrual credited");
        }
        Ok(Outcome::Updated { credited })
    }
}
