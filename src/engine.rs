use std::collections::BTreeSet;
use std::io::Write;

use futures::StreamExt;

use crate::admission::OrderAdmission;
use crate::domain::{
    Command, Error, OwnerId, Points,
    traits::{CommandStream, DeadLetterQueue},
};
use crate::ledger::BalanceLedger;
use crate::poller::ReconciliationPoller;
use crate::report::OwnerReport;

/// Feeds a stream of commands through the core. A failing command goes to
/// the dead letter queue and the run carries on.
pub struct Engine<I, D>
where
    I: CommandStream,
    D: DeadLetterQueue,
{
    ingestion: I,
    dlq: D,
    admission: OrderAdmission,
    ledger: BalanceLedger,
    poller: ReconciliationPoller,
    owners: BTreeSet<OwnerId>,
}

impl<I, D> Engine<I, D>
where
    I: CommandStream,
    D: DeadLetterQueue,
{
    pub fn new(
        ingestion: I,
        dlq: D,
        admission: OrderAdmission,
        ledger: BalanceLedger,
        poller: ReconciliationPoller,
    ) -> Self {
        Self {
            ingestion,
            dlq,
            admission,
            ledger,
            poller,
            owners: BTreeSet::new(),
        }
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(cmd) = res.next().await {
            match cmd {
                Ok(cmd) => {
                    if let Err(e) = self.apply_command(&cmd).await {
                        self.dlq.report(Some(&cmd), &e);
                    }
                }
                Err(e) => self.dlq.report(None, &e),
            }
        }

        Ok(())
    }

    async fn apply_command(&mut self, cmd: &Command) -> Result<(), Error> {
        if let Some(owner) = cmd.owner() {
            self.owners.insert(owner);
        }

        match cmd {
            Command::Submit { owner, order } => self.submit(*owner, order).await,
            Command::Withdraw {
                owner,
                order,
                amount,
            } => self.withdraw(*owner, order, *amount).await,
            Command::Reconcile => {
                let report = self.poller.run_cycle().await;
                tracing::info!(
                    pending = report.pending,
                    credited = report.credited,
                    failed = report.failed,
                    "Reconcile command finished"
                );
                Ok(())
            }
        }
    }

    async fn submit(&self, owner: OwnerId, order: &str) -> Result<(), Error> {
        let already_loaded = self.admission.submit(owner, order).await?;
        if already_loaded {
            tracing::info!(owner, order, "Order already loaded by this owner");
        }
        Ok(())
    }

    async fn withdraw(&self, owner: OwnerId, order: &str, amount: Points) -> Result<(), Error> {
        self.ledger.withdraw(owner, order, amount).await.map(|_| ())
    }

    /// Writes one JSON line per owner seen, in ascending owner order.
    pub async fn flush<W: Write>(&self, mut out: W) -> Result<(), Error> {
        for owner in &self.owners {
            let report = OwnerReport::collect(*owner, &self.admission, &self.ledger).await?;
            let line = serde_json::to_string(&report).map_err(std::io::Error::from)?;
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}
