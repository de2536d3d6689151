use std::sync::Arc;

use anyhow::Context;
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::models::*;
use crate::planner::{self, ErrorSet};

/// PlanPool runs independent rack plans on blocking worker threads
#[derive(Clone)]
pub struct PlanPool {
    permits: Arc<Semaphore>,
    workers: usize,
}

impl PlanPool {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Plan one request on a worker once a permit is free.
    ///
    /// The outer error is a worker failure (closed pool, panicked task), the
    /// inner one a rejected plan.
    pub async fn run(&self, request: PlanRequest) -> anyhow::Result<Result<PlanOutcome, ErrorSet>> {
        let topology_id = request.topology_id.clone();
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .with_context(|| format!("plan pool closed while waiting for {}", topology_id))?;

        let outcome = tokio::task::spawn_blocking(move || {
            let outcome = planner::plan_request(&request);
            drop(permit);
            outcome
        })
        .await
        .map_err(|e| {
            tracing::error!("Plan worker failed for {}: {}", topology_id, e);
            anyhow::anyhow!("plan worker failed for {}: {}", topology_id, e)
        })?;
        Ok(outcome)
    }

    /// Plan every request; results come back in input order
    pub async fn run_batch(&self, requests: Vec<PlanRequest>) -> anyhow::Result<Vec<BatchPlanResult>> {
        tracing::info!(
            "Planning batch of {} racks on {} workers",
            requests.len(),
            self.workers
        );
        join_all(requests.into_iter().map(|request| async move {
            let topology_id = request.topology_id.clone();
            Ok(match self.run(request).await? {
                Ok(outcome) => BatchPlanResult::Planned(PlanResponse::new(topology_id, outcome)),
                Err(errors) => BatchPlanResult::Rejected {
                    topology_id,
                    errors: errors.entries(),
                },
            })
        }))
        .await
        .into_iter()
        .collect()
    }
}
