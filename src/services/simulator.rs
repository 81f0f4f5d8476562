use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;
use tracing::info;

use crate::config::SimulationConfig;
use crate::simulation::Simulation;
use crate::strategy::{SharedStrategy, strategy_for};
use crate::types::request::Request;

/// Validates a batch and hands back a simulation ready to run.
#[derive(Debug, Clone)]
pub struct SimulatorService {
    config: SimulationConfig,
    strategy: SharedStrategy,
}

impl SimulatorService {
    pub fn new(config: SimulationConfig) -> Self {
        let strategy = strategy_for(config.strategy);
        Self::with_strategy(config, strategy)
    }

    pub fn with_strategy(config: SimulationConfig, strategy: SharedStrategy) -> Self {
        SimulatorService { config, strategy }
    }
}

impl Service<Vec<Request>> for SimulatorService {
    type Response = Simulation;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Simulation, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, requests: Vec<Request>) -> Self::Future {
        let config = self.config.clone();
        let strategy = self.strategy.clone();

        Box::pin(async move {
            let simulation = Simulation::new(&config, &requests, strategy)?;
            info!(
                requests = requests.len(),
                floors = simulation.context().queues().pending_floors(),
                start_floor = config.start_floor,
                "batch accepted"
            );
            Ok(simulation)
        })
    }
}
