//! Simulator: owns one cache model and the address sequence it replays.
//!
//! The model itself never iterates; this harness feeds it one address per
//! [`Simulator::step`], which supports single-step playback as well as
//! whole-sequence runs. The first invalid address halts the simulation.

use crate::cache::{AccessOutcome, CacheModel};
use crate::common::{InvalidAddress, SimError};
use crate::config::CacheConfig;
use crate::sim::sequence::parse_address_sequence;
use crate::stats::SimReport;

/// Replay harness for one simulation run.
#[derive(Debug)]
pub struct Simulator {
    model: CacheModel,
    addresses: Vec<u64>,
    cursor: usize,
    fault: Option<InvalidAddress>,
}

impl Simulator {
    /// Creates a simulator replaying `addresses` against `model`.
    pub const fn new(model: CacheModel, addresses: Vec<u64>) -> Self {
        Self {
            model,
            addresses,
            cursor: 0,
            fault: None,
        }
    }

    /// Builds the model from `config` and parses a comma-separated hex sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid configuration and
    /// [`SimError::Parse`] for a malformed or empty sequence.
    pub fn from_config(config: &CacheConfig, sequence: &str) -> Result<Self, SimError> {
        let model = CacheModel::from_config(config)?;
        let addresses = parse_address_sequence(sequence)?;
        Ok(Self::new(model, addresses))
    }

    /// Accesses the next pending address.
    ///
    /// Returns `None` once the sequence is exhausted or after a fault.
    pub fn step(&mut self) -> Option<Result<AccessOutcome, InvalidAddress>> {
        if self.fault.is_some() {
            return None;
        }
        let address = *self.addresses.get(self.cursor)?;
        self.cursor += 1;

        let result = self.model.access(address);
        if let Err(fault) = result {
            tracing::warn!(%fault, position = self.cursor - 1, "simulation halted");
            self.fault = Some(fault);
        }
        Some(result)
    }

    /// Runs every remaining access.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidAddress`]; later addresses are not accessed.
    pub fn run(&mut self) -> Result<(), InvalidAddress> {
        while let Some(result) = self.step() {
            let _outcome = result?;
        }
        self.fault.map_or(Ok(()), Err)
    }

    /// Whether no further steps will run.
    pub fn is_finished(&self) -> bool {
        self.fault.is_some() || self.cursor >= self.addresses.len()
    }

    /// Address the next step will access, if any.
    pub fn peek(&self) -> Option<u64> {
        if self.fault.is_some() {
            return None;
        }
        self.addresses.get(self.cursor).copied()
    }

    /// Number of addresses not yet accessed.
    pub fn remaining(&self) -> usize {
        self.addresses.len().saturating_sub(self.cursor)
    }

    /// The fault that halted the run, if any.
    pub const fn fault(&self) -> Option<&InvalidAddress> {
        self.fault.as_ref()
    }

    /// The full address sequence.
    pub fn addresses(&self) -> &[u64] {
        &self.addresses
    }

    /// The model being driven.
    pub const fn model(&self) -> &CacheModel {
        &self.model
    }

    /// Consumes the simulator, returning the model.
    pub fn into_model(self) -> CacheModel {
        self.model
    }

    /// End-of-run report for the accesses made so far.
    pub fn report(&self) -> SimReport {
        self.model.report()
    }
}
