use crate::data::training_set::TrainingSet;
use crate::error::Error;
use log::info;
use serde::{Deserialize, Serialize};

/// Settings passed on to a trainer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainCfg {
    /// maximal number of epochs
    pub epochs: usize,
    /// report interval in epochs, 0 disables reports
    pub show: usize,
}

impl Default for TrainCfg {
    fn default() -> Self {
        Self {
            epochs: 150,
            show: 10,
        }
    }
}

impl TrainCfg {
    pub fn new(epochs: usize, show: usize) -> Self {
        Self { epochs, show }
    }
}

/// Training error per epoch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorTrace {
    show: usize,
    errors: Vec<f64>,
}

impl ErrorTrace {
    pub fn new(show: usize) -> Self {
        Self {
            show,
            errors: Vec::new(),
        }
    }

    pub fn record(&mut self, error: f64) {
        self.errors.push(error);
        if self.show > 0 && self.errors.len() % self.show == 0 {
            info!("Epoch: {}; Error: {};", self.errors.len(), error);
        }
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn num_epochs(&self) -> usize {
        self.errors.len()
    }

    pub fn last(&self) -> Option<f64> {
        self.errors.last().copied()
    }
}

pub struct Trained<M> {
    pub model: M,
    pub trace: ErrorTrace,
}

/// Fits a model to a training set.
/// Network layout and optimizer are up to the implementation.
pub trait Trainer {
    type Model;

    fn train(&mut self, set: &TrainingSet, cfg: &TrainCfg) -> Result<Trained<Self::Model>, Error>;
}

/// Hands the training set to a trainer and logs the outcome.
pub fn hand_off<T: Trainer>(
    trainer: &mut T,
    set: &TrainingSet,
    cfg: &TrainCfg,
) -> Result<Trained<T::Model>, Error> {
    info!(
        "Training on {} samples x {} SNPs for up to {} epochs",
        set.num_samples(),
        set.num_snps(),
        cfg.epochs
    );
    let trained = trainer.train(set, cfg)?;
    info!(
        "Training stopped after {} epochs, final error: {:?}",
        trained.trace.num_epochs(),
        trained.trace.last()
    );
    Ok(trained)
}
