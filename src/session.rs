//! Per-page state: one dataset, one algorithm, the derived
//! sequence and metrics, and the playback state machine.

use serde::Serialize;

use std::time::Duration;

use crate::algorithm::Algorithm;
use crate::booster::{
    AdaBoost,
    GradientBoost,
    XGBoost,
    Snapshot,
    StepRule,
    WeightedPoint,
    ResidualPoint,
    MarginPoint,
};
use crate::config::Settings;
use crate::constants::DEFAULT_LEARNING_RATE;
use crate::playback::{Intent, Playback};
use crate::research::{
    evaluate,
    tree_contribution,
    ResidualHistogram,
    StepMetrics,
};
use crate::sample::Dataset;


/// The sequence of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm", content = "snapshots", rename_all = "lowercase")]
pub enum Trace {
    /// Sequence of the AdaBoost page.
    AdaBoost(Vec<Snapshot<WeightedPoint>>),
    /// Sequence of the Gradient Boosting page.
    GradientBoost(Vec<Snapshot<ResidualPoint>>),
    /// Sequence of the XGBoost page.
    XGBoost(Vec<Snapshot<MarginPoint>>),
}


impl Trace {
    /// Returns the number of snapshots.
    pub fn len(&self) -> usize {
        match self {
            Self::AdaBoost(seq) => seq.len(),
            Self::GradientBoost(seq) => seq.len(),
            Self::XGBoost(seq) => seq.len(),
        }
    }


    /// Returns `true` if there is no snapshot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// The snapshot shown by a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrameSnapshot<'a> {
    /// An AdaBoost snapshot.
    AdaBoost(&'a Snapshot<WeightedPoint>),
    /// A Gradient Boosting snapshot.
    GradientBoost(&'a Snapshot<ResidualPoint>),
    /// An XGBoost snapshot.
    XGBoost(&'a Snapshot<MarginPoint>),
}


/// Everything the presentation layer needs to draw the current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<'a> {
    /// The simulated algorithm.
    pub algorithm: Algorithm,
    /// The current step.
    pub step: usize,
    /// The number of steps.
    pub n_steps: usize,
    /// Whether the playback is running.
    pub playing: bool,
    /// The current snapshot, `None` for an empty dataset.
    pub snapshot: Option<FrameSnapshot<'a>>,
    /// The metrics of the current snapshot.
    pub metrics: Option<&'a StepMetrics>,
    /// Residual histogram (Gradient Boosting only).
    pub histogram: Option<ResidualHistogram>,
    /// Simulated tree contribution (Gradient Boosting only).
    pub tree_contribution: Option<f64>,
}


/// The state of one algorithm page.
///
/// # Example
/// ```no_run
/// use boostsim::prelude::*;
///
/// let algorithm = Algorithm::GradientBoost;
/// let dataset = algorithm.scenario().generate(&mut rand::thread_rng());
/// let mut session = Session::new(algorithm, dataset);
///
/// session.set_learning_rate(0.5);
/// session.apply(Intent::Next);
/// let frame = session.frame();
/// println!("{}", serde_json::to_string(&frame).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    algorithm: Algorithm,
    dataset: Dataset,
    learning_rate: f64,
    interval: Duration,

    // Drawn once per dataset so that hyperparameter changes
    // never redraw the random parts of snapshot `0`.
    seed: u64,
    // `true` if the seed came from the caller.
    pinned: bool,

    trace: Trace,
    metrics: Vec<StepMetrics>,
    playback: Playback,
}


impl Session {
    /// Build the sequence and metrics of `algorithm` over `dataset`.
    pub fn new(algorithm: Algorithm, dataset: Dataset) -> Self {
        let playback = Playback::new(0)
            .end_behavior(algorithm.end_behavior());
        let mut session = Self {
            algorithm,
            dataset,
            learning_rate: DEFAULT_LEARNING_RATE,
            interval: algorithm.interval(),
            seed: rand::random(),
            pinned: false,
            trace: Trace::AdaBoost(Vec::new()),
            metrics: Vec::new(),
            playback,
        };
        session.recompute();
        session
    }


    /// Build a session with the initial values of `settings`.
    pub fn with_settings(
        algorithm: Algorithm,
        dataset: Dataset,
        settings: &Settings,
    ) -> Self
    {
        let playback = Playback::new(0)
            .end_behavior(settings.end_behavior(algorithm));
        let mut session = Self {
            algorithm,
            dataset,
            learning_rate: settings.learning_rate(algorithm)
                .unwrap_or(DEFAULT_LEARNING_RATE),
            interval: settings.interval(algorithm),
            seed: settings.seed.unwrap_or_else(rand::random),
            pinned: settings.seed.is_some(),
            trace: Trace::AdaBoost(Vec::new()),
            metrics: Vec::new(),
            playback,
        };
        session.recompute();
        session
    }


    /// Fix the seed of the random parts and rebuild the sequence.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.pinned = true;
        self.recompute();
        self
    }


    /// The simulated algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }


    /// The dataset of this page.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }


    /// The current learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }


    /// The playback interval of this page.
    pub fn interval(&self) -> Duration {
        self.interval
    }


    /// The sequence of this page.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }


    /// The metrics of every snapshot.
    pub fn metrics(&self) -> &[StepMetrics] {
        &self.metrics[..]
    }


    /// The metrics of the current snapshot.
    pub fn current_metrics(&self) -> Option<&StepMetrics> {
        self.metrics.get(self.playback.step())
    }


    /// The playback state.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }


    /// The current step.
    pub fn step(&self) -> usize {
        self.playback.step()
    }


    /// Set the learning rate and rebuild the sequence.
    /// The value is clamped to the page's slider;
    /// pages without a learning rate ignore it.
    /// Returns the learning rate in effect.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> f64 {
        if let Some(slider) = self.algorithm.learning_rate_slider() {
            self.learning_rate = slider.clamp(learning_rate);
            self.recompute();
        }
        self.learning_rate
    }


    /// Replace the dataset, rebuild the sequence,
    /// and go back to step `0`.
    /// A new seed is drawn unless one was fixed with [`Session::seed`].
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        if !self.pinned {
            self.seed = rand::random();
        }
        self.playback.apply(Intent::Reset);
        self.recompute();
    }


    /// Apply a user or timer intent. Returns the new step.
    pub fn apply(&mut self, intent: Intent) -> usize {
        self.playback.apply(intent)
    }


    /// The residual histogram of every snapshot
    /// (Gradient Boosting only, empty otherwise).
    pub fn residual_histograms(&self) -> Vec<ResidualHistogram> {
        match &self.trace {
            Trace::GradientBoost(seq) => seq.iter()
                .map(ResidualHistogram::from_snapshot)
                .collect(),
            _ => Vec::new(),
        }
    }


    /// The simulated tree contribution of every snapshot
    /// (Gradient Boosting only, empty otherwise).
    pub fn tree_contributions(&self) -> Vec<f64> {
        match &self.trace {
            Trace::GradientBoost(seq) => seq.iter()
                .map(|s| tree_contribution(s, self.learning_rate))
                .collect(),
            _ => Vec::new(),
        }
    }


    /// The view of the current step.
    pub fn frame(&self) -> Frame<'_> {
        let step = self.playback.step();

        let snapshot = match &self.trace {
            Trace::AdaBoost(seq) => seq.get(step)
                .map(FrameSnapshot::AdaBoost),
            Trace::GradientBoost(seq) => seq.get(step)
                .map(FrameSnapshot::GradientBoost),
            Trace::XGBoost(seq) => seq.get(step)
                .map(FrameSnapshot::XGBoost),
        };

        let (histogram, contribution) = match snapshot {
            Some(FrameSnapshot::GradientBoost(s)) => (
                Some(ResidualHistogram::from_snapshot(s)),
                Some(tree_contribution(s, self.learning_rate)),
            ),
            _ => (None, None),
        };

        Frame {
            algorithm: self.algorithm,
            step,
            n_steps: self.playback.n_steps(),
            playing: self.playback.is_playing(),
            snapshot,
            metrics: self.metrics.get(step),
            histogram,
            tree_contribution: contribution,
        }
    }


    fn recompute(&mut self) {
        let (trace, metrics) = match self.algorithm {
            Algorithm::AdaBoost => {
                let mut rule = AdaBoost::init(&self.dataset);
                let seq = rule.run();
                let metrics = evaluate(&seq, &rule.loss());
                (Trace::AdaBoost(seq), metrics)
            },
            Algorithm::GradientBoost => {
                let mut rule = GradientBoost::init(&self.dataset)
                    .learning_rate(self.learning_rate)
                    .seed(self.seed);
                let seq = rule.run();
                let metrics = evaluate(&seq, &rule.loss());
                (Trace::GradientBoost(seq), metrics)
            },
            Algorithm::XGBoost => {
                let mut rule = XGBoost::init(&self.dataset)
                    .learning_rate(self.learning_rate);
                let seq = rule.run();
                let metrics = evaluate(&seq, &rule.loss());
                (Trace::XGBoost(seq), metrics)
            },
        };

        tracing::debug!(
            algorithm = self.algorithm.key(),
            learning_rate = self.learning_rate,
            n_steps = trace.len(),
            "sequence recomputed"
        );

        self.trace = trace;
        self.metrics = metrics;
        self.playback.resize(self.trace.len());
    }
}
