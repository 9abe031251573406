use colored::Colorize;

use crate::booster::{Snapshot, StepRule};
use crate::common::LossFunction;
use super::metrics::StepMetrics;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;

const DEFAULT_ROUND: usize = 1;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 3;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Step,Accuracy,Precision,Recall,F1,Loss,Time\n";


/// The sequence and metrics produced by [`Logger::run`].
#[derive(Debug, Clone)]
pub struct Report<P> {
    /// Every snapshot of the run.
    pub sequence: Vec<Snapshot<P>>,
    /// The metrics of every snapshot.
    pub metrics: Vec<StepMetrics>,
}


/// Struct `Logger` runs a step rule and
/// logs the metrics and running time of every step,
/// both to a CSV file and to the terminal.
///
/// # Example
/// ```no_run
/// use boostsim::prelude::*;
///
/// let dataset = Scenario::Subscription.generate(&mut rand::thread_rng());
/// let booster = AdaBoost::init(&dataset);
/// let report = Logger::new(booster)
///     .print_every(1)
///     .run("adaboost.csv")
///     .unwrap();
/// println!("final accuracy: {}", report.metrics[4].accuracy);
/// ```
pub struct Logger<R> {
    rule: R,
    round: usize,
}


impl<R> Logger<R> {
    /// Create a new instance of `Logger`.
    pub fn new(rule: R) -> Self {
        Self { rule, round: DEFAULT_ROUND }
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints every step.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }


    /// Returns the wrapped rule.
    pub fn into_inner(self) -> R {
        self.rule
    }
}


impl<R> Logger<R>
    where R: StepRule,
          R::Point: Sync,
{
    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "STEP".bold().red(),
            "ACC.".bold().blue(),
            "F1".bold().green(),
            "LOSS".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Simulation".bold(),
            self.rule.name().bold().green(),
        );

        if let Some(info) = self.rule.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Loss".bold(),
            self.rule.loss().name().bold().green(),
            "Steps".bold(),
            format!("{}", self.rule.max_steps()).bold().green(),
            "".bold(),
        );
    }


    fn print_row(&self, tag: &str, metrics: &StepMetrics, micros: u128) {
        let loss = metrics.loss
            .primary()
            .map_or_else(|| "-".to_string(), |v| format!("{v:.PREC_WIDTH$}"));
        println!(
            "{} {}\t{}\t{}\t{}\t{}",
            tag,
            format!("{:>WIDTH$}", metrics.step).red(),
            format!("{:>WIDTH$.1}", metrics.accuracy).blue(),
            format!("{:>WIDTH$.1}", metrics.f1).green(),
            format!("{:>WIDTH$}", loss).yellow(),
            time_format(micros).bold().cyan(),
        );
    }


    /// Run the given step rule with logging.
    /// Note that this method is almost the same as `StepRule::run`.
    /// This method measures running time per step.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P)
        -> std::io::Result<Report<R::Point>>
    {
        // Open file
        let mut file = File::create(filename)?;

        // Write header to the file
        file.write_all(HEADER.as_bytes())?;

        let loss = self.rule.loss();
        let n_steps = self.rule.max_steps();
        let verbose = self.round != usize::MAX;
        if verbose {
            self.print_stats();
            self.print_log_header();
        }

        let mut sequence: Vec<Snapshot<R::Point>> = Vec::with_capacity(n_steps);
        let mut metrics = Vec::with_capacity(n_steps);

        // Cumulative time
        let mut time_acc = 0;
        for step in 0..n_steps {
            // Start measuring time
            let now = Instant::now();

            let points = match sequence.last() {
                None => self.rule.initial(),
                Some(prev) => self.rule.advance(prev, step),
            };

            // Stop measuring and convert `Duration` to microseconds.
            time_acc += now.elapsed().as_micros();

            if points.is_empty() {
                tracing::warn!(rule = self.rule.name(), "empty dataset, nothing to log");
                break;
            }

            let snapshot = Snapshot::new(step, points);
            let m = StepMetrics::from_snapshot(&snapshot, &loss);

            // Write the results to `file`.
            let line = format!(
                "{},{},{},{},{},{},{time_acc}\n",
                m.step,
                m.accuracy,
                m.precision,
                m.recall,
                m.f1,
                m.loss.primary().unwrap_or(0.0),
            );
            file.write_all(line.as_bytes())?;

            let last = step + 1 == n_steps;
            if verbose && last {
                self.print_row(&"[FIN]".bold().bright_green().to_string(), &m, time_acc);
            } else if verbose && step % self.round == 0 {
                self.print_row(&"[LOG]".bold().magenta().to_string(), &m, time_acc);
            }

            sequence.push(snapshot);
            metrics.push(m);
        }

        Ok(Report { sequence, metrics })
    }
}


fn time_format(micros: u128) -> String {
    if micros < 1_000 {
        return format!("{:>5}us", micros);
    }
    let millis = micros / 1_000;
    if millis < 1_000 {
        return format!("{:>5}ms", millis);
    }
    format!("{:>3}.{:0>3}s", millis / 1_000, millis % 1_000)
}
