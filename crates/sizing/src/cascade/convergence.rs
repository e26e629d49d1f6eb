//! Convergence, runaway and oscillation detection for the gross-weight iteration.

use std::collections::VecDeque;
use std::fmt;

use dep_config::ConvergenceConfig;

use crate::state::Iterate;

/// Why the loop gave up on a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DivergenceReason {
    /// Gross weight grew past the sanity ceiling.
    Runaway { ceiling_lb: f64 },
    /// Gross weight kept flipping direction without damping out.
    Oscillation { window: usize },
    /// Gross weight became non-finite or non-positive.
    NonPhysical { gross_weight_lb: f64 },
}

impl fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceReason::Runaway { ceiling_lb } => {
                write!(f, "gross weight exceeded ceiling of {ceiling_lb:.0} lb")
            }
            DivergenceReason::Oscillation { window } => {
                write!(f, "undamped oscillation over {window} iterations")
            }
            DivergenceReason::NonPhysical { gross_weight_lb } => {
                write!(f, "non-physical gross weight {gross_weight_lb}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Continue,
    Converged,
    Diverged(DivergenceReason),
}

/// Tracks successive gross-weight estimates and classifies the iteration.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor {
    epsilon: f64,
    ceiling_lb: f64,
    window: usize,
    damping_tolerance: f64,
    history_len: usize,
    history: VecDeque<Iterate>,
    steps: VecDeque<f64>,
}

impl ConvergenceMonitor {
    pub fn new(settings: &ConvergenceConfig, seed_gross_weight_lb: f64) -> Self {
        Self {
            epsilon: settings.epsilon,
            ceiling_lb: seed_gross_weight_lb * settings.divergence_ceiling,
            window: settings.oscillation_window,
            damping_tolerance: settings.oscillation_damping_tolerance,
            history_len: settings.history_len.max(1),
            history: VecDeque::new(),
            steps: VecDeque::new(),
        }
    }

    /// Record the step `previous → next` and decide what the loop does next.
    pub fn observe(&mut self, iteration: usize, previous_lb: f64, next_lb: f64) -> Verdict {
        let step = next_lb - previous_lb;
        let relative_change = step.abs() / previous_lb;

        if self.history.len() == self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(Iterate {
            iteration,
            gross_weight_in_lb: previous_lb,
            gross_weight_out_lb: next_lb,
            relative_change,
        });

        if !next_lb.is_finite() || next_lb <= 0.0 {
            return Verdict::Diverged(DivergenceReason::NonPhysical {
                gross_weight_lb: next_lb,
            });
        }
        if next_lb > self.ceiling_lb {
            return Verdict::Diverged(DivergenceReason::Runaway {
                ceiling_lb: self.ceiling_lb,
            });
        }
        if relative_change < self.epsilon {
            return Verdict::Converged;
        }

        self.steps.push_back(step);
        if self.steps.len() > self.window + 1 {
            self.steps.pop_front();
        }
        if self.is_oscillating() {
            return Verdict::Diverged(DivergenceReason::Oscillation {
                window: self.window,
            });
        }

        Verdict::Continue
    }

    /// The last `window` steps all reversed direction and none shrank by more than the tolerance.
    fn is_oscillating(&self) -> bool {
        if self.window == 0 || self.steps.len() < self.window + 1 {
            return false;
        }
        self.steps
            .iter()
            .zip(self.steps.iter().skip(1))
            .all(|(&earlier, &later)| {
                earlier * later < 0.0
                    && later.abs() >= (1.0 - self.damping_tolerance) * earlier.abs()
            })
    }

    pub fn history(&self) -> Vec<Iterate> {
        self.history.iter().copied().collect()
    }
}
