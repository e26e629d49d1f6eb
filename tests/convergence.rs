use dep_sizer::config::ConvergenceConfig;
use dep_sizer::sizing::cascade::{ConvergenceMonitor, DivergenceReason, Verdict};

fn monitor(window: usize) -> ConvergenceMonitor {
    let settings = ConvergenceConfig {
        oscillation_window: window,
        ..ConvergenceConfig::default()
    };
    ConvergenceMonitor::new(&settings, 1_000.0)
}

#[test]
fn small_step_converges() {
    let mut m = monitor(6);
    assert_eq!(m.observe(1, 1_000.0, 1_000.5), Verdict::Converged);
}

#[test]
fn step_at_epsilon_keeps_iterating() {
    let mut m = monitor(6);
    assert_eq!(m.observe(1, 1_000.0, 1_001.0), Verdict::Continue);
}

#[test]
fn growth_past_ceiling_is_runaway() {
    let mut m = monitor(6);
    assert_eq!(
        m.observe(1, 1_000.0, 20_000.0),
        Verdict::Diverged(DivergenceReason::Runaway { ceiling_lb: 10_000.0 })
    );
}

#[test]
fn non_finite_weight_is_non_physical() {
    let mut m = monitor(6);
    assert!(matches!(
        m.observe(1, 1_000.0, f64::NAN),
        Verdict::Diverged(DivergenceReason::NonPhysical { .. })
    ));
    let mut m = monitor(6);
    assert!(matches!(
        m.observe(1, 1_000.0, -5.0),
        Verdict::Diverged(DivergenceReason::NonPhysical { .. })
    ));
}

#[test]
fn undamped_flip_flop_is_oscillation() {
    let mut m = monitor(4);
    let mut previous = 1_000.0;
    let mut verdict = Verdict::Continue;
    let mut stopped_at = 0;
    for iteration in 1..=10 {
        let next = if iteration % 2 == 1 { 1_200.0 } else { 1_000.0 };
        verdict = m.observe(iteration, previous, next);
        stopped_at = iteration;
        if verdict != Verdict::Continue {
            break;
        }
        previous = next;
    }
    assert_eq!(
        verdict,
        Verdict::Diverged(DivergenceReason::Oscillation { window: 4 })
    );
    assert_eq!(stopped_at, 5, "needs window + 1 steps to see window reversals");
}

#[test]
fn damped_oscillation_keeps_iterating() {
    let mut m = monitor(4);
    let mut previous = 1_000.0;
    let mut amplitude = 200.0;
    for iteration in 1..=8 {
        let next = previous + amplitude;
        assert_eq!(m.observe(iteration, previous, next), Verdict::Continue);
        previous = next;
        amplitude *= -0.5;
    }
}

#[test]
fn zero_window_disables_oscillation_check() {
    let mut m = monitor(0);
    let mut previous = 1_000.0;
    for iteration in 1..=20 {
        let next = if iteration % 2 == 1 { 1_200.0 } else { 1_000.0 };
        assert_eq!(m.observe(iteration, previous, next), Verdict::Continue);
        previous = next;
    }
}

#[test]
fn history_keeps_only_the_latest_iterates() {
    let mut m = monitor(6);
    for iteration in 1..=8 {
        let previous = 1_000.0 + 100.0 * iteration as f64;
        m.observe(iteration, previous, previous + 100.0);
    }
    let history = m.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history.first().map(|it| it.iteration), Some(4));
    assert_eq!(history.last().map(|it| it.iteration), Some(8));
    let last = history[4];
    assert_eq!(last.gross_weight_in_lb, 1_800.0);
    assert_eq!(last.gross_weight_out_lb, 1_900.0);
}
