// Generation Progress Simulation
// Time-boxed "build step" pacing shown while the real generation call runs
//
// The simulation is purely cosmetic and advances on its own clock,
// independent of real generator progress. When the real call resolves
// first, every remaining step is marked complete at once; the displayed
// percentage never moves backward within one generation cycle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Percentage shown while all simulated steps have elapsed but the real
/// call has not resolved yet
const HOLDING_PERCENT: u8 = 95;

/// One simulated pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationStep {
    /// File the stage pretends to be working on
    pub file: String,
    /// Human-readable stage description
    pub description: String,
    /// How long the stage stays current
    pub duration: Duration,
}

impl GenerationStep {
    pub fn new(file: &str, description: &str, duration: Duration) -> Self {
        Self {
            file: file.to_string(),
            description: description.to_string(),
            duration,
        }
    }
}

/// The built-in three-stage pipeline
pub fn default_generation_steps() -> Vec<GenerationStep> {
    vec![
        GenerationStep::new(
            "index.html",
            "Creating HTML structure",
            Duration::from_millis(800),
        ),
        GenerationStep::new(
            "styles.css",
            "Designing visual styles",
            Duration::from_millis(1000),
        ),
        GenerationStep::new(
            "script.js",
            "Adding interactivity",
            Duration::from_millis(800),
        ),
    ]
}

/// Point-in-time view of the simulation, published to observers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Index of the step currently in progress; equals the step count once
    /// every step has elapsed
    pub current_index: usize,
    /// Stage label, or the finalizing notice once all steps elapsed
    pub label: String,
    /// Non-decreasing completion percentage
    pub percent: u8,
    /// True once the real generation call resolved
    pub finished: bool,
}

impl ProgressSnapshot {
    fn idle() -> Self {
        Self {
            current_index: 0,
            label: String::new(),
            percent: 0,
            finished: false,
        }
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// Clock-free simulation core, advanced by cumulative elapsed time.
///
/// Kept separate from the timer task so pacing rules are testable without
/// waiting on real time.
#[derive(Debug)]
pub struct ProgressTimeline {
    steps: Vec<GenerationStep>,
    current: usize,
    finished: bool,
    peak_percent: u8,
}

impl ProgressTimeline {
    pub fn new(steps: Vec<GenerationStep>) -> Self {
        Self {
            steps,
            current: 0,
            finished: false,
            peak_percent: 0,
        }
    }

    /// Advance to the position implied by `elapsed` since the start of the
    /// cycle. Ticks are ordered; a smaller elapsed value never moves the
    /// position backward.
    pub fn advance_to(&mut self, elapsed: Duration) -> usize {
        let mut cumulative = Duration::ZERO;
        let mut position = 0;
        for step in &self.steps {
            cumulative += step.duration;
            if elapsed < cumulative {
                break;
            }
            position += 1;
        }
        self.current = self.current.max(position);
        self.current
    }

    /// Mark every step complete; called when the real call resolves
    pub fn finish(&mut self) {
        self.current = self.steps.len();
        self.finished = true;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_step_complete(&self, index: usize) -> bool {
        self.finished || index < self.current
    }

    /// Completion percentage: step ratio while running, held at 95 once all
    /// steps elapsed, 100 only after the real call resolves. Monotonic
    /// within the cycle.
    pub fn percent(&mut self) -> u8 {
        let raw = if self.finished {
            100
        } else if self.steps.is_empty() || self.current >= self.steps.len() {
            HOLDING_PERCENT
        } else {
            ((self.current * 100) / self.steps.len()) as u8
        };
        self.peak_percent = self.peak_percent.max(raw);
        self.peak_percent
    }

    fn snapshot(&mut self) -> ProgressSnapshot {
        let label = if self.current < self.steps.len() {
            self.steps[self.current].description.clone()
        } else {
            "Finalizing generation...".to_string()
        };
        ProgressSnapshot {
            current_index: self.current,
            label,
            percent: self.percent(),
            finished: self.finished,
        }
    }
}

/// Timer-driven wrapper around [`ProgressTimeline`].
///
/// Owns a tokio task that sleeps through each step duration and publishes
/// snapshots over a watch channel. The task is aborted on finish, cancel,
/// and drop, so no timer outlives its generation cycle.
pub struct ProgressSimulator {
    timeline: Arc<Mutex<ProgressTimeline>>,
    tx: Arc<watch::Sender<ProgressSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl ProgressSimulator {
    /// Start a new simulation cycle, resetting observers to zero
    pub fn start(steps: Vec<GenerationStep>, tx: Arc<watch::Sender<ProgressSnapshot>>) -> Self {
        let timeline = Arc::new(Mutex::new(ProgressTimeline::new(steps.clone())));
        let _ = tx.send(ProgressSnapshot::idle());

        let task_timeline = Arc::clone(&timeline);
        let task_tx = Arc::clone(&tx);
        let task = tokio::spawn(async move {
            let mut elapsed = Duration::ZERO;
            for step in &steps {
                tokio::time::sleep(step.duration).await;
                elapsed += step.duration;
                let snapshot = {
                    let mut timeline = task_timeline.lock().expect("timeline lock");
                    timeline.advance_to(elapsed);
                    timeline.snapshot()
                };
                let _ = task_tx.send(snapshot);
            }
        });

        Self {
            timeline,
            tx,
            task: Some(task),
        }
    }

    /// Subscribe to snapshot updates for this cycle
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.timeline.lock().expect("timeline lock").snapshot()
    }

    /// The real generation call resolved: complete every remaining step and
    /// publish the terminal snapshot.
    pub fn finish(&mut self) {
        self.abort_task();
        let snapshot = {
            let mut timeline = self.timeline.lock().expect("timeline lock");
            timeline.finish();
            timeline.snapshot()
        };
        let _ = self.tx.send(snapshot);
    }

    /// Stop the cycle without completing it (generation failed)
    pub fn cancel(&mut self) {
        self.abort_task();
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_steps() -> Vec<GenerationStep> {
        vec![
            GenerationStep::new("index.html", "html", Duration::from_millis(10)),
            GenerationStep::new("styles.css", "css", Duration::from_millis(20)),
            GenerationStep::new("script.js", "js", Duration::from_millis(10)),
        ]
    }

    #[test]
    fn test_advance_follows_step_durations() {
        let mut timeline = ProgressTimeline::new(short_steps());
        assert_eq!(timeline.advance_to(Duration::from_millis(5)), 0);
        assert_eq!(timeline.advance_to(Duration::from_millis(10)), 1);
        assert_eq!(timeline.advance_to(Duration::from_millis(29)), 1);
        assert_eq!(timeline.advance_to(Duration::from_millis(30)), 2);
        assert_eq!(timeline.advance_to(Duration::from_millis(100)), 3);
    }

    #[test]
    fn test_position_never_moves_backward() {
        let mut timeline = ProgressTimeline::new(short_steps());
        timeline.advance_to(Duration::from_millis(35));
        assert_eq!(timeline.current_index(), 2);
        timeline.advance_to(Duration::from_millis(0));
        assert_eq!(timeline.current_index(), 2);
    }

    #[test]
    fn test_percent_is_monotonic_and_capped_before_finish() {
        let mut timeline = ProgressTimeline::new(short_steps());
        let mut last = 0;
        for ms in [0u64, 5, 10, 15, 30, 40, 100] {
            timeline.advance_to(Duration::from_millis(ms));
            let percent = timeline.percent();
            assert!(percent >= last, "percent regressed at {ms}ms");
            assert!(percent <= HOLDING_PERCENT);
            last = percent;
        }
        assert_eq!(last, HOLDING_PERCENT);
    }

    #[test]
    fn test_finish_forces_completion() {
        let mut timeline = ProgressTimeline::new(short_steps());
        timeline.advance_to(Duration::from_millis(10));
        timeline.finish();

        assert_eq!(timeline.percent(), 100);
        assert_eq!(timeline.current_index(), 3);
        for index in 0..3 {
            assert!(timeline.is_step_complete(index));
        }
    }

    #[test]
    fn test_finish_with_no_elapsed_steps() {
        let mut timeline = ProgressTimeline::new(short_steps());
        timeline.finish();
        assert_eq!(timeline.percent(), 100);
        assert!(timeline.is_step_complete(0));
    }

    #[test]
    fn test_snapshot_labels() {
        let mut timeline = ProgressTimeline::new(short_steps());
        assert_eq!(timeline.snapshot().label, "html");
        timeline.advance_to(Duration::from_millis(10));
        assert_eq!(timeline.snapshot().label, "css");
        timeline.advance_to(Duration::from_millis(100));
        assert_eq!(timeline.snapshot().label, "Finalizing generation...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulator_publishes_step_advances() {
        let (tx, mut rx) = watch::channel(ProgressSnapshot::idle());
        let simulator = ProgressSimulator::start(short_steps(), Arc::new(tx));
        let _observer = simulator.subscribe();

        // Wait until the timer task reports the first step as elapsed
        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow().clone();
            if snapshot.current_index >= 1 {
                assert!(!snapshot.finished);
                assert!(snapshot.percent < 100);
                break;
            }
        }
        drop(simulator);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulator_finish_publishes_terminal_snapshot() {
        let (tx, rx) = watch::channel(ProgressSnapshot::idle());
        let mut simulator = ProgressSimulator::start(short_steps(), Arc::new(tx));

        simulator.finish();

        let snapshot = rx.borrow().clone();
        assert!(snapshot.finished);
        assert_eq!(snapshot.percent, 100);
        assert_eq!(snapshot.current_index, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_updates() {
        let (tx, rx) = watch::channel(ProgressSnapshot::idle());
        let mut simulator = ProgressSimulator::start(short_steps(), Arc::new(tx));
        simulator.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        let snapshot = rx.borrow().clone();
        assert!(!snapshot.finished);
        assert!(snapshot.percent < 100);
    }
}
