use engine::{
    ExperimentError, ExperimentRunner, InputField, MemoryProbe, Report, Session, SweepConfig,
    SweepDriver, SweepEvent, SweepStatus,
};

#[derive(Debug, Clone, Copy)]
struct FixedProbe(u64);

impl MemoryProbe for FixedProbe {
    fn start(&self) -> usize {
        0
    }

    fn peak_since(&self, _mark: usize) -> u64 {
        self.0
    }
}

fn session() -> Session<FixedProbe> {
    Session::with_runner(ExperimentRunner::with_probe(FixedProbe(128)), SweepConfig::default())
}

#[test]
fn run_reports_golden_counts() {
    let run = ExperimentRunner::with_probe(FixedProbe(0))
        .run("AAAAB", "AAB")
        .expect("valid input");

    assert_eq!(run.baseline.result.match_index, Some(2));
    assert_eq!(run.baseline.result.comparisons, 9);
    assert_eq!(run.enhanced.result.match_index, Some(2));
    assert_eq!(run.enhanced.result.comparisons, 9);
    assert_eq!(run.enhanced.result.checksum_skips, 2);
}

#[test]
fn runner_rejects_empty_pattern() {
    let err = ExperimentRunner::new().run("text", "").unwrap_err();
    assert_eq!(err, ExperimentError::InvalidInput(InputField::Pattern));
    assert_eq!(err.to_string(), "invalid input: pattern must not be empty");
}

#[test]
fn background_sweep_streams_seven_sizes() {
    let driver = SweepDriver::with_runner(
        SweepConfig::default(),
        ExperimentRunner::with_probe(FixedProbe(0)),
    );
    let handle = driver.spawn("AB", "B").expect("spawn sweep");

    let events: Vec<SweepEvent> = handle.collect();
    assert_eq!(events.len(), 8);

    let mut last_size = 0;
    for (i, event) in events[..7].iter().enumerate() {
        let SweepEvent::Point(point) = event else {
            panic!("expected a point at {i}, got {event:?}");
        };
        assert_eq!(point.index, i);
        assert!(point.size >= last_size);
        last_size = point.size;
        // the appended pattern guarantees a hit in the final window
        assert_eq!(point.run.baseline.result.match_index, Some(1));
        assert!(point.run.agrees());
    }
    assert_eq!(events[7], SweepEvent::Finished { points: 7 });
}

#[test]
fn session_sweep_fills_both_stores() {
    let mut s = session();
    s.run_experiment("stale", "st").unwrap();

    let mut progress = Vec::new();
    let points = s
        .run_sweep("AB", "B", |p| progress.push(p.size))
        .expect("sweep");

    assert_eq!(points, 7);
    assert_eq!(progress, vec![3, 3, 5, 9, 17, 33, 65]);

    let time = s.trends().time().series();
    let memory = s.trends().memory().series();
    assert_eq!(time.xs, vec![3.0, 3.0, 5.0, 9.0, 17.0, 33.0, 65.0]);
    assert_eq!(memory.xs, time.xs);
    assert!(memory.baseline.iter().all(|&m| m == 128.0));
    assert!(time.xs.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn session_applies_events_from_handle() {
    let mut s = session();
    let mut handle = s.start_sweep("", "XYZ").expect("start");

    let mut finished = None;
    while let Some(event) = handle.recv() {
        if let SweepStatus::Finished { points } = s.apply(event) {
            finished = Some(points);
        }
    }
    assert!(handle.is_finished());
    handle.join().expect("worker exits cleanly");

    assert_eq!(finished, Some(7));
    assert_eq!(s.trends().len(), 7);
}

#[test]
fn polling_handle_drains_without_blocking() {
    let mut s = session();
    let mut handle = s.start_sweep("AB", "B").expect("start");

    let mut points = 0;
    let mut finished = None;
    while !handle.is_finished() {
        match handle.try_recv() {
            Some(event) => match s.apply(event) {
                SweepStatus::Running => points += 1,
                SweepStatus::Finished { points } => finished = Some(points),
            },
            None => std::thread::yield_now(),
        }
    }
    assert!(handle.try_recv().is_none());
    handle.join().expect("worker exits cleanly");

    assert_eq!(points, 7);
    assert_eq!(finished, Some(7));
    assert_eq!(s.trends().len(), 7);
}

#[test]
fn oversized_sweep_fails_and_keeps_trends() {
    let mut s = Session::with_runner(
        ExperimentRunner::with_probe(FixedProbe(0)),
        SweepConfig {
            multipliers: vec![1.0, 1e19],
        },
    );
    s.run_experiment("AAAAB", "AAB").unwrap();

    let err = s.run_sweep("AB", "B", |_| {}).unwrap_err();
    assert!(matches!(err, ExperimentError::SweepTooLarge { .. }));
    assert!(err.to_string().starts_with("sweep multiplier"));
    assert_eq!(s.trends().len(), 1);
}

#[test]
fn clearing_trends_resets_time_and_memory_together() {
    let mut s = session();
    s.run_sweep("AB", "B", |_| {}).unwrap();
    assert_eq!(s.trends().time().len(), 7);
    assert_eq!(s.trends().memory().len(), 7);

    s.clear_trends();
    assert!(s.trends().time().is_empty());
    assert!(s.trends().memory().is_empty());
}

#[test]
fn report_after_sweep_and_run_mentions_runtime_trend() {
    let mut s = session();
    s.run_sweep("AB", "B", |_| {}).unwrap();
    s.run_experiment("ABABAB", "BA").unwrap();

    let report: &Report = s.report().expect("a run happened");
    // the sweep points, not the run the report describes
    assert_eq!(report.trend.points, 7);
    assert!(report.trend.runtime_change.is_some());
    assert!(report.to_string().contains("BF Runtime Trend"));
}
