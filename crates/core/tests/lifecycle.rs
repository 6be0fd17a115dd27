//! 스위트 생명주기 통합 테스트
//!
//! - setup은 첫 케이스보다 먼저, teardown은 마지막 케이스 뒤에 정확히 한 번
//! - 케이스 실패와 무관하게 teardown 실행
//! - 주입 값은 setup이 설정한 값과 같고, teardown 뒤에는 키가 사라짐
//! - 순서를 바꿔도 독립 케이스의 결과는 같음

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use suitehook_core::assertions::{ensure, ensure_eq};
use suitehook_core::config::RunnerConfig;
use suitehook_core::{
    CaseError, CaseOrder, LifecycleEvent, Outcome, PropertyStore, ResolveError, Suite,
    SuiteRunner, ValueProvider,
};

const KEY: &str = "some.key";
const VALUE: &str = "some-value";

/// 공유 카운터로 호출 순서를 기록하는 스위트
///
/// setup은 카운터를 1로, 각 케이스는 카운터가 1 이상인지 확인한 뒤 증가,
/// teardown은 최종 카운터 값을 기록합니다.
fn counter_suite(
    clock: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
    failing_case: bool,
) -> Suite<String> {
    let (setup_clock, setup_log) = (clock.clone(), log.clone());
    let (teardown_clock, teardown_log) = (clock.clone(), log.clone());
    let (c1, l1) = (clock.clone(), log.clone());
    let (c2, l2) = (clock.clone(), log.clone());

    let mut builder = Suite::builder_with_fixture("counter", |p| p.resolve(KEY))
        .setup(move |store| {
            ensure(
                setup_clock.fetch_add(1, Ordering::SeqCst) == 0,
                "setup ran more than once",
            )?;
            setup_log.lock().unwrap().push("beforeAll".to_owned());
            store.set(KEY, VALUE)?;
            Ok(())
        })
        .teardown(move |store| {
            teardown_log
                .lock()
                .unwrap()
                .push(format!("afterAll@{}", teardown_clock.load(Ordering::SeqCst)));
            store.clear(KEY);
            Ok(())
        })
        .case("aTest1", move |value: &mut String, _| {
            ensure(c1.fetch_add(1, Ordering::SeqCst) >= 1, "ran before setup")?;
            l1.lock().unwrap().push("aTest1".to_owned());
            ensure_eq(value.as_str(), VALUE)
        })
        .case("aTest2", move |value: &mut String, _| {
            ensure(c2.fetch_add(1, Ordering::SeqCst) >= 1, "ran before setup")?;
            l2.lock().unwrap().push("aTest2".to_owned());
            ensure_eq(value.as_str(), VALUE)
        });

    if failing_case {
        builder = builder.case("deliberately_failing", |_, _| {
            Err(CaseError::assertion("deliberate failure"))
        });
    }

    builder.build().expect("unique case names")
}

#[test]
fn setup_completes_before_first_case_and_teardown_after_last() {
    let clock = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    let suite = counter_suite(clock.clone(), log.clone(), false);

    let report = SuiteRunner::default()
        .run(&suite, &mut PropertyStore::new())
        .expect("suite should run");

    assert!(report.is_success(), "{report:?}");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["beforeAll", "aTest1", "aTest2", "afterAll@3"]
    );

    let starts: Vec<usize> = report
        .timeline
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, LifecycleEvent::CaseStarted { .. }))
        .map(|(i, _)| i)
        .collect();
    let setup_end = report
        .timeline
        .iter()
        .position(|e| *e == LifecycleEvent::SetupFinished)
        .expect("setup recorded");
    let teardown_start = report
        .timeline
        .iter()
        .position(|e| *e == LifecycleEvent::TeardownStarted)
        .expect("teardown recorded");
    assert!(starts.iter().all(|&i| i > setup_end && i < teardown_start));
}

#[test]
fn teardown_runs_exactly_once_when_a_case_fails() {
    let clock = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    let suite = counter_suite(clock, log.clone(), true);

    let report = SuiteRunner::default()
        .run(&suite, &mut PropertyStore::new())
        .expect("suite should run");

    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), 2);
    let teardowns = log
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.starts_with("afterAll"))
        .count();
    assert_eq!(teardowns, 1);
    assert!(!report.teardown.is_failure());
}

#[test]
fn injected_value_matches_setup_and_key_is_gone_after_teardown() {
    let suite = Suite::builder_with_fixture("before-all-sample", |p| p.resolve(KEY))
        .setup(|store| {
            store.set(KEY, VALUE)?;
            Ok(())
        })
        .teardown(|store| {
            store.clear(KEY);
            Ok(())
        })
        .case("test_validate_properties", |some_key: &mut String, _| {
            ensure_eq(some_key.as_str(), VALUE)
        })
        .build()
        .unwrap();

    let mut store = PropertyStore::new();
    let report = SuiteRunner::default().run(&suite, &mut store).unwrap();

    assert_eq!(
        report.case("test_validate_properties").map(|c| &c.outcome),
        Some(&Outcome::Passed)
    );
    assert!(!store.contains(KEY));
    assert_eq!(store.get(KEY), None);
}

#[test]
fn resolving_before_setup_is_a_missing_key_error() {
    let store = PropertyStore::new();
    let provider = ValueProvider::new(&store);
    assert_eq!(
        provider.resolve(KEY),
        Err(ResolveError::MissingKey {
            key: KEY.to_owned()
        })
    );
}

#[test]
fn missing_key_is_reported_as_config_error_not_failure() {
    let body_ran = Arc::new(AtomicUsize::new(0));
    let counter = body_ran.clone();
    let suite = Suite::builder_with_fixture("no-setup", |p| p.resolve(KEY))
        .case("needs_key", move |_: &mut String, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build()
        .unwrap();

    let report = SuiteRunner::default()
        .run(&suite, &mut PropertyStore::new())
        .unwrap();

    assert!(matches!(
        report.cases[0].outcome,
        Outcome::ConfigError { ref reason } if reason.contains(KEY)
    ));
    assert_eq!(body_ran.load(Ordering::SeqCst), 0);
}

#[test]
fn independent_cases_give_same_outcomes_in_any_order() {
    let outcomes_for = |order: CaseOrder, seed: Option<u64>| {
        let suite = counter_suite(Arc::default(), Arc::default(), true);
        let runner = SuiteRunner::new(RunnerConfig {
            order,
            seed,
            ..RunnerConfig::default()
        });
        let report = runner.run(&suite, &mut PropertyStore::new()).unwrap();
        let mut outcomes: Vec<(String, Outcome)> = report
            .cases
            .into_iter()
            .map(|c| (c.name, c.outcome))
            .collect();
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        outcomes
    };

    let declared = outcomes_for(CaseOrder::Declared, None);
    assert_eq!(declared, outcomes_for(CaseOrder::Reversed, None));
    for seed in [1, 2, 3, 42] {
        assert_eq!(declared, outcomes_for(CaseOrder::Random, Some(seed)));
    }
}

#[test]
fn cases_cannot_observe_state_after_teardown() {
    // teardown 후 같은 저장소로 다시 해석하면 실패해야 함
    let suite = counter_suite(Arc::default(), Arc::default(), false);
    let mut store = PropertyStore::new();
    SuiteRunner::default().run(&suite, &mut store).unwrap();

    let provider = ValueProvider::new(&store);
    assert!(provider.resolve(KEY).is_err());
}
