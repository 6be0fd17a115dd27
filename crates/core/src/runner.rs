//! 생명주기 러너: setup 한 번, 케이스들, teardown 한 번
//!
//! [`SuiteRunner`]는 다음을 보장합니다.
//!
//! - setup은 첫 케이스보다 먼저, 정확히 한 번 실행됩니다.
//! - teardown은 모든 케이스(실패 포함)가 끝난 뒤 정확히 한 번 실행됩니다.
//! - 케이스 실패는 형제 케이스의 실행도, teardown도 막지 않습니다.
//! - setup이 실패하면 어떤 케이스도 실행되지 않고 모두 `NotRun`으로 보고됩니다.
//!   이때 teardown 실행 여부는 `teardown_after_failed_setup` 설정을 따릅니다.
//! - 활성 케이스가 하나도 선택되지 않으면 훅을 실행하지 않습니다.

use std::time::Instant;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::error::SuiteError;
use crate::metrics as m;
use crate::order::ExecutionPlan;
use crate::property::PropertyStore;
use crate::report::{CaseReport, LifecycleEvent, Outcome, PhaseOutcome, SuiteReport};
use crate::suite::{CaseInfo, RunnableSuite};

/// 스위트 하나를 생명주기 규약에 따라 실행합니다.
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    config: RunnerConfig,
}

impl SuiteRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// 스위트를 실행하고 보고서를 반환합니다.
    ///
    /// `store`는 이 실행 전용 컨텍스트입니다. setup/teardown은 가변으로,
    /// 케이스는 읽기 전용으로 접근합니다.
    /// 같은 스위트가 이미 실행 중이면 `SuiteError::AlreadyRunning`을 반환합니다.
    pub fn run(
        &self,
        suite: &dyn RunnableSuite,
        store: &mut PropertyStore,
    ) -> Result<SuiteReport, SuiteError> {
        let _guard = suite.begin_run()?;
        let started = Instant::now();
        let info = suite.info();
        let cases = suite.cases();

        let selected: Vec<usize> = cases
            .iter()
            .enumerate()
            .filter(|(_, case)| self.is_selected(case))
            .map(|(idx, _)| idx)
            .collect();
        let plan = ExecutionPlan::build(self.config.order, self.config.seed, selected);
        let has_enabled = plan.indices.iter().any(|&i| cases[i].disabled.is_none());

        metrics::counter!(m::SUITES_TOTAL).increment(1);
        info!(
            suite = %info.name,
            cases = plan.indices.len(),
            order = %plan.order,
            seed = ?plan.seed,
            "suite run started"
        );

        let mut timeline = Vec::new();
        let mut reports = Vec::with_capacity(plan.indices.len());

        // 활성 케이스가 없으면 훅 없이 비활성 케이스만 보고
        let setup = if has_enabled {
            timeline.push(LifecycleEvent::SetupStarted);
            let outcome = suite.run_setup(store);
            timeline.push(LifecycleEvent::SetupFinished);
            outcome
        } else {
            PhaseOutcome::Skipped
        };

        if let PhaseOutcome::Failed { reason } = &setup {
            error!(suite = %info.name, %reason, "setup failed, no case will run");
            metrics::counter!(m::HOOK_FAILURES_TOTAL, m::LABEL_PHASE => "setup").increment(1);
        }

        for &idx in &plan.indices {
            let case = cases[idx];
            let report = match (&case.disabled, &setup) {
                (Some(reason), _) => Self::finish_case(
                    &info.name,
                    case,
                    Outcome::Disabled {
                        reason: reason.clone(),
                    },
                    0,
                ),
                (None, PhaseOutcome::Failed { reason }) => Self::finish_case(
                    &info.name,
                    case,
                    Outcome::NotRun {
                        reason: format!("setup failed: {reason}"),
                    },
                    0,
                ),
                (None, _) => {
                    timeline.push(LifecycleEvent::CaseStarted {
                        case: case.name.clone(),
                    });
                    let case_started = Instant::now();
                    let outcome = suite.run_case(idx, store);
                    let elapsed = case_started.elapsed();
                    timeline.push(LifecycleEvent::CaseFinished {
                        case: case.name.clone(),
                    });
                    metrics::histogram!(m::CASE_DURATION_SECONDS).record(elapsed.as_secs_f64());
                    Self::finish_case(&info.name, case, outcome, elapsed.as_millis() as u64)
                }
            };
            reports.push(report);
        }

        let run_teardown =
            has_enabled && (!setup.is_failure() || self.config.teardown_after_failed_setup);
        let teardown = if run_teardown {
            timeline.push(LifecycleEvent::TeardownStarted);
            let outcome = suite.run_teardown(store);
            timeline.push(LifecycleEvent::TeardownFinished);
            outcome
        } else {
            PhaseOutcome::Skipped
        };

        if let PhaseOutcome::Failed { reason } = &teardown {
            error!(suite = %info.name, %reason, "teardown failed");
            metrics::counter!(m::HOOK_FAILURES_TOTAL, m::LABEL_PHASE => "teardown").increment(1);
        }

        let report = SuiteReport {
            run_id: Uuid::new_v4(),
            suite: info.name.clone(),
            display_name: info.display_name.clone(),
            order: plan.order,
            seed: plan.seed,
            setup,
            cases: reports,
            teardown,
            timeline,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            suite = %report.suite,
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            duration_ms = report.duration_ms,
            "suite run finished"
        );

        Ok(report)
    }

    fn is_selected(&self, case: &CaseInfo) -> bool {
        match &self.config.filter {
            Some(filter) => case.name.contains(filter.as_str()),
            None => true,
        }
    }

    fn finish_case(suite: &str, case: &CaseInfo, outcome: Outcome, duration_ms: u64) -> CaseReport {
        metrics::counter!(m::CASES_TOTAL, m::LABEL_OUTCOME => outcome.label()).increment(1);
        match &outcome {
            Outcome::Passed => debug!(suite, case = %case.name, duration_ms, "case passed"),
            Outcome::Failed { reason } | Outcome::ConfigError { reason } => {
                warn!(suite, case = %case.name, outcome = outcome.label(), %reason, "case failed")
            }
            other => debug!(suite, case = %case.name, outcome = %other, "case not executed"),
        }
        CaseReport {
            name: case.name.clone(),
            display_name: case.display_name.clone(),
            outcome,
            duration_ms,
        }
    }
}
