//! 실행 결과 타입: 케이스/단계 결과, 타임라인, 스위트 보고서

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::CaseOrder;

/// 케이스 실행 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// 성공
    Passed,
    /// 단언 실패 또는 패닉
    Failed { reason: String },
    /// 가정 불충족으로 중단
    Skipped { reason: String },
    /// 비활성화된 케이스
    Disabled { reason: String },
    /// 주입 값 해석 실패 (본문 실행 전)
    ConfigError { reason: String },
    /// setup 실패로 실행되지 않음
    NotRun { reason: String },
}

impl Outcome {
    /// 스위트 실패로 집계되는 결과인지 여부
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::ConfigError { .. } | Self::NotRun { .. })
    }

    /// 메트릭/로그용 레이블
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
            Self::Disabled { .. } => "disabled",
            Self::ConfigError { .. } => "config_error",
            Self::NotRun { .. } => "not_run",
        }
    }

    /// 결과 사유 (성공이면 `None`)
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { reason }
            | Self::Skipped { reason }
            | Self::Disabled { reason }
            | Self::ConfigError { reason }
            | Self::NotRun { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {}", self.label(), reason),
            None => write!(f, "{}", self.label()),
        }
    }
}

/// setup / teardown 단계 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseOutcome {
    Passed,
    Failed { reason: String },
    /// 실행하지 않음 (훅 없음 포함)
    Skipped,
}

impl PhaseOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// 생명주기 타임라인 항목
///
/// 보고서의 `timeline`은 실제 호출 순서대로 기록됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    SetupStarted,
    SetupFinished,
    CaseStarted { case: String },
    CaseFinished { case: String },
    TeardownStarted,
    TeardownFinished,
}

/// 케이스 하나의 보고서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub name: String,
    pub display_name: Option<String>,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

impl CaseReport {
    /// 표시 이름이 있으면 표시 이름, 없으면 케이스 이름
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// 스위트 실행 한 번의 보고서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub suite: String,
    pub display_name: Option<String>,
    pub order: CaseOrder,
    pub seed: Option<u64>,
    pub setup: PhaseOutcome,
    pub cases: Vec<CaseReport>,
    pub teardown: PhaseOutcome,
    pub timeline: Vec<LifecycleEvent>,
    pub duration_ms: u64,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    /// 실패로 집계되는 케이스 수 (`Failed`, `ConfigError`, `NotRun`)
    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    /// 건너뛴 케이스 수 (`Skipped`, `Disabled`)
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. } | Outcome::Disabled { .. }))
    }

    /// 케이스 실패도, 훅 실패도 없으면 성공
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && !self.setup.is_failure() && !self.teardown.is_failure()
    }

    /// 이름으로 케이스 보고서를 찾습니다.
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.cases.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// 여러 스위트 실행의 요약
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub suites: Vec<SuiteReport>,
}

impl RunSummary {
    pub fn total_cases(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    pub fn total_passed(&self) -> usize {
        self.suites.iter().map(SuiteReport::passed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.suites.iter().map(SuiteReport::failed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.suites.iter().map(SuiteReport::skipped).sum()
    }

    pub fn is_success(&self) -> bool {
        self.suites.iter().all(SuiteReport::is_success)
    }
}
