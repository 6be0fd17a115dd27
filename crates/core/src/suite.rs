//! 테스트 스위트: 명시적 등록 기반의 케이스/훅 묶음
//!
//! 어노테이션 탐색 대신 [`SuiteBuilder`]에 setup, teardown, 케이스를 직접 등록합니다.
//!
//! # 생명주기
//! ```text
//! setup(&mut store) → [fixture → before_each → case → after_each]* → teardown(&mut store)
//! ```
//!
//! 케이스마다 새 fixture가 만들어지며, fixture 생성자는 [`ValueProvider`]로
//! 주입 값을 해석합니다 (생성자 주입).
//!
//! # 사용 예시
//! ```
//! use suitehook_core::suite::Suite;
//! use suitehook_core::assertions::ensure_eq;
//!
//! let suite = Suite::builder_with_fixture("injection", |p| p.resolve("some.key"))
//!     .setup(|store| {
//!         store.set("some.key", "some-value")?;
//!         Ok(())
//!     })
//!     .teardown(|store| {
//!         store.clear("some.key");
//!         Ok(())
//!     })
//!     .case("validates_properties", |some_key: &mut String, _ctx| {
//!         ensure_eq(some_key.as_str(), "some-value")
//!     })
//!     .build()
//!     .expect("unique case names");
//! # let _ = suite;
//! ```

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{CaseError, CaseResult, ResolveError, SuiteError};
use crate::property::PropertyStore;
use crate::provider::ValueProvider;
use crate::report::{Outcome, PhaseOutcome};

type SuiteHook = Box<dyn Fn(&mut PropertyStore) -> CaseResult + Send + Sync>;
type FixtureFn<F> = Box<dyn Fn(&ValueProvider<'_>) -> Result<F, ResolveError> + Send + Sync>;
type CaseFn<F> = Box<dyn Fn(&mut F, &CaseContext<'_>) -> CaseResult + Send + Sync>;

// ─── SuiteInfo / CaseInfo ────────────────────────────────────────────

/// 스위트 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInfo {
    /// 레지스트리 안에서 고유한 이름
    pub name: String,
    /// 사람이 읽는 표시 이름
    pub display_name: Option<String>,
    pub description: String,
}

/// 케이스 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInfo {
    /// 스위트 안에서 고유한 이름
    pub name: String,
    pub display_name: Option<String>,
    /// 비활성화 사유 (`Some`이면 실행하지 않음)
    pub disabled: Option<String>,
}

// ─── CaseContext ─────────────────────────────────────────────────────

/// 케이스 본문과 each 훅에 전달되는 읽기 전용 컨텍스트
#[derive(Debug, Clone, Copy)]
pub struct CaseContext<'a> {
    suite: &'a str,
    case: &'a str,
    store: &'a PropertyStore,
}

impl<'a> CaseContext<'a> {
    pub fn suite(&self) -> &'a str {
        self.suite
    }

    pub fn case(&self) -> &'a str {
        self.case
    }

    /// setup이 설정한 프로퍼티 (읽기 전용)
    pub fn properties(&self) -> &'a PropertyStore {
        self.store
    }

    pub fn provider(&self) -> ValueProvider<'a> {
        ValueProvider::new(self.store)
    }
}

// ─── TestCase ────────────────────────────────────────────────────────

/// 이름이 붙은 케이스 하나
pub struct TestCase<F> {
    info: CaseInfo,
    body: CaseFn<F>,
}

impl<F> TestCase<F> {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&mut F, &CaseContext<'_>) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            info: CaseInfo {
                name: name.into(),
                display_name: None,
                disabled: None,
            },
            body: Box::new(body),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.info.display_name = Some(display_name.into());
        self
    }

    /// 케이스를 비활성화합니다. 보고서에는 `Disabled`로 남습니다.
    pub fn disabled(mut self, reason: impl Into<String>) -> Self {
        self.info.disabled = Some(reason.into());
        self
    }

    pub fn info(&self) -> &CaseInfo {
        &self.info
    }
}

// ─── RunnableSuite Trait ─────────────────────────────────────────────

/// 러너가 실행할 수 있는 dyn-compatible 스위트 trait
///
/// [`Suite<F>`]는 fixture 타입 `F`에 대해 제네릭이므로,
/// 레지스트리는 이 trait을 통해 서로 다른 스위트를 한 목록에서 다룹니다.
/// 훅과 케이스 본문의 패닉은 구현 안에서 잡혀 결과로 변환됩니다.
pub trait RunnableSuite: Send + Sync {
    fn info(&self) -> &SuiteInfo;

    /// 등록 순서대로의 케이스 메타데이터
    fn cases(&self) -> Vec<&CaseInfo>;

    /// 실행 중 표시를 획득합니다. 이미 실행 중이면 에러를 반환합니다.
    fn begin_run(&self) -> Result<RunGuard<'_>, SuiteError>;

    /// setup 훅을 실행합니다. 훅이 없으면 `Skipped`.
    fn run_setup(&self, store: &mut PropertyStore) -> PhaseOutcome;

    /// `index`번째 케이스를 fixture 생성과 each 훅을 포함해 실행합니다.
    fn run_case(&self, index: usize, store: &PropertyStore) -> Outcome;

    /// teardown 훅을 실행합니다. 훅이 없으면 `Skipped`.
    fn run_teardown(&self, store: &mut PropertyStore) -> PhaseOutcome;
}

/// 스위트 실행 중 표시. drop 시 해제됩니다.
#[derive(Debug)]
pub struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

// ─── Suite ───────────────────────────────────────────────────────────

/// 케이스와 생명주기 훅의 묶음
pub struct Suite<F = ()> {
    info: SuiteInfo,
    setup: Option<SuiteHook>,
    teardown: Option<SuiteHook>,
    before_each: Option<CaseFn<F>>,
    after_each: Option<CaseFn<F>>,
    fixture: FixtureFn<F>,
    cases: Vec<TestCase<F>>,
    running: AtomicBool,
}

impl Suite<()> {
    /// fixture가 없는 스위트 빌더
    pub fn builder(name: impl Into<String>) -> SuiteBuilder<()> {
        SuiteBuilder::new(name, |_| Ok(()))
    }
}

impl<F: 'static> Suite<F> {
    /// 케이스마다 fixture를 생성하는 스위트 빌더
    pub fn builder_with_fixture(
        name: impl Into<String>,
        fixture: impl Fn(&ValueProvider<'_>) -> Result<F, ResolveError> + Send + Sync + 'static,
    ) -> SuiteBuilder<F> {
        SuiteBuilder::new(name, fixture)
    }

    fn case_context<'a>(&'a self, case: &'a CaseInfo, store: &'a PropertyStore) -> CaseContext<'a> {
        CaseContext {
            suite: &self.info.name,
            case: &case.name,
            store,
        }
    }
}

impl<F: 'static> RunnableSuite for Suite<F> {
    fn info(&self) -> &SuiteInfo {
        &self.info
    }

    fn cases(&self) -> Vec<&CaseInfo> {
        self.cases.iter().map(TestCase::info).collect()
    }

    fn begin_run(&self) -> Result<RunGuard<'_>, SuiteError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SuiteError::AlreadyRunning {
                name: self.info.name.clone(),
            })?;
        Ok(RunGuard {
            running: &self.running,
        })
    }

    fn run_setup(&self, store: &mut PropertyStore) -> PhaseOutcome {
        run_hook(self.setup.as_ref(), store)
    }

    fn run_case(&self, index: usize, store: &PropertyStore) -> Outcome {
        let Some(case) = self.cases.get(index) else {
            return Outcome::Failed {
                reason: format!("no case at index {index}"),
            };
        };
        let ctx = self.case_context(&case.info, store);

        let provider = ValueProvider::new(store);
        let mut fixture = match call_guarded(|| (self.fixture)(&provider)) {
            Ok(Ok(fixture)) => fixture,
            Ok(Err(e)) => {
                return Outcome::ConfigError {
                    reason: e.to_string(),
                };
            }
            Err(panic) => {
                return Outcome::Failed {
                    reason: format!("fixture {panic}"),
                };
            }
        };

        let before = match &self.before_each {
            Some(hook) => classify(call_guarded(|| hook(&mut fixture, &ctx))),
            None => Outcome::Passed,
        };

        // before_each가 실패하면 본문은 건너뛰지만 after_each는 실행
        let mut outcome = match before {
            Outcome::Passed => classify(call_guarded(|| (case.body)(&mut fixture, &ctx))),
            Outcome::Failed { reason } => Outcome::Failed {
                reason: format!("before_each: {reason}"),
            },
            other => other,
        };

        if let Some(hook) = &self.after_each {
            let after = classify(call_guarded(|| hook(&mut fixture, &ctx)));
            if outcome == Outcome::Passed {
                if let Some(reason) = after.reason().filter(|_| after.is_failure()) {
                    outcome = Outcome::Failed {
                        reason: format!("after_each: {reason}"),
                    };
                }
            }
        }

        outcome
    }

    fn run_teardown(&self, store: &mut PropertyStore) -> PhaseOutcome {
        run_hook(self.teardown.as_ref(), store)
    }
}

// ─── SuiteBuilder ────────────────────────────────────────────────────

/// [`Suite`] 빌더
///
/// `build()`에서 케이스 이름 중복을 검사합니다.
pub struct SuiteBuilder<F> {
    info: SuiteInfo,
    setup: Option<SuiteHook>,
    teardown: Option<SuiteHook>,
    before_each: Option<CaseFn<F>>,
    after_each: Option<CaseFn<F>>,
    fixture: FixtureFn<F>,
    cases: Vec<TestCase<F>>,
}

impl<F: 'static> SuiteBuilder<F> {
    fn new(
        name: impl Into<String>,
        fixture: impl Fn(&ValueProvider<'_>) -> Result<F, ResolveError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            info: SuiteInfo {
                name: name.into(),
                display_name: None,
                description: String::new(),
            },
            setup: None,
            teardown: None,
            before_each: None,
            after_each: None,
            fixture: Box::new(fixture),
            cases: Vec::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.info.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = description.into();
        self
    }

    /// 모든 케이스 전에 한 번 실행되는 훅
    pub fn setup(
        mut self,
        hook: impl Fn(&mut PropertyStore) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.setup = Some(Box::new(hook));
        self
    }

    /// 모든 케이스 후에 한 번 실행되는 훅 (케이스 실패와 무관)
    pub fn teardown(
        mut self,
        hook: impl Fn(&mut PropertyStore) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    pub fn before_each(
        mut self,
        hook: impl Fn(&mut F, &CaseContext<'_>) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    pub fn after_each(
        mut self,
        hook: impl Fn(&mut F, &CaseContext<'_>) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.after_each = Some(Box::new(hook));
        self
    }

    pub fn case(
        self,
        name: impl Into<String>,
        body: impl Fn(&mut F, &CaseContext<'_>) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.test_case(TestCase::new(name, body))
    }

    /// 표시 이름/비활성화 등을 지정한 케이스를 추가합니다.
    pub fn test_case(mut self, case: TestCase<F>) -> Self {
        self.cases.push(case);
        self
    }

    pub fn build(self) -> Result<Suite<F>, SuiteError> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.info.name.as_str()) {
                return Err(SuiteError::DuplicateCase {
                    suite: self.info.name.clone(),
                    case: case.info.name.clone(),
                });
            }
        }

        Ok(Suite {
            info: self.info,
            setup: self.setup,
            teardown: self.teardown,
            before_each: self.before_each,
            after_each: self.after_each,
            fixture: self.fixture,
            cases: self.cases,
            running: AtomicBool::new(false),
        })
    }
}

// ─── 실행 헬퍼 ───────────────────────────────────────────────────────

fn run_hook(hook: Option<&SuiteHook>, store: &mut PropertyStore) -> PhaseOutcome {
    let Some(hook) = hook else {
        return PhaseOutcome::Skipped;
    };
    match call_guarded(|| hook(store)) {
        Ok(Ok(())) => PhaseOutcome::Passed,
        Ok(Err(e)) => PhaseOutcome::Failed {
            reason: e.to_string(),
        },
        Err(panic) => PhaseOutcome::Failed { reason: panic },
    }
}

/// 패닉을 잡아 메시지로 변환합니다.
fn call_guarded<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_owned()
    }
}

fn classify(result: Result<CaseResult, String>) -> Outcome {
    match result {
        Ok(Ok(())) => Outcome::Passed,
        Ok(Err(CaseError::Assumption { message })) => Outcome::Skipped { reason: message },
        Ok(Err(CaseError::Resolve(e))) => Outcome::ConfigError {
            reason: e.to_string(),
        },
        Ok(Err(e)) => Outcome::Failed {
            reason: e.to_string(),
        },
        Err(panic) => Outcome::Failed { reason: panic },
    }
}
