#![doc = include_str!("../README.md")]

pub mod assertions;
pub mod config;
pub mod error;
pub mod metrics;
pub mod order;
pub mod property;
pub mod provider;
pub mod registry;
pub mod report;
pub mod runner;
pub mod suite;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{
    CaseError, CaseResult, ConfigError, PropertyError, ResolveError, SuiteError, SuitehookError,
};

// 설정
pub use config::{RunnerConfig, SuitehookConfig};

// 스위트 / 러너
pub use order::CaseOrder;
pub use property::PropertyStore;
pub use provider::ValueProvider;
pub use registry::SuiteRegistry;
pub use runner::SuiteRunner;
pub use suite::{CaseContext, CaseInfo, RunnableSuite, Suite, SuiteBuilder, SuiteInfo, TestCase};

// 결과
pub use report::{CaseReport, LifecycleEvent, Outcome, PhaseOutcome, RunSummary, SuiteReport};
