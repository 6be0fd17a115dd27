//! 스위트 레지스트리: 스위트 등록, 해제, 일괄 실행
//!
//! [`SuiteRegistry`]는 [`RunnableSuite`]를 등록 순서대로 보관하고
//! [`SuiteRunner`]로 실행합니다.
//!
//! 각 스위트는 설정의 `[properties]`로 초기화된 **자기만의** 저장소로 실행되므로,
//! `parallel_suites`가 켜져도 스위트끼리 생명주기 상태를 공유하지 않습니다.
//!
//! # 사용 예시
//! ```ignore
//! let mut registry = SuiteRegistry::new();
//! registry.register(Box::new(lifecycle_suite))?;
//! registry.register(Box::new(injection_suite))?;
//!
//! let summary = registry.run_all(&config)?;
//! ```

use std::collections::HashSet;

use tracing::info;

use crate::config::SuitehookConfig;
use crate::error::{SuiteError, SuitehookError};
use crate::report::RunSummary;
use crate::runner::SuiteRunner;
use crate::suite::{RunnableSuite, SuiteInfo};

/// 스위트 레지스트리
pub struct SuiteRegistry {
    suites: Vec<Box<dyn RunnableSuite>>,
}

impl SuiteRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self { suites: Vec::new() }
    }

    /// 스위트를 등록합니다.
    ///
    /// 동일한 이름의 스위트가 이미 등록되어 있으면 에러를 반환합니다.
    pub fn register(&mut self, suite: Box<dyn RunnableSuite>) -> Result<(), SuiteError> {
        let name = suite.info().name.clone();
        if self.suites.iter().any(|s| s.info().name == name) {
            return Err(SuiteError::AlreadyRegistered { name });
        }
        self.suites.push(suite);
        Ok(())
    }

    /// 스위트를 해제하고 소유권을 반환합니다.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn RunnableSuite>, SuiteError> {
        let pos = self.suites.iter().position(|s| s.info().name == name);
        match pos {
            Some(idx) => Ok(self.suites.remove(idx)),
            None => Err(SuiteError::NotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// 이름으로 스위트를 조회합니다.
    pub fn get(&self, name: &str) -> Option<&dyn RunnableSuite> {
        self.suites
            .iter()
            .find(|s| s.info().name == name)
            .map(|s| s.as_ref())
    }

    /// 등록된 스위트 수를 반환합니다.
    pub fn count(&self) -> usize {
        self.suites.len()
    }

    /// 등록된 모든 스위트의 정보를 반환합니다.
    pub fn list(&self) -> Vec<&SuiteInfo> {
        self.suites.iter().map(|s| s.info()).collect()
    }

    /// 등록된 모든 스위트를 실행합니다.
    pub fn run_all(&self, config: &SuitehookConfig) -> Result<RunSummary, SuitehookError> {
        let names: Vec<&str> = self.suites.iter().map(|s| s.info().name.as_str()).collect();
        self.run_selected(&names, config)
    }

    /// 이름을 지정한 스위트만 실행합니다.
    ///
    /// 등록되지 않은 이름이 하나라도 있으면 아무것도 실행하지 않고 에러를 반환합니다.
    /// 중복된 이름은 처음 나온 위치에서 한 번만 실행하며,
    /// 보고서 순서는 `names`의 첫 등장 순서를 따릅니다.
    pub fn run_selected(
        &self,
        names: &[&str],
        config: &SuitehookConfig,
    ) -> Result<RunSummary, SuitehookError> {
        let mut seen = HashSet::new();
        let suites = names
            .iter()
            .filter(|name| seen.insert(**name))
            .map(|name| {
                self.get(name).ok_or_else(|| SuiteError::NotFound {
                    name: (*name).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let runner = SuiteRunner::new(config.runner.clone());
        info!(
            suites = suites.len(),
            parallel = config.runner.parallel_suites,
            "running suites"
        );

        let reports = if config.runner.parallel_suites && suites.len() > 1 {
            std::thread::scope(|scope| {
                let handles: Vec<_> = suites
                    .iter()
                    .map(|&suite| {
                        let runner = &runner;
                        scope.spawn(move || -> Result<_, SuitehookError> {
                            let mut store = config.base_properties()?;
                            Ok(runner.run(suite, &mut store)?)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        // 케이스/훅 패닉은 스위트 안에서 잡히므로 join 실패는 러너 자체의 버그
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?
        } else {
            let mut reports = Vec::with_capacity(suites.len());
            for suite in suites {
                let mut store = config.base_properties()?;
                reports.push(runner.run(suite, &mut store)?);
            }
            reports
        };

        Ok(RunSummary { suites: reports })
    }
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
