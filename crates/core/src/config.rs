//! 설정 관리: suitehook.toml 파싱 및 런타임 설정
//!
//! [`SuitehookConfig`]는 로깅, 러너, 기본 프로퍼티 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SUITEHOOK_RUNNER_ORDER=random` 형식)
//! 3. 설정 파일 (`suitehook.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), suitehook_core::error::SuitehookError> {
//! use suitehook_core::config::SuitehookConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SuitehookConfig::load("suitehook.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SuitehookConfig::parse("[runner]\norder = \"random\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, SuitehookError};
use crate::order::CaseOrder;
use crate::property::PropertyStore;

/// suitehook 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuitehookConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 러너 설정
    #[serde(default)]
    pub runner: RunnerConfig,
    /// 모든 스위트 저장소에 미리 넣어 둘 기본 프로퍼티
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl SuitehookConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SuitehookError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SuitehookError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SuitehookError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SuitehookError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SuitehookError> {
        toml::from_str(toml_str).map_err(|e| {
            SuitehookError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SUITEHOOK_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SUITEHOOK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SUITEHOOK_GENERAL_LOG_FORMAT");

        // Runner
        override_order(&mut self.runner.order, "SUITEHOOK_RUNNER_ORDER");
        override_opt_u64(&mut self.runner.seed, "SUITEHOOK_RUNNER_SEED");
        override_opt_string(&mut self.runner.filter, "SUITEHOOK_RUNNER_FILTER");
        override_bool(
            &mut self.runner.parallel_suites,
            "SUITEHOOK_RUNNER_PARALLEL_SUITES",
        );
        override_bool(
            &mut self.runner.teardown_after_failed_setup,
            "SUITEHOOK_RUNNER_TEARDOWN_AFTER_FAILED_SETUP",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SuitehookError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.runner.seed.is_some() && self.runner.order != CaseOrder::Random {
            return Err(ConfigError::InvalidValue {
                field: "runner.seed".to_owned(),
                reason: "seed is only meaningful with order = \"random\"".to_owned(),
            }
            .into());
        }

        if let Some(filter) = &self.runner.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "runner.filter".to_owned(),
                    reason: "filter must not be blank".to_owned(),
                }
                .into());
            }
        }

        // 기본 프로퍼티 키 검증
        self.base_properties()?;

        Ok(())
    }

    /// `[properties]` 섹션으로 새 프로퍼티 저장소를 만듭니다.
    pub fn base_properties(&self) -> Result<PropertyStore, SuitehookError> {
        PropertyStore::from_pairs(
            self.properties
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .map_err(|e| {
            ConfigError::InvalidValue {
                field: "properties".to_owned(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 러너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 케이스 실행 순서
    pub order: CaseOrder,
    /// `random` 순서의 시드 (없으면 실행마다 새로 뽑음)
    pub seed: Option<u64>,
    /// 이름에 이 문자열이 포함된 케이스만 실행
    pub filter: Option<String>,
    /// 스위트를 각자의 스레드에서 병렬 실행
    pub parallel_suites: bool,
    /// setup 실패 후에도 teardown 실행
    pub teardown_after_failed_setup: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            order: CaseOrder::Declared,
            seed: None,
            filter: None,
            parallel_suites: false,
            teardown_after_failed_setup: true,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.is_empty() { None } else { Some(val) };
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_order(target: &mut CaseOrder, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<CaseOrder>() {
            Ok(parsed) => *target = parsed,
            Err(reason) => warn!(
                env_key,
                value = val.as_str(),
                %reason,
                "failed to parse case order from env var, ignoring"
            ),
        }
    }
}
