//! 에러 타입: 도메인별 에러 정의

/// suitehook 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SuitehookError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 프로퍼티 저장소 에러
    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    /// 값 주입(해석) 에러
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// 스위트 등록/실행 에러
    #[error("suite error: {0}")]
    Suite(#[from] SuiteError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 프로퍼티 저장소 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// 사용할 수 없는 키
    #[error("invalid property key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

/// 값 해석 에러
///
/// 단언 실패와 구분되는 설정 해석 실패입니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// 해석 시점에 키가 저장소에 없음
    #[error("missing property key: {key}")]
    MissingKey { key: String },

    /// 값을 요청한 타입으로 변환할 수 없음
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// `${...}` 플레이스홀더 형식 오류
    #[error("malformed placeholder in '{template}': {reason}")]
    MalformedPlaceholder { template: String, reason: String },
}

/// 스위트 등록/실행 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuiteError {
    /// 동일한 이름의 스위트가 이미 등록됨
    #[error("suite already registered: {name}")]
    AlreadyRegistered { name: String },

    /// 스위트를 찾을 수 없음
    #[error("suite not found: {name}")]
    NotFound { name: String },

    /// 같은 스위트 안에 동일한 이름의 케이스가 있음
    #[error("duplicate case '{case}' in suite '{suite}'")]
    DuplicateCase { suite: String, case: String },

    /// 이미 실행 중인 스위트를 다시 실행하려 함
    #[error("suite is already running: {name}")]
    AlreadyRunning { name: String },
}

/// 케이스 본문 및 훅이 반환하는 에러
///
/// `Assumption`은 실패가 아니라 건너뜀(skipped)으로 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseError {
    /// 단언 실패
    #[error("assertion failed: {message}")]
    Assertion { message: String },

    /// 가정이 성립하지 않아 케이스를 중단
    #[error("assumption not met: {message}")]
    Assumption { message: String },

    /// 주입 값 해석 실패
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// 프로퍼티 저장소 조작 실패 (setup/teardown)
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// 그 밖의 실패
    #[error("{0}")]
    Other(String),
}

impl CaseError {
    /// 단언 실패 에러를 생성합니다.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// 가정 불충족 에러를 생성합니다.
    pub fn assumption(message: impl Into<String>) -> Self {
        Self::Assumption {
            message: message.into(),
        }
    }

    /// 임의 메시지 에러를 생성합니다.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// 케이스 본문과 훅의 반환 타입
pub type CaseResult = Result<(), CaseError>;
