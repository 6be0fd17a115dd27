//! 메트릭 상수 및 설명 등록
//!
//! 러너가 기록하는 메트릭의 이름과 설명을 한 곳에서 정의합니다.
//! 레코더가 설치되지 않았으면 `metrics` 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `suitehook_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 케이스 결과 레이블 키 (passed, failed, skipped, disabled, config_error, not_run)
pub const LABEL_OUTCOME: &str = "outcome";

/// 생명주기 단계 레이블 키 (setup, teardown)
pub const LABEL_PHASE: &str = "phase";

// ─── Runner 메트릭 ─────────────────────────────────────────────────

/// 실행된 스위트 수 (counter)
pub const SUITES_TOTAL: &str = "suitehook_suites_total";

/// 결과별 케이스 수 (counter, label: outcome)
pub const CASES_TOTAL: &str = "suitehook_cases_total";

/// 케이스 실행 시간 (histogram, 초)
pub const CASE_DURATION_SECONDS: &str = "suitehook_case_duration_seconds";

/// 실패한 setup/teardown 훅 수 (counter, label: phase)
pub const HOOK_FAILURES_TOTAL: &str = "suitehook_hook_failures_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(SUITES_TOTAL, "Total number of suite runs started");
    describe_counter!(CASES_TOTAL, "Total number of test cases by outcome");
    describe_histogram!(
        CASE_DURATION_SECONDS,
        "Time to execute a single test case in seconds"
    );
    describe_counter!(
        HOOK_FAILURES_TOTAL,
        "Total number of failed setup or teardown hooks"
    );
}
