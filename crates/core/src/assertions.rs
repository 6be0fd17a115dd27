//! 단언/가정 헬퍼
//!
//! 패닉 대신 [`CaseResult`]를 반환하므로 `?`로 연결할 수 있습니다.
//! 케이스 본문에서 `assert_eq!` 같은 패닉 단언을 써도 러너가 실패로 기록합니다.

use std::fmt::{Debug, Display};

use crate::error::{CaseError, CaseResult};

/// 조건이 거짓이면 단언 실패
pub fn ensure(condition: bool, message: impl Into<String>) -> CaseResult {
    if condition {
        Ok(())
    } else {
        Err(CaseError::assertion(message))
    }
}

/// 두 값이 같지 않으면 단언 실패
pub fn ensure_eq<A, E>(actual: A, expected: E) -> CaseResult
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "expected {expected:?}, got {actual:?}"
        )))
    }
}

/// 두 값이 같으면 단언 실패
pub fn ensure_ne<A, E>(actual: A, unexpected: E, message: impl Into<String>) -> CaseResult
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    if actual != unexpected {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{}: both values are {actual:?}",
            message.into()
        )))
    }
}

/// 그룹 단언: 모든 검사를 실행하고 실패를 한 번에 보고합니다.
///
/// 가정(assumption) 실패가 섞여 있으면 첫 번째 가정 실패를 그대로 반환합니다.
pub fn assert_all<I>(heading: &str, checks: I) -> CaseResult
where
    I: IntoIterator,
    I::Item: FnOnce() -> CaseResult,
{
    let mut failures = Vec::new();
    for check in checks {
        match check() {
            Ok(()) => {}
            Err(e @ CaseError::Assumption { .. }) => return Err(e),
            Err(e) => failures.push(e.to_string()),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{heading} ({} failure{}): {}",
            failures.len(),
            if failures.len() == 1 { "" } else { "s" },
            failures.join("; ")
        )))
    }
}

/// 연산이 실패해야 함을 단언하고 에러를 돌려줍니다.
pub fn expect_err<T: Debug, E>(result: Result<T, E>) -> Result<E, CaseError> {
    match result {
        Ok(value) => Err(CaseError::assertion(format!(
            "expected an error, got Ok({value:?})"
        ))),
        Err(e) => Ok(e),
    }
}

/// 연산이 실패하고 에러 메시지가 `expected`와 같아야 함을 단언합니다.
pub fn expect_err_message<T: Debug, E: Display>(result: Result<T, E>, expected: &str) -> CaseResult {
    let err = expect_err(result)?;
    ensure_eq(err.to_string().as_str(), expected)
}

/// 조건이 거짓이면 케이스를 중단하고 건너뜀으로 보고
pub fn assume(condition: bool, message: impl Into<String>) -> CaseResult {
    if condition {
        Ok(())
    } else {
        Err(CaseError::assumption(message))
    }
}

/// 조건이 참이면 케이스를 중단하고 건너뜀으로 보고
pub fn assume_not(condition: bool, message: impl Into<String>) -> CaseResult {
    assume(!condition, message)
}

/// 조건이 참일 때만 `block`을 실행합니다. 거짓이면 그냥 통과합니다.
pub fn assuming_that(condition: bool, block: impl FnOnce() -> CaseResult) -> CaseResult {
    if condition { block() } else { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_eq_reports_both_values() {
        let err = ensure_eq("Johannes", "Marc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "assertion failed: expected \"Marc\", got \"Johannes\""
        );
    }

    #[test]
    fn ensure_ne_passes_for_different_values() {
        assert!(ensure_ne(1, 42, "Why wouldn't these be the same?").is_ok());
        assert!(ensure_ne(1, 1, "same").is_err());
    }

    #[test]
    fn assert_all_collects_every_failure() {
        let first = "Johannes";
        let last = "Link";
        let checks: Vec<Box<dyn FnOnce() -> CaseResult>> = vec![
            Box::new(move || ensure_eq(first, "Marc")),
            Box::new(move || ensure_eq(last, "Philipp")),
            Box::new(|| ensure(true, "fine")),
        ];
        let err = assert_all("developer", checks).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("developer (2 failures)"));
        assert!(msg.contains("\"Marc\""));
        assert!(msg.contains("\"Philipp\""));
    }

    #[test]
    fn assert_all_passes_when_all_pass() {
        let checks: Vec<Box<dyn FnOnce() -> CaseResult>> =
            vec![Box::new(|| Ok(())), Box::new(|| ensure(true, "x"))];
        assert!(assert_all("group", checks).is_ok());
    }

    #[test]
    fn assert_all_propagates_assumption() {
        let checks: Vec<Box<dyn FnOnce() -> CaseResult>> = vec![
            Box::new(|| ensure(false, "a")),
            Box::new(|| assume(false, "skip")),
        ];
        assert_eq!(
            assert_all("group", checks),
            Err(CaseError::assumption("skip"))
        );
    }

    #[test]
    fn expect_err_returns_the_error() {
        let result: Result<(), String> = Err("This shouldn't happen.".to_owned());
        assert_eq!(expect_err(result).unwrap(), "This shouldn't happen.");
    }

    #[test]
    fn expect_err_fails_on_ok() {
        let result: Result<u8, String> = Ok(3);
        assert!(matches!(
            expect_err(result),
            Err(CaseError::Assertion { .. })
        ));
    }

    #[test]
    fn expect_err_message_compares_display() {
        let result: Result<(), String> = Err("boom".to_owned());
        assert!(expect_err_message(result.clone(), "boom").is_ok());
        assert!(expect_err_message(result, "bang").is_err());
    }

    #[test]
    fn assumptions() {
        assert!(assume(true, "x").is_ok());
        assert_eq!(assume_not(true, "truism"), Err(CaseError::assumption("truism")));
    }

    #[test]
    fn assuming_that_only_runs_when_true() {
        let mut ran = false;
        assert!(assuming_that(false, || {
            ran = true;
            Ok(())
        })
        .is_ok());
        assert!(!ran);
        assert!(assuming_that(true, || ensure(false, "inner")).is_err());
    }
}
