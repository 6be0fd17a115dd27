//! Built-in sample suites registered by the CLI
//!
//! - `before-all-sample`: setup and teardown bracketing two logging cases
//! - `property-injection-sample`: `some.key` set in setup and injected into a case
//! - `feature-tour`: display names, disabled cases, assumptions, grouped
//!   assertions, expected errors and per-case hooks

use tracing::info;

use suitehook_core::assertions::{
    assert_all, assume, assume_not, assuming_that, ensure, ensure_eq, ensure_ne,
    expect_err_message,
};
use suitehook_core::error::{CaseError, CaseResult, SuiteError};
use suitehook_core::{Suite, SuiteRegistry, TestCase};

pub const BEFORE_ALL_SAMPLE: &str = "before-all-sample";
pub const PROPERTY_INJECTION_SAMPLE: &str = "property-injection-sample";
pub const FEATURE_TOUR: &str = "feature-tour";

/// Property key set by the injection sample's setup.
pub const SOME_KEY: &str = "some.key";
pub const SOME_VALUE: &str = "some-value";

const STARTED_KEY: &str = "lifecycle.started";

/// Build a registry containing every built-in suite.
pub fn registry() -> Result<SuiteRegistry, SuiteError> {
    let mut registry = SuiteRegistry::new();
    registry.register(Box::new(before_all_sample()?))?;
    registry.register(Box::new(property_injection_sample()?))?;
    registry.register(Box::new(feature_tour()?))?;
    Ok(registry)
}

pub fn before_all_sample() -> Result<Suite, SuiteError> {
    Suite::builder(BEFORE_ALL_SAMPLE)
        .display_name("BeforeAll lifecycle")
        .description("setup runs once before both cases, teardown once after them")
        .setup(|store| {
            info!("beforeAll");
            store.set(STARTED_KEY, "true")?;
            Ok(())
        })
        .teardown(|store| {
            info!("afterAll");
            store.clear(STARTED_KEY);
            Ok(())
        })
        .case("aTest1", |_, ctx| {
            info!(case = ctx.case(), "aTest1");
            ensure_eq(ctx.provider().resolve(STARTED_KEY)?.as_str(), "true")
        })
        .case("aTest2", |_, ctx| {
            info!(case = ctx.case(), "aTest2");
            ensure(
                ctx.properties().contains(STARTED_KEY),
                "setup did not run before aTest2",
            )
        })
        .build()
}

pub fn property_injection_sample() -> Result<Suite<String>, SuiteError> {
    Suite::builder_with_fixture(PROPERTY_INJECTION_SAMPLE, |p| p.resolve(SOME_KEY))
        .display_name("Property injection")
        .description("a value stored in setup is injected into the case fixture")
        .setup(|store| {
            store.set(SOME_KEY, SOME_VALUE)?;
            Ok(())
        })
        .teardown(|store| {
            store.clear(SOME_KEY);
            Ok(())
        })
        .case("validate_properties", |some_key: &mut String, _| {
            info!(value = some_key.as_str(), "injected");
            ensure_eq(some_key.as_str(), SOME_VALUE)
        })
        .build()
}

/// A developer as seen by the grouped-assertion case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    first_name: String,
    last_name: String,
}

impl Developer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

#[derive(Debug, thiserror::Error)]
#[error("This shouldn't happen.")]
pub struct UnitFailure;

/// Operation that always fails, used by the expected-error case.
fn method_under_test() -> Result<(), UnitFailure> {
    Err(UnitFailure)
}

fn truism() -> bool {
    true
}

/// Grouped check that the developer carries the expected names.
pub fn check_developer(dev: &Developer, first: &str, last: &str) -> CaseResult {
    let checks: Vec<Box<dyn FnOnce() -> CaseResult + '_>> = vec![
        Box::new(|| ensure_eq(dev.first_name(), first)),
        Box::new(|| ensure_eq(dev.last_name(), last)),
    ];
    assert_all("developer", checks)
}

pub fn feature_tour() -> Result<Suite<Developer>, SuiteError> {
    Suite::builder_with_fixture(FEATURE_TOUR, |p| {
        Ok(Developer::new(
            p.resolve_or("developer.first_name", "Johannes"),
            p.resolve_or("developer.last_name", "Link"),
        ))
    })
    .display_name("A special test case")
    .description("display names, disabled cases, assumptions and grouped assertions")
    .setup(|_| {
        info!("initializing external resources");
        Ok(())
    })
    .before_each(|_, ctx| {
        info!(case = ctx.case(), "initializing mock objects");
        Ok(())
    })
    .after_each(|_, ctx| {
        info!(case = ctx.case(), "tearing down");
        Ok(())
    })
    .teardown(|_| {
        info!("freeing external resources");
        Ok(())
    })
    .test_case(
        TestCase::new("some_test", |_, _| ensure(true, "always holds"))
            .display_name("╯°□°）╯"),
    )
    .test_case(
        TestCase::new("other_test", |_, _| {
            assume(true, "assumed true")?;
            ensure_ne(1, 42, "Why wouldn't these be the same?")
        })
        .display_name("😱"),
    )
    .test_case(
        TestCase::new("disabled_test", |_, _| {
            Err(CaseError::other("a disabled case must never run"))
        })
        .disabled("kept to show disabled reporting"),
    )
    .case("assert_related_properties", |dev: &mut Developer, _| {
        check_developer(dev, "Johannes", "Link")
    })
    .case("assert_exceptions", |_, _| {
        expect_err_message(method_under_test(), "This shouldn't happen.")
    })
    .case("exit_if_false_is_true", |_, _| {
        assume(false, "false is not true")?;
        Err(CaseError::other("body continued after a failed assumption"))
    })
    .case("exit_if_true_is_false", |_, _| {
        assume_not(truism(), "truism holds")?;
        Err(CaseError::other("body continued after a failed assumption"))
    })
    .case("exit_if_null_equals_string", |_, _| {
        let nothing: Option<&str> = None;
        assuming_that(nothing == Some("null"), || {
            Err(CaseError::other("assumption block ran on a false condition"))
        })
    })
    .case("call_of_the_lambda", |_, _| {
        let check = || ensure(true, "always holds");
        check()
    })
    .build()
}
