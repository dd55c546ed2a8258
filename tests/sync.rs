//! Synchronous wrapper behavior.

use catch_this::{catch, run, throw, Error, Outcome, StringError};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq)]
#[error("timed out after {0}ms")]
struct Timeout(u64);

#[derive(Debug, ThisError)]
enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Timeout(#[from] Timeout),
}

fn fetch(key: &str) -> Result<String, FetchError> {
    match key {
        "slow" => Err(Timeout(250).into()),
        "home" => Ok("/home".to_string()),
        other => Err(FetchError::NotFound(other.to_string())),
    }
}

// ============================================================
// Success payloads
// ============================================================

#[test]
fn every_value_is_a_success() {
    assert_eq!(run(|| 0).value(), Some(&0));
    assert_eq!(run(|| false).value(), Some(&false));
    assert_eq!(run(|| "").value(), Some(&""));
    assert_eq!(run(|| ()).value(), Some(&()));
    assert_eq!(run(|| None::<u8>).value(), Some(&None));

    for outcome in [run(|| 0), run(|| 1), run(|| -1)] {
        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }
}

#[test]
fn returned_error_value_is_not_a_failure() {
    let outcome = run(|| Timeout(5));
    assert!(outcome.is_success());
    assert_eq!(outcome.value(), Some(&Timeout(5)));

    // A Result returned from `run` is a payload too; `catch` is what reads it.
    let outcome = run(|| fetch("nowhere"));
    assert!(outcome.is_success());
    assert!(outcome.value().unwrap().is_err());
}

// ============================================================
// Failures
// ============================================================

#[test]
fn panics_are_contained() {
    let outcome = run(|| -> u8 { panic!("disk on fire") });
    assert!(outcome.is_failure());
    assert!(!outcome.is_success());
    assert!(outcome.value().is_none());
    assert_eq!(outcome.error().unwrap().message(), "disk on fire");
    assert!(outcome.error().unwrap().is::<StringError>());
}

#[test]
fn non_string_panic_payloads_are_coerced() {
    let outcome = run(|| -> u8 { panic::panic_any(404_u16) });
    assert_eq!(outcome.error().unwrap().message(), "Box<dyn Any>");
}

#[test]
fn structured_errors_keep_their_kind() {
    let outcome = catch(|| fetch("slow"));
    let err = outcome.error().unwrap();
    assert!(err.is::<FetchError>());
    assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::Timeout(Timeout(250)))));
    assert_eq!(err.message(), "timed out after 250ms");
    assert_eq!(err.kind(), Some(std::any::type_name::<FetchError>()));
}

#[test]
fn question_mark_raises_inside_catch() {
    let outcome = catch(|| {
        let home = fetch("home")?;
        let missing = fetch("missing")?;
        Ok::<_, Error>(format!("{home}{missing}"))
    });
    assert_eq!(outcome.error().unwrap().message(), "not found: missing");
}

#[test]
fn throw_macro_raises_messages_and_values() {
    let outcome = catch(|| -> Result<(), Error> { throw!("quota {} exceeded", 3) });
    assert_eq!(outcome.error().unwrap().message(), "quota 3 exceeded");
    assert!(outcome.error().unwrap().kind().is_none());

    let outcome = catch(|| -> Result<(), Error> { throw!(Timeout(9)) });
    assert_eq!(outcome.error().unwrap().downcast_ref::<Timeout>(), Some(&Timeout(9)));
}

// ============================================================
// Unwrapping
// ============================================================

#[test]
fn unwrap_returns_payload() {
    assert_eq!(run(|| 5).unwrap(), 5);
}

#[test]
fn unwrap_raises_the_stored_error() {
    let failed = catch(|| Err::<u8, _>(io::Error::new(io::ErrorKind::TimedOut, "slow")));
    let original = failed.error().unwrap().clone();

    let payload = panic::catch_unwind(AssertUnwindSafe(move || failed.unwrap())).unwrap_err();
    let raised = payload.downcast::<Error>().unwrap();
    assert!(raised.ptr_eq(&original));
    assert!(raised.is::<io::Error>());
}

#[test]
fn unwrap_inside_run_is_recaptured_unchanged() {
    let inner = catch(|| fetch("slow"));
    let original = inner.error().unwrap().clone();

    let outer = run(move || inner.unwrap());
    assert!(outer.error().unwrap().ptr_eq(&original));
}

#[test]
fn unwrap_or_only_looks_at_the_variant() {
    assert_eq!(run(|| 0).unwrap_or(99), 0);
    assert_eq!(run(|| None).unwrap_or(Some(1)), None);
    assert_eq!(run(|| -> i32 { panic!() }).unwrap_or(99), 99);
    assert_eq!(catch(|| fetch("x")).unwrap_or_default(), "");
}

// ============================================================
// Chaining
// ============================================================

#[test]
fn or_chain_stops_at_first_success() {
    let mut attempts = Vec::new();
    let value = run(|| -> i32 { panic!("e1") })
        .or(|| {
            attempts.push("second");
            panic!("e2")
        })
        .or(|| {
            attempts.push("third");
            42
        })
        .or(|| {
            attempts.push("fourth");
            7
        })
        .unwrap_or(-1);

    assert_eq!(value, 42);
    assert_eq!(attempts, ["second", "third"]);
}

#[test]
fn or_catch_takes_fallible_alternatives() {
    let path = catch(|| fetch("missing"))
        .or_catch(|| fetch("slow"))
        .or_catch(|| fetch("home"));
    assert_eq!(path.unwrap(), "/home");

    let exhausted = catch(|| fetch("a")).or_catch(|| fetch("b"));
    assert_eq!(exhausted.error().unwrap().message(), "not found: b");
}

// ============================================================
// Views
// ============================================================

#[test]
fn positional_and_named_views_agree() {
    let outcomes: Vec<Outcome<u8>> = vec![run(|| 1), run(|| -> u8 { panic!("x") })];
    for outcome in &outcomes {
        let (value, error) = outcome.to_pair();
        assert_eq!(value, outcome.value());
        assert_eq!(error.map(Error::message), outcome.error().map(Error::message));
        assert_ne!(value.is_some(), error.is_some());
    }

    let (value, error) = run(|| -> u8 { panic!("x") }).into_pair();
    assert!(value.is_none());
    assert_eq!(error.unwrap().message(), "x");
}

#[test]
fn display_rendering() {
    assert_eq!(run(|| 42).to_string(), "Result.Ok(42)");
    assert_eq!(run(|| -> u8 { panic!("boom") }).to_string(), "Result.Error(boom)");
}

#[test]
fn narrowing_by_match() {
    match catch(|| fetch("home")) {
        Outcome::Ok(path) => assert_eq!(path, "/home"),
        Outcome::Err(e) => panic!("unexpected: {e}"),
    }
}
