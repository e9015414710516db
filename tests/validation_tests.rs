// Structural validation of test classes as seen through a run.
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use common::{announced_tree, run, trace};
use pretty_assertions::assert_eq;
use varga::prelude::*;
use varga::{VargaError, INITIALIZATION_ERROR};

fn rows(_: &mut ()) -> TestSpecSet<()> {
    specs(|_: &mut (), n: i32| assert!(n > 0), [datum!(1), datum!(2)])
}

#[test]
fn violations_are_reported_instead_of_running_anything() {
    let class = TestClass::<()>::new("Hidden")
        .restricted()
        .test(Declaration::associated("testStatic", || {}))
        .test(Declaration::new("testHidden", rows).restricted());

    let (result, events) = run(class);

    let failures: Vec<_> = trace(&events)
        .into_iter()
        .filter(|line| line.starts_with("failure"))
        .collect();
    assert_eq!(
        failures,
        vec![
            "failure initializationError: Class Hidden should be public",
            "failure initializationError: Method testStatic() should not be static",
            "failure initializationError: Method testHidden() should be public",
        ]
    );
    assert_eq!(result.run_count, 3);

    let tree = announced_tree(&events);
    assert_eq!(tree.test_count(), result.run_count);
    assert!(tree
        .children()
        .iter()
        .all(|d| d.display_name() == INITIALIZATION_ERROR));
}

static STATIC_GENERATIONS: AtomicUsize = AtomicUsize::new(0);

#[test]
fn ignored_and_parameterized_declarations_are_still_validated() {
    let class = TestClass::<()>::new("Mixed")
        .test(Declaration::new("testIgnored", |_: &mut ()| {}).restricted().ignore())
        .test(Declaration::associated("testRows", || {
            STATIC_GENERATIONS.fetch_add(1, Ordering::SeqCst);
            specs(|_: &mut (), _: i32| {}, [datum!(1)])
        }));

    let session = RunSession::with_config(class, RunnerConfig::default().with_colors(false));
    let err = session.validate().unwrap_err();

    assert_eq!(err.class, "Mixed");
    assert_eq!(
        err.violations,
        vec![
            VargaError::MethodNotPublic {
                method: "testIgnored".into()
            },
            VargaError::StaticMethod {
                method: "testRows".into()
            },
        ]
    );
    assert_eq!(err.to_string(), "Test class Mixed failed validation with 2 error(s)");
    // Expansion still runs, once.
    assert_eq!(STATIC_GENERATIONS.load(Ordering::SeqCst), 1);
}

#[test]
fn valid_class_passes_validation() {
    let class = TestClass::<()>::new("Fine").test(Declaration::new("testRows", rows));
    let session = RunSession::new(class);

    assert!(session.validate().is_ok());
    assert!(session.expansion().is_valid());
}
