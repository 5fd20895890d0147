use std::collections::HashMap;

use verity::testing::Recorder;
use verity::{message, require, Severity, Tester};

#[test]
fn test_passing_checks_continue() {
    let t = Recorder::new();
    let mut reached = false;

    let aborted = t.run(|t| {
        require::equal(t, &vec![1, 2], &[1, 2], ());
        require::not_equal(t, &1, &2, ());
        require::nil(t, &None::<u8>, ());
        require::not_nil(t, &Some(0u8), ());
        require::is_true(t, true, ());
        require::is_false(t, false, ());
        require::error(t, &"x".parse::<u32>(), ());
        require::no_error(t, &"1".parse::<u32>(), ());
        require::panics(t, || panic!("expected"), ());
        require::empty(t, &HashMap::<u8, u8>::new(), ());
        require::len(t, "abc", 3, ());
        reached = true;
    });

    assert!(!aborted);
    assert!(reached);
    assert!(t.reports().is_empty());
}

#[test]
fn test_failure_aborts() {
    let t = Recorder::new();
    let mut reached = false;

    let aborted = t.run(|t| {
        require::equal(t, &1, &2, ());
        reached = true;
    });

    assert!(aborted);
    assert!(!reached);

    let reports = t.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, Severity::Fatal);
    assert_eq!(reports[0].message, "not equal:\nexpected: 1\nactual:   2");
}

#[test]
fn test_every_check_aborts() {
    fn aborts(body: impl FnOnce(&Recorder)) -> String {
        let t = Recorder::new();
        assert!(t.run(body));
        assert_eq!(t.errors(), 0);
        assert_eq!(t.fatals(), 1);
        t.reports().remove(0).message
    }

    assert_eq!(
        aborts(|t| require::not_equal(t, "a", "a", ())),
        "should not be equal: \"a\""
    );
    assert_eq!(
        aborts(|t| require::nil(t, &Some(1), ())),
        "expected nil, got: Some(1)"
    );
    assert_eq!(
        aborts(|t| require::not_nil(t, &None::<i32>, ())),
        "expected not nil"
    );
    assert_eq!(
        aborts(|t| require::is_true(t, false, ())),
        "expected true, got false"
    );
    assert_eq!(
        aborts(|t| require::is_false(t, true, ())),
        "expected false, got true"
    );
    assert_eq!(
        aborts(|t| require::error(t, &"1".parse::<u32>(), ())),
        "expected error, got nil"
    );
    assert_eq!(
        aborts(|t| require::panics(t, || {}, ())),
        "expected panic, but function did not panic"
    );
    assert_eq!(
        aborts(|t| require::empty(t, "x", ())),
        "expected empty, got: \"x\""
    );
    assert_eq!(
        aborts(|t| require::len(t, &[1, 2, 3], 2, message!("items %v", [1, 2, 3]))),
        "unexpected length, expected 2 got 3: items [1 2 3]"
    );
}

#[test]
fn test_no_error_reports_the_error() {
    let t = Recorder::new();

    let aborted = t.run(|t| {
        require::no_error(t, &"x".parse::<u32>(), "parsing");
    });

    assert!(aborted);
    assert_eq!(
        t.reports()[0].message,
        "expected no error, got: invalid digit found in string: parsing"
    );
}

#[test]
fn test_tester_passes() {
    let t = Tester::new();
    require::len(&t, &vec![0; 4], 4, ());
    require::empty(&t, &Some(""), ());
}

#[test]
#[should_panic(expected = "expected empty, got: [1]: list should be drained")]
fn test_tester_aborts() {
    let t = Tester::new();
    require::empty(&t, &vec![1], "list should be drained");
    unreachable!();
}
