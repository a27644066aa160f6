// tests/combinator_tests.rs
//
// Rollback, short-circuit, repetition, and lookahead behavior of the
// combinator set.

use cutpeg::Session;

#[test]
fn failing_match_restores_the_cursor() {
    let mut s = Session::new("hello");
    assert!(s.literal("he").is_some());
    let before = s.offset();
    assert!(s.sequence(|s| s.literal("llx")).is_none());
    assert_eq!(s.offset(), before);
}

#[test]
fn sequence_commits_no_intermediate_offsets() {
    let mut s = Session::new("hello");
    let matched = s.sequence(|s| {
        s.literal("he")?;
        s.literal("ll")?;
        s.literal("zzz")?;
        Some(())
    });
    assert!(matched.is_none());
    assert_eq!(s.offset(), 0);
}

#[test]
fn sequence_short_circuits_after_the_first_failure() {
    let mut s = Session::new("hello");
    let mut second_step_ran = false;
    let matched = s.sequence(|s| {
        s.literal("xx")?;
        second_step_ran = true;
        s.literal("he")?;
        Some(())
    });
    assert!(matched.is_none());
    assert!(!second_step_ran);
    assert_eq!(s.offset(), 0);
}

#[test]
fn successful_sequence_advances_past_all_steps() {
    let mut s = Session::new("hello");
    let matched = s.sequence(|s| {
        s.literal("he")?;
        s.literal("llo")?;
        Some(())
    });
    assert!(matched.is_some());
    assert_eq!(s.offset(), 5);
}

#[test]
fn optional_always_succeeds() {
    let mut s = Session::new("hello");
    assert_eq!(s.optional(|s| s.literal("he")), Some(Some(())));
    assert_eq!(s.offset(), 2);
    assert_eq!(s.optional(|s| s.literal("zz")), Some(None));
    assert_eq!(s.offset(), 2);
}

#[test]
fn optional_preserves_the_failed_attempts_record() {
    let mut s = Session::new("hello");
    assert_eq!(s.optional(|s| s.literal("zz")), Some(None));
    let failure = s.failure().expect("the skipped step's failure is kept");
    assert_eq!(failure.offset, 0);
}

#[test]
fn bounded_repetition_stops_at_max() {
    let mut s = Session::new("hello");
    let items = s.repeat(1, Some(3), |s, _| s.pattern("[helo]"));
    assert_eq!(items, Some(vec!["h", "e", "l"]));
    assert_eq!(s.offset(), 3);
}

#[test]
fn unbounded_repetition_consumes_everything_it_can() {
    let mut s = Session::new("hello");
    let items = s.repeat(0, None, |s, _| s.pattern("[helo]"));
    assert_eq!(items, Some(vec!["h", "e", "l", "l", "o"]));
    assert_eq!(s.offset(), 5);
}

#[test]
fn zero_match_repetition_succeeds_without_residue() {
    let mut s = Session::new("zelo");
    let items = s.repeat(0, None, |s, _| s.pattern("[helo]"));
    assert_eq!(items, Some(vec![]));
    assert_eq!(s.offset(), 0);
    assert!(s.failure().is_none(), "no failure record may survive");
}

#[test]
fn underfull_repetition_rolls_back_entirely() {
    let mut s = Session::new("heZZZ");
    let items = s.repeat(3, None, |s, _| s.pattern("[helo]"));
    assert!(items.is_none());
    assert_eq!(s.offset(), 0);
    assert_eq!(s.failure().expect("sub-failure survives").offset, 2);
}

#[test]
fn repetition_passes_a_first_iteration_flag() {
    let mut s = Session::new("a,b,c");
    let items = s.repeat(1, None, |s, first| {
        s.sequence(|s| {
            if !first {
                s.literal(",")?;
            }
            s.pattern("[a-z]")
        })
    });
    assert_eq!(items, Some(vec!["a", "b", "c"]));
    assert_eq!(s.offset(), 5);
}

#[test]
#[should_panic(expected = "malformed repetition bounds")]
fn inverted_repetition_bounds_are_a_grammar_defect() {
    let mut s = Session::new("hello");
    let _ = s.repeat(3, Some(1), |s, _| s.any_char());
}

#[test]
fn negative_lookahead_consumes_nothing_and_leaves_no_residue() {
    let mut s = Session::new("hello");
    assert!(s.lookahead(false, |s| s.pattern("[va]+")).is_some());
    assert_eq!(s.offset(), 0);
    assert!(s.literal("hell").is_some());
    assert_eq!(s.offset(), 4);
    assert!(s.failure().is_none());
}

#[test]
fn positive_lookahead_consumes_nothing_on_success() {
    let mut s = Session::new("hello");
    assert!(s.lookahead(true, |s| s.literal("hel")).is_some());
    assert_eq!(s.offset(), 0);
}

#[test]
fn failed_lookahead_records_at_its_own_offset() {
    let mut s = Session::new("hello");
    assert!(s.literal("he").is_some());
    assert!(s.lookahead(true, |s| s.literal("zzz")).is_none());
    assert_eq!(s.offset(), 2);
    assert_eq!(s.failure().expect("lookahead failure").offset, 2);
}

#[test]
fn any_char_fails_at_end_of_input() {
    let mut s = Session::new("h");
    assert_eq!(s.any_char(), Some('h'));
    assert!(s.any_char().is_none());
    assert_eq!(s.offset(), 1);
}

#[test]
fn any_char_consumes_a_whole_multibyte_character() {
    let mut s = Session::new("héllo");
    assert_eq!(s.any_char(), Some('h'));
    assert_eq!(s.any_char(), Some('é'));
    assert_eq!(s.offset(), 3);
    assert_eq!(s.char_offset(), 2);
}

#[test]
fn capture_text_returns_the_consumed_slice() {
    let mut s = Session::new("hello world");
    let text = s.capture_text(|s| {
        s.literal("hello")?;
        s.literal(" ")?;
        Some(())
    });
    assert_eq!(text, Some("hello "));
    assert_eq!(s.offset(), 6);
}

#[test]
fn capture_bounds_returns_the_consumed_span() {
    let mut s = Session::new("hello");
    assert!(s.literal("h").is_some());
    let bounds = s.capture_bounds(|s| s.literal("ell"));
    assert_eq!(bounds, Some(1..4));
}

#[test]
fn capture_propagates_failure_untouched() {
    let mut s = Session::new("hello");
    assert!(s.capture_text(|s| s.literal("zz")).is_none());
    assert_eq!(s.offset(), 0);
    assert_eq!(s.failure().expect("failure propagates").offset, 0);
}

#[test]
fn choice_returns_the_first_success() {
    let mut s = Session::new("hello");
    let matched = s.choice(&mut [
        &mut |s: &mut Session| s.literal("sky").map(|_| "sky"),
        &mut |s: &mut Session| s.literal("hell").map(|_| "hell"),
    ]);
    assert_eq!(matched, Some("hell"));
    assert_eq!(s.offset(), 4);
}

#[test]
fn failing_choice_restores_the_start_offset() {
    let mut s = Session::new("hello");
    let matched = s.choice(&mut [
        &mut |s: &mut Session| s.literal("sky"),
        &mut |s: &mut Session| s.literal("halo"),
    ]);
    assert!(matched.is_none());
    assert_eq!(s.offset(), 0);
}

#[test]
fn a_false_like_payload_is_still_a_success() {
    let mut s = Session::new("hello");
    let matched = s.sequence(|s| {
        s.literal("he")?;
        Some(false)
    });
    assert_eq!(matched, Some(false));
    assert_eq!(s.offset(), 2);
}

#[test]
fn eof_matches_only_at_end_of_input() {
    let mut s = Session::new("hi");
    assert!(s.eof().is_none());
    assert!(s.literal("hi").is_some());
    assert!(s.eof().is_some());
    assert_eq!(s.offset(), 2);
}
