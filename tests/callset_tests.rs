use std::io::Write;
use trace_trim::callset::{Bound, CallRange, CallSet, Frequency};
use trace_trim::trace::CallFlags;
use trace_trim::utils::error::CallSetError;
use tempfile::NamedTempFile;

/// Membership by brute force over the parsed (start, stop) pairs
fn reference_contains(ranges: &[(u64, Option<u64>)], n: u64) -> bool {
    ranges
        .iter()
        .any(|&(start, stop)| n >= start && stop.map_or(true, |stop| n <= stop))
}

#[test]
fn test_membership_matches_union_of_ranges() {
    let cases: &[(&str, &[(u64, Option<u64>)])] = &[
        ("5", &[(5, Some(5))]),
        ("2-4", &[(2, Some(4))]),
        ("2-4,3-8", &[(2, Some(4)), (3, Some(8))]),
        ("10-,0-1", &[(10, None), (0, Some(1))]),
        ("7,7,7", &[(7, Some(7))]),
        ("0-0,20-30,25", &[(0, Some(0)), (20, Some(30)), (25, Some(25))]),
    ];

    for (text, ranges) in cases {
        let set = CallSet::parse(text).unwrap();
        for n in 0..50 {
            assert_eq!(
                set.contains(n),
                reference_contains(ranges, n),
                "{} contains {}",
                text,
                n
            );
        }
    }
}

#[test]
fn test_range_boundaries_are_inclusive() {
    let set = CallSet::parse("10-20").unwrap();

    assert!(!set.contains(9));
    assert!(set.contains(10));
    assert!(set.contains(20));
    assert!(!set.contains(21));
}

#[test]
fn test_all_matches_everything() {
    let set = CallSet::all();

    assert_eq!(set.last(), Bound::Unbounded);
    assert!(!set.is_empty());
    for n in [0, 1, 1_000, u64::MAX] {
        assert!(set.contains(n));
        assert!(set.contains_with_flags(n, CallFlags::default()));
    }
}

#[test]
fn test_none_matches_nothing() {
    let set = CallSet::from(Frequency::None);

    assert!(set.is_empty());
    assert_eq!(set.last(), Bound::Empty);
    for n in [0, 1, 1_000, u64::MAX] {
        assert!(!set.contains(n));
    }
}

#[test]
fn test_nothing_beyond_last_matches() {
    for text in ["3", "1-9,4", "2-100/7", "0-5/frame"] {
        let set = CallSet::parse(text).unwrap();
        let Bound::Finite(last) = set.last() else {
            panic!("{} should have a finite bound", text);
        };
        for n in last + 1..last + 50 {
            assert!(!set.contains_with_flags(n, CallFlags::END_FRAME));
        }
    }
}

#[test]
fn test_step_ranges() {
    let set = CallSet::parse("3-20/5").unwrap();
    let members: Vec<u64> = (0..30).filter(|&n| set.contains(n)).collect();

    assert_eq!(members, vec![3, 8, 13, 18]);
}

#[test]
fn test_invalid_syntax_is_reported() {
    for text in ["abc", "-3", "4-2", "1,,x", "5/0", "1.5"] {
        let result = CallSet::parse(text);
        assert!(
            matches!(result, Err(CallSetError::InvalidRangeSyntax(_))),
            "{:?} should be invalid",
            text
        );
    }
}

#[test]
fn test_from_str_and_display_round_trip() {
    let set: CallSet = "1,4-9,30-/2,*/frame".parse().unwrap();

    assert_eq!(set.to_string(), "1,4-9,30-/2,*/frame");
    assert_eq!(set.ranges()[1], CallRange::new(4, Some(9)));
}

#[test]
fn test_callset_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# calls worth keeping").unwrap();
    writeln!(file, "5-7, 10").unwrap();
    writeln!(file, "15  # the draw").unwrap();
    file.flush().unwrap();

    let arg = format!("@{}", file.path().display());
    let set = CallSet::parse(&arg).unwrap();

    assert_eq!(set.to_string(), "5-7,10,15");
    assert_eq!(set.last(), Bound::Finite(15));
}

#[test]
fn test_callset_from_missing_file() {
    let result = CallSet::parse("@/definitely/not/here.txt");
    assert!(matches!(result, Err(CallSetError::ReadFailed { .. })));
}
