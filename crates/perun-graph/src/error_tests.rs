//! Tests for the error taxonomy.

use crate::error::{Error, ErrorKind};

#[test]
fn test_kind_matches_variant() {
    let cases: Vec<(Error<i64>, ErrorKind)> = vec![
        (Error::VertexAlreadyExists { key: 1 }, ErrorKind::VertexAlreadyExists),
        (Error::VertexNotFound { key: 1 }, ErrorKind::VertexNotFound),
        (
            Error::EdgeAlreadyExists { source: 1, target: 2 },
            ErrorKind::EdgeAlreadyExists,
        ),
        (
            Error::EdgeNotFound { source: 1, target: 2 },
            ErrorKind::EdgeNotFound,
        ),
        (
            Error::VertexHasEdges { key: 1, count: 3 },
            ErrorKind::VertexHasEdges,
        ),
        (
            Error::EdgeCausesCycle { source: 1, target: 2 },
            ErrorKind::EdgeCausesCycle,
        ),
        (
            Error::UpdateChangedKey { old: 1, new: 2 },
            ErrorKind::UpdateChangedKey,
        ),
        (Error::TargetNotReachable, ErrorKind::TargetNotReachable),
        (Error::NegativeCycle, ErrorKind::NegativeCycle),
        (Error::GraphHasCycle, ErrorKind::GraphHasCycle),
        (Error::EmptyStack, ErrorKind::EmptyStack),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind);
        assert!(error.is_kind(kind));
    }
}

#[test]
fn test_is_kind_rejects_other_kinds() {
    let error: Error<i64> = Error::VertexNotFound { key: 7 };
    assert!(!error.is_kind(ErrorKind::EdgeNotFound));
}

#[test]
fn test_display_carries_keys() {
    let error: Error<&str> = Error::EdgeNotFound {
        source: "A",
        target: "B",
    };
    let message = error.to_string();
    assert!(message.contains("\"A\""));
    assert!(message.contains("\"B\""));

    let error: Error<i64> = Error::VertexHasEdges { key: 3, count: 2 };
    assert!(error.to_string().contains('3'));
    assert!(error.to_string().contains('2'));
}

#[test]
fn test_errors_are_comparable() {
    let a: Error<i64> = Error::VertexNotFound { key: 1 };
    let b: Error<i64> = Error::VertexNotFound { key: 1 };
    let c: Error<i64> = Error::VertexNotFound { key: 2 };
    assert_eq!(a, b);
    assert_ne!(a, c);
}
