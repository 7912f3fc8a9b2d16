use kindred_core::{EdgeRejection, KindredError, KindredErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    KindredError::UnknownVertex { vertex: "\"Zed\"".into() },
    KindredErrorCode::UnknownVertex,
    "KINDRED_UNKNOWN_VERTEX",
)]
#[case(
    KindredError::InvalidProbability { value: 1.5 },
    KindredErrorCode::InvalidProbability,
    "KINDRED_INVALID_PROBABILITY",
)]
#[case(
    KindredError::InvalidEdge { vertex: "\"Ann\"".into(), reason: EdgeRejection::SelfLoop },
    KindredErrorCode::InvalidEdge,
    "KINDRED_INVALID_EDGE",
)]
#[case(
    KindredError::InvalidTrialCount,
    KindredErrorCode::InvalidTrialCount,
    "KINDRED_INVALID_TRIAL_COUNT"
)]
#[case(
    KindredError::InvalidDraw { value: 1.0 },
    KindredErrorCode::InvalidDraw,
    "KINDRED_INVALID_DRAW",
)]
#[case(KindredError::EmptyScript, KindredErrorCode::EmptyScript, "KINDRED_EMPTY_SCRIPT")]
#[case(
    KindredError::LockPoisoned { resource: "social network" },
    KindredErrorCode::LockPoisoned,
    "KINDRED_LOCK_POISONED",
)]
fn returns_expected_kindred_code(
    #[case] error: KindredError,
    #[case] expected: KindredErrorCode,
    #[case] stable: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), stable);
    assert_eq!(expected.to_string(), stable);
}

#[rstest]
#[case(
    KindredError::UnknownVertex { vertex: "\"Zed\"".into() },
    "vertex \"Zed\" is not present in the graph",
)]
#[case(
    KindredError::InvalidEdge { vertex: "\"Ann\"".into(), reason: EdgeRejection::SelfLoop },
    "invalid edge at vertex \"Ann\": a vertex cannot be connected to itself",
)]
#[case(
    KindredError::InvalidProbability { value: -0.5 },
    "probability -0.5 is outside the range [0, 1]",
)]
fn renders_readable_messages(#[case] error: KindredError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}
