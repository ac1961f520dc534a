use crate::{
    data::{ProfileRepository, ProfileStore},
    error::{verification::VerificationError, AppError},
    model::{audit::AuditKind, profile::NO_PENDING_CODE},
    service::test::fake::{FakeDirectory, FakeMailer, Fakes, AFFILIATION_ROLE},
};
use test_utils::{builder::TestBuilder, factory};

mod start;

/// Asserts that `result` failed with the given verification outcome.
fn assert_verification_err<T: std::fmt::Debug>(
    result: Result<T, AppError>,
    expected: VerificationError,
) {
    match result {
        Err(AppError::VerificationErr(err)) => assert_eq!(err, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
