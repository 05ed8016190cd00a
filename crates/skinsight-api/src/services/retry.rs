//! Attempt policy for detector calls.
//!
//! A small state machine: the policy starts `Pending`, records one outcome
//! per attempt and ends `Succeeded` (at least one attempt produced a result)
//! or `Exhausted` (none did). Every configured attempt runs, so a later
//! attempt can beat an earlier success on confidence. A failed attempt never
//! aborts the loop; only the final state is surfaced.

use std::future::Future;

use skinsight_facepp::FaceppError;
use tracing::warn;

use crate::error::ApiError;

/// Default number of detector calls per upload.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Why an attempt produced no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The detector answered but found no face.
    NoFace,
    /// The detector did not answer in time.
    Timeout,
    /// The detector could not be reached or refused to serve.
    Transport(String),
    /// Anything else.
    Failed(String),
}

impl AttemptFailure {
    /// Convert a terminal failure into the error returned to the client.
    pub fn into_api_error(self) -> ApiError {
        match self {
            AttemptFailure::NoFace => ApiError::NoFaceDetected(
                "No face detected in image. Please ensure face is clearly visible.".to_string(),
            ),
            AttemptFailure::Timeout => {
                ApiError::Timeout("Analysis timeout. Please try again.".to_string())
            }
            AttemptFailure::Transport(msg) => ApiError::ServiceUnavailable(msg),
            AttemptFailure::Failed(msg) => {
                ApiError::internal(format!("All analysis attempts failed: {}", msg))
            }
        }
    }

    /// Short label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptFailure::NoFace => "no_face",
            AttemptFailure::Timeout => "timeout",
            AttemptFailure::Transport(_) => "transport",
            AttemptFailure::Failed(_) => "failed",
        }
    }
}

impl From<&FaceppError> for AttemptFailure {
    fn from(e: &FaceppError) -> Self {
        if e.is_timeout() {
            AttemptFailure::Timeout
        } else if e.is_transport() {
            AttemptFailure::Transport(e.to_string())
        } else {
            AttemptFailure::Failed(e.to_string())
        }
    }
}

/// Result of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    Failure(AttemptFailure),
}

/// Where the policy is after some number of attempts.
#[derive(Debug)]
pub enum RetryState<T> {
    Pending {
        attempts: u32,
        successes: Vec<T>,
        last_failure: Option<AttemptFailure>,
    },
    Succeeded {
        attempts: u32,
        successes: Vec<T>,
    },
    Exhausted {
        attempts: u32,
        failure: AttemptFailure,
    },
}

impl<T> RetryState<T> {
    pub fn start() -> Self {
        RetryState::Pending {
            attempts: 0,
            successes: Vec::new(),
            last_failure: None,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryState::Pending { attempts, .. }
            | RetryState::Succeeded { attempts, .. }
            | RetryState::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RetryState::Pending { .. })
    }

    /// Record one attempt outcome. Terminal states are returned unchanged.
    pub fn record(self, outcome: AttemptOutcome<T>, policy: &RetryPolicy) -> Self {
        let (attempts, mut successes, mut last_failure) = match self {
            RetryState::Pending {
                attempts,
                successes,
                last_failure,
            } => (attempts, successes, last_failure),
            terminal => return terminal,
        };

        let attempts = attempts + 1;
        match outcome {
            AttemptOutcome::Success(value) => successes.push(value),
            AttemptOutcome::Failure(failure) => {
                warn!(
                    attempt = attempts,
                    reason = failure.as_str(),
                    "Analysis attempt failed"
                );
                last_failure = Some(failure);
            }
        }

        if attempts < policy.max_attempts() {
            return RetryState::Pending {
                attempts,
                successes,
                last_failure,
            };
        }

        if successes.is_empty() {
            RetryState::Exhausted {
                attempts,
                failure: last_failure.unwrap_or_else(|| {
                    AttemptFailure::Failed("no attempt produced a result".to_string())
                }),
            }
        } else {
            RetryState::Succeeded {
                attempts,
                successes,
            }
        }
    }
}

/// How many times to call the detector.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Drive `attempt` (called with the 1-based attempt number) to a
    /// terminal state. Returns every successful result in attempt order, or
    /// the last failure when there were none.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<Vec<T>, AttemptFailure>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AttemptOutcome<T>>,
    {
        let mut state = RetryState::start();

        loop {
            state = match state {
                RetryState::Succeeded { successes, .. } => return Ok(successes),
                RetryState::Exhausted { failure, .. } => return Err(failure),
                pending => {
                    let outcome = attempt(pending.attempts() + 1).await;
                    pending.record(outcome, self)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn fail(f: AttemptFailure) -> AttemptOutcome<u32> {
        AttemptOutcome::Failure(f)
    }

    #[test]
    fn test_policy_minimum_one_attempt() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 2);
    }

    #[test]
    fn test_state_stays_pending_until_last_attempt() {
        let policy = RetryPolicy::new(2);
        let state = RetryState::start().record(AttemptOutcome::Success(1), &policy);
        assert!(!state.is_terminal());
        assert_eq!(state.attempts(), 1);

        let state = state.record(fail(AttemptFailure::NoFace), &policy);
        match state {
            RetryState::Succeeded {
                attempts,
                successes,
            } => {
                assert_eq!(attempts, 2);
                assert_eq!(successes, vec![1]);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_keeps_last_failure() {
        let policy = RetryPolicy::new(2);
        let state = RetryState::<u32>::start()
            .record(fail(AttemptFailure::NoFace), &policy)
            .record(fail(AttemptFailure::Timeout), &policy);

        match state {
            RetryState::Exhausted { attempts, failure } => {
                assert_eq!(attempts, 2);
                assert_eq!(failure, AttemptFailure::Timeout);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_terminal_state_ignores_further_outcomes() {
        let policy = RetryPolicy::new(1);
        let state = RetryState::start().record(AttemptOutcome::Success(7), &policy);
        let state = state.record(fail(AttemptFailure::NoFace), &policy);
        assert!(matches!(state, RetryState::Succeeded { attempts: 1, .. }));
    }

    #[tokio::test]
    async fn test_run_calls_every_attempt() {
        let policy = RetryPolicy::new(2);
        let mut seen = Vec::new();

        let result = policy
            .run(|attempt| {
                seen.push(attempt);
                async move { AttemptOutcome::Success(attempt * 10) }
            })
            .await;

        assert_eq!(result, Ok(vec![10, 20]));
        assert_eq!(seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_run_recovers_after_failure() {
        let policy = RetryPolicy::new(2);
        let result = policy
            .run(|attempt| async move {
                if attempt == 1 {
                    AttemptOutcome::Failure(AttemptFailure::Transport("reset".into()))
                } else {
                    AttemptOutcome::Success(attempt)
                }
            })
            .await;

        assert_eq!(result, Ok(vec![2]));
    }

    #[tokio::test]
    async fn test_run_exhausted() {
        let policy = RetryPolicy::new(2);
        let result: Result<Vec<u32>, _> = policy
            .run(|_| async { AttemptOutcome::Failure(AttemptFailure::NoFace) })
            .await;

        assert_eq!(result, Err(AttemptFailure::NoFace));
    }

    #[test]
    fn test_failure_to_api_error() {
        assert_eq!(
            AttemptFailure::NoFace.into_api_error().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AttemptFailure::Timeout.into_api_error().status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            AttemptFailure::Transport("down".into())
                .into_api_error()
                .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let err = AttemptFailure::Failed("bad json".into()).into_api_error();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("All analysis attempts failed: bad json"));
    }

    #[test]
    fn test_throttled_detector_is_service_unavailable() {
        let err = FaceppError::from_http_status(403, "CONCURRENCY_LIMIT_EXCEEDED");
        let failure = AttemptFailure::from(&err);
        assert!(matches!(failure, AttemptFailure::Transport(_)));
        assert_eq!(
            failure.into_api_error().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_failure_from_detector_error() {
        assert_eq!(
            AttemptFailure::from(&FaceppError::Timeout(30)),
            AttemptFailure::Timeout
        );
        assert!(matches!(
            AttemptFailure::from(&FaceppError::ServiceUnavailable("x".into())),
            AttemptFailure::Transport(_)
        ));
        assert!(matches!(
            AttemptFailure::from(&FaceppError::InvalidResponse("x".into())),
            AttemptFailure::Failed(_)
        ));
    }
}
