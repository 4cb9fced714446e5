//! Algorithm Candidates
//!
//! A candidate pairs a unique name with the routine under measurement. The
//! routine receives the input size and the call index within the current
//! size window, and completes with `Ok(())` or a `RoutineError`.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a candidate routine
#[derive(Debug, Clone, Error)]
pub enum RoutineError {
    /// The routine returned an error
    #[error("{0}")]
    Failed(String),
    /// The routine panicked
    #[error("panicked: {0}")]
    Panicked(String),
}

impl RoutineError {
    /// Create a failure from any displayable message
    pub fn new(message: impl std::fmt::Display) -> Self {
        RoutineError::Failed(message.to_string())
    }

    /// Convert a panic payload into an error
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        RoutineError::Panicked(message)
    }
}

/// Boxed completion of one routine invocation
pub type RoutineFuture = BoxFuture<'static, Result<(), RoutineError>>;

/// Routine signature: `(size, call_index) -> completion`
pub type RoutineFn = Arc<dyn Fn(usize, usize) -> RoutineFuture + Send + Sync>;

/// A named routine under measurement
#[derive(Clone)]
pub struct AlgorithmCandidate {
    name: String,
    routine: RoutineFn,
}

impl AlgorithmCandidate {
    /// Create a candidate from an async routine
    ///
    /// ```ignore
    /// let sleepy = AlgorithmCandidate::new("sleepy", |size, _call| async move {
    ///     tokio::time::sleep(Duration::from_micros(size as u64)).await;
    ///     Ok(())
    /// });
    /// ```
    pub fn new<F, Fut>(name: impl Into<String>, routine: F) -> Self
    where
        F: Fn(usize, usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RoutineError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            routine: Arc::new(move |size: usize, call: usize| -> RoutineFuture {
                Box::pin(routine(size, call))
            }),
        }
    }

    /// Create a candidate from a synchronous routine.
    ///
    /// The return value is passed through `black_box` so the work cannot be
    /// optimized away.
    pub fn from_fn<F, T>(name: impl Into<String>, routine: F) -> Self
    where
        F: Fn(usize, usize) -> T + Send + Sync + 'static,
    {
        let routine = Arc::new(routine);
        Self::new(name, move |size, call| {
            let routine = Arc::clone(&routine);
            async move {
                std::hint::black_box(routine(size, call));
                Ok(())
            }
        })
    }

    /// Create a candidate from a synchronous routine that may fail
    pub fn fallible<F>(name: impl Into<String>, routine: F) -> Self
    where
        F: Fn(usize, usize) -> Result<(), RoutineError> + Send + Sync + 'static,
    {
        let routine = Arc::new(routine);
        Self::new(name, move |size, call| {
            let routine = Arc::clone(&routine);
            async move { routine(size, call) }
        })
    }

    /// Candidate name (unique within a run)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start one invocation of the routine
    pub(crate) fn invoke(&self, size: usize, call: usize) -> RoutineFuture {
        (self.routine)(size, call)
    }
}

impl std::fmt::Debug for AlgorithmCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmCandidate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
