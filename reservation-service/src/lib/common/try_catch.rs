use std::fmt;
use std::future::Future;

type ErrorMapper<E> = Box<dyn FnOnce(&E) -> Option<E> + Send>;

/// Options for [`try_catch`].
///
/// Both hooks are optional: without a context nothing is logged, without a
/// mapper the original error is returned untouched.
pub struct TryCatchOptions<E> {
    context: Option<&'static str>,
    on_error: Option<ErrorMapper<E>>,
}

impl<E> TryCatchOptions<E> {
    pub fn new() -> Self {
        Self {
            context: None,
            on_error: None,
        }
    }

    /// Log failures at error level, tagged with `context`.
    pub fn logged(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    /// Replace the failure with whatever `mapper` returns.
    ///
    /// Returning `None` keeps the original error.
    pub fn on_error<F>(mut self, mapper: F) -> Self
    where
        F: FnOnce(&E) -> Option<E> + Send + 'static,
    {
        self.on_error = Some(Box::new(mapper));
        self
    }
}

impl<E> Default for TryCatchOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a fallible operation and hand its outcome back as a value.
///
/// Exactly one side of the returned `Result` is populated. On failure the
/// error is optionally logged (message and `Debug` detail) and optionally
/// replaced by the mapper; the function itself never panics.
pub async fn try_catch<T, E, F, Fut>(operation: F, options: TryCatchOptions<E>) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display + fmt::Debug,
{
    let error = match operation().await {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    if let Some(context) = options.context {
        tracing::error!(context, error = %error, detail = ?error, "Operation failed");
    }

    if let Some(mapper) = options.on_error {
        if let Some(mapped) = mapper(&error) {
            return Err(mapped);
        }
    }

    Err(error)
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error, PartialEq, Eq)]
    enum TestError {
        #[error("boom")]
        Boom,

        #[error("mapped: {0}")]
        Mapped(String),
    }

    #[tokio::test]
    async fn test_success_returns_value() {
        let result = try_catch(|| async { Ok::<_, TestError>(42) }, TryCatchOptions::new()).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_unit_success() {
        let result = try_catch(|| async { Ok::<_, TestError>(()) }, TryCatchOptions::new()).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_failure_returns_original_error() {
        let result: Result<u8, _> = try_catch(
            || async { Err(TestError::Boom) },
            TryCatchOptions::new().logged("tests"),
        )
        .await;

        assert_eq!(result, Err(TestError::Boom));
    }

    #[tokio::test]
    async fn test_mapper_replaces_error() {
        let result: Result<u8, _> = try_catch(
            || async { Err(TestError::Boom) },
            TryCatchOptions::new().on_error(|e: &TestError| Some(TestError::Mapped(e.to_string()))),
        )
        .await;

        assert_eq!(result, Err(TestError::Mapped("boom".to_string())));
    }

    #[tokio::test]
    async fn test_mapper_returning_none_keeps_original() {
        let result: Result<u8, _> = try_catch(
            || async { Err(TestError::Boom) },
            TryCatchOptions::new()
                .logged("tests")
                .on_error(|_: &TestError| None),
        )
        .await;

        assert_eq!(result, Err(TestError::Boom));
    }

    #[tokio::test]
    async fn test_mapper_not_called_on_success() {
        let result = try_catch(
            || async { Ok::<_, TestError>("fine") },
            TryCatchOptions::new().on_error(|_: &TestError| -> Option<TestError> {
                panic!("mapper must not run on success")
            }),
        )
        .await;

        assert_eq!(result, Ok("fine"));
    }
}
