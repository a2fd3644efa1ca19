use std::future::Future;

use futures::future::BoxFuture;

use daytrip_core::error::Result;

/// A unit of work in a workflow: takes the current state, returns the next one.
///
/// Effects (console I/O, service calls) happen inside the step; the executor
/// only moves state from one step to the next.
pub trait Step<S>: Send + Sync + 'static {
    fn run(&self, state: S) -> BoxFuture<'_, Result<S>>;
}

/// Adapts an async closure into a [`Step`].
pub struct FnStep<F> {
    f: F,
}

impl<F> FnStep<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S, F, Fut> Step<S> for FnStep<F>
where
    S: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<S>> + Send + 'static,
{
    fn run(&self, state: S) -> BoxFuture<'_, Result<S>> {
        Box::pin((self.f)(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_core::error::DaytripError;

    #[tokio::test]
    async fn test_fn_step() {
        let step = FnStep::new(|n: u32| async move { Ok::<_, DaytripError>(n * 2) });
        assert_eq!(Step::<u32>::run(&step, 21).await.unwrap(), 42);
    }
}
