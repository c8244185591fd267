use std::future::Future;
use std::pin::Pin;
use std::sync::OnceLock;

use tokio::runtime::Runtime;

/// Process-wide runtime for command futures.
///
/// A single shared runtime (instead of one owned by `StateCtx`) keeps
/// `StateCtx` droppable from inside other runtimes — dropping a Tokio runtime
/// from async context panics, and tests routinely build a ctx inside
/// `#[tokio::test]`.
fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("steward-command")
            .enable_all()
            .build()
            .expect("command runtime must start")
    })
}

pub(crate) fn spawn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    runtime().spawn(fut);
}
