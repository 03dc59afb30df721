use crate::TestDb;

use tracing_subscriber::EnvFilter;

/// Runs a test body on its own current-thread runtime.
///
/// Tests use `#[test]` instead of `#[tokio::test]` so the harness controls
/// runtime construction and log setup.
pub struct MoleculeTest {
    runtime: tokio::runtime::Runtime,
    db: Option<TestDb>,
}

impl MoleculeTest {
    pub fn new(db: TestDb) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime,
            db: Some(db),
        }
    }

    pub fn run_test<F, Fut>(&mut self, test_fn: F)
    where
        F: FnOnce(TestDb) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let db = self.db.take().expect("Database already consumed");
        self.runtime.block_on(async {
            test_fn(db).await;
        });
    }
}
