use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// The context for executing a listing-match job. Defines how saving the matched file works,
/// and thus allows mocking.
#[cfg_attr(feature = "test", mockall::automock(type MainWorld = crate::world::MockWorld;))]
#[async_trait]
pub trait World: Send + Sync + 'static {
    /// The main world this world is based on
    type MainWorld: crate::world::World;

    /// Creates a new listing-match world based on the given main world.
    fn new(main: Arc<Self::MainWorld>) -> Self;

    /// Accesses the main world.
    fn main(&self) -> &Arc<Self::MainWorld>;

    /// Creates the output directory if it is absent. Does nothing if it already exists.
    async fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// Writes the downloaded body to a file.
    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// The default context, accessing the real filesystem.
#[derive(Clone)]
pub struct DefaultWorld {
    main: Arc<crate::world::DefaultWorld>,
}

#[async_trait]
impl World for DefaultWorld {
    type MainWorld = crate::world::DefaultWorld;

    fn new(main: Arc<Self::MainWorld>) -> Self {
        Self { main }
    }

    fn main(&self) -> &Arc<Self::MainWorld> {
        &self.main
    }

    async fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir).await
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }
}
