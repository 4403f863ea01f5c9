use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::task;
use zip::ZipArchive;

use super::ArchiveError;

/// The context for executing an archive-batch job. Defines how saving, extracting and removing
/// files work, and thus allows mocking.
#[cfg_attr(feature = "test", mockall::automock(type MainWorld = crate::world::MockWorld;))]
#[async_trait]
pub trait World: Send + Sync + 'static {
    /// The main world this world is based on
    type MainWorld: crate::world::World;

    /// Creates a new archive-batch world based on the given main world.
    fn new(main: Arc<Self::MainWorld>) -> Self;

    /// Accesses the main world.
    fn main(&self) -> &Arc<Self::MainWorld>;

    /// Creates the output directory if it is absent. Does nothing if it already exists.
    async fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// Writes a downloaded body to a file.
    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Extracts all entries of the ZIP archive at `archive` into `dir`.
    async fn extract_archive(&self, archive: &Path, dir: &Path) -> Result<(), ArchiveError>;

    /// Removes a file.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;
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

    async fn extract_archive(&self, archive: &Path, dir: &Path) -> Result<(), ArchiveError> {
        let archive = archive.to_path_buf();
        let dir = dir.to_path_buf();
        // the zip crate is synchronous; don't block the runtime with it
        task::spawn_blocking(move || extract_zip(&archive, &dir)).await??;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<(), ArchiveError> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => continue,
        };

        if file.name().ends_with('/') {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut file, &mut outfile)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
            }
        }
    }
    Ok(())
}
