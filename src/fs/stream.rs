//! Byte streams over whole-object download and upload.
//!
//! Reads materialize the entire remote file before the first byte is
//! returned. Writes collect into a local staging file and upload it once,
//! on [`WriteStream::close`].

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::api::{ItemApi, RemoteItem};
use crate::error::{FsError, Result};

/// Finite in-memory reader over a downloaded file.
#[derive(Debug, Clone)]
pub struct ReadStream {
    cursor: Cursor<Vec<u8>>,
}

impl ReadStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Total length of the materialized content.
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Read for ReadStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for ReadStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

/// Download the full content of `item` through a staging file.
pub(crate) async fn download(
    client: &dyn ItemApi,
    path: &str,
    item: &RemoteItem,
    prefix: &str,
) -> Result<ReadStream> {
    let staged = tempfile::Builder::new()
        .prefix(prefix)
        .tempfile()
        .map_err(|e| FsError::io(path, e))?
        .into_temp_path();

    let data = match client.download_to(&item.id, &staged).await {
        Ok(()) => tokio::fs::read(&staged)
            .await
            .map_err(|e| FsError::io(staged.display().to_string(), e)),
        Err(e) => Err(FsError::from_api(path, e)),
    };

    let local = staged.display().to_string();
    if let Err(e) = staged.close() {
        warn!(local = %local, error = %e, "failed to remove download staging file");
    }

    let data = data?;
    debug!(path, bytes = data.len(), "download materialized");
    Ok(ReadStream::new(data))
}

enum WriteState {
    Open(NamedTempFile),
    Closed,
}

/// Write-only stream that uploads its content when closed.
///
/// Closing is a two-phase finalize: the staged bytes are uploaded, then the
/// staging file is removed whether or not the upload succeeded. An upload
/// failure is returned from [`close`](Self::close). Dropping an open stream
/// discards the staged bytes without uploading.
pub struct WriteStream {
    client: Arc<dyn ItemApi>,
    path: String,
    state: WriteState,
}

impl WriteStream {
    pub(crate) fn create(client: Arc<dyn ItemApi>, path: &str, prefix: &str) -> Result<Self> {
        let staging = tempfile::Builder::new()
            .prefix(prefix)
            .tempfile()
            .map_err(|e| FsError::io(path, e))?;
        debug!(path, local = %staging.path().display(), "write stream opened");

        Ok(Self {
            client,
            path: path.to_string(),
            state: WriteState::Open(staging),
        })
    }

    /// Remote path the content will be uploaded to.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, WriteState::Closed)
    }

    /// Local staging file, while the stream is open.
    pub fn staging_path(&self) -> Option<&Path> {
        match &self.state {
            WriteState::Open(staging) => Some(staging.path()),
            WriteState::Closed => None,
        }
    }

    /// Always fails: the stream is write-only.
    pub fn readinto(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(FsError::UnsupportedOperation("readinto on a write-only stream"))
    }

    /// Upload the staged content and remove the staging file.
    ///
    /// Calling `close` on a closed stream does nothing.
    pub async fn close(&mut self) -> Result<()> {
        let staging = match std::mem::replace(&mut self.state, WriteState::Closed) {
            WriteState::Open(staging) => staging,
            WriteState::Closed => return Ok(()),
        };
        let (file, staged) = staging.into_parts();
        let local = staged.display().to_string();

        let uploaded = upload(self.client.as_ref(), &self.path, file, &staged).await;
        let cleaned = staged.close().map_err(|e| FsError::io(local.clone(), e));

        match (uploaded, cleaned) {
            (Ok(item), Ok(())) => {
                debug!(path = %self.path, bytes = item.size, "write stream uploaded");
                Ok(())
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), cleaned) => {
                if let Err(cleanup) = cleaned {
                    warn!(local = %local, error = %cleanup, "failed to remove upload staging file");
                }
                Err(e)
            }
        }
    }
}

async fn upload(
    client: &dyn ItemApi,
    path: &str,
    mut file: File,
    staged: &Path,
) -> Result<RemoteItem> {
    file.flush()
        .map_err(|e| FsError::io(staged.display().to_string(), e))?;
    drop(file);
    client
        .upload_from(path, staged)
        .await
        .map_err(|e| FsError::from_api(path, e))
}

impl Write for WriteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            WriteState::Open(staging) => staging.write(buf),
            WriteState::Closed => Err(io::Error::other("write to a closed stream")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            WriteState::Open(staging) => staging.flush(),
            WriteState::Closed => Ok(()),
        }
    }
}

impl Read for WriteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.readinto(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Unsupported, e))
    }
}

impl Drop for WriteStream {
    fn drop(&mut self) {
        if let WriteState::Open(_) = self.state {
            warn!(path = %self.path, "write stream dropped without close, discarding");
        }
    }
}

impl std::fmt::Debug for WriteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteStream")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// File object returned by `openbin`.
#[derive(Debug)]
pub enum BinaryFile {
    Reader(ReadStream),
    Writer(WriteStream),
}

impl BinaryFile {
    pub fn is_readable(&self) -> bool {
        matches!(self, BinaryFile::Reader(_))
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, BinaryFile::Writer(_))
    }

    pub fn into_reader(self) -> Option<ReadStream> {
        match self {
            BinaryFile::Reader(reader) => Some(reader),
            BinaryFile::Writer(_) => None,
        }
    }

    pub fn into_writer(self) -> Option<WriteStream> {
        match self {
            BinaryFile::Writer(writer) => Some(writer),
            BinaryFile::Reader(_) => None,
        }
    }

    /// Close the file; for writers this performs the upload.
    pub async fn close(&mut self) -> Result<()> {
        match self {
            BinaryFile::Reader(_) => Ok(()),
            BinaryFile::Writer(writer) => writer.close().await,
        }
    }
}

impl Read for BinaryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            BinaryFile::Reader(reader) => reader.read(buf),
            BinaryFile::Writer(writer) => writer.read(buf),
        }
    }
}

impl Write for BinaryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            BinaryFile::Writer(writer) => writer.write(buf),
            BinaryFile::Reader(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stream is read-only",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            BinaryFile::Writer(writer) => writer.flush(),
            BinaryFile::Reader(_) => Ok(()),
        }
    }
}
