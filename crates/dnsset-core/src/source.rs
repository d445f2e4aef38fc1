//! Feed acquisition
//!
//! Resolves the bytes to process: either a fresh download of the feed or
//! the local rule file. Downloading is best-effort. Any failure is logged
//! and the local file is used instead; only a missing local file is fatal.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Source of remote feed contents
///
/// Implemented over HTTP by the CLI; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher {
    /// Download the body at `url`; non-success responses are errors
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Where the feed bytes came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Freshly downloaded; not yet stored at the input path
    Downloaded {
        /// Feed URL
        url: String,
    },
    /// Read from the local input file
    Local,
}

/// Feed contents ready for normalization
#[derive(Debug, Clone)]
pub struct Feed {
    /// Raw, possibly encoded, feed bytes
    pub bytes: Vec<u8>,
    /// Input path the feed belongs to
    pub path: PathBuf,
    /// Where `bytes` came from
    pub origin: Origin,
}

impl Feed {
    /// Read the local input file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), "Read input file");
        Ok(Self {
            bytes,
            path: path.to_path_buf(),
            origin: Origin::Local,
        })
    }

    /// Whether the bytes still have to be stored at [`Feed::path`]
    pub fn is_downloaded(&self) -> bool {
        matches!(self.origin, Origin::Downloaded { .. })
    }
}

/// Resolve the feed for `path`
///
/// With `url` set, one download attempt is made first. On success the
/// downloaded bytes are returned (the caller stores them at `path`);
/// otherwise the local file at `path` is read.
pub fn acquire<F>(path: &Path, url: Option<&str>, fetcher: &F) -> Result<Feed>
where
    F: FeedFetcher + ?Sized,
{
    if let Some(url) = url {
        match fetcher.fetch(url) {
            Ok(bytes) if !bytes.is_empty() => {
                info!(url, bytes = bytes.len(), "Downloaded feed");
                return Ok(Feed {
                    bytes,
                    path: path.to_path_buf(),
                    origin: Origin::Downloaded {
                        url: url.to_string(),
                    },
                });
            }
            Ok(_) => {
                warn!(url, "Feed download was empty, using local file");
            }
            Err(e) => {
                warn!(error = %e, "Feed download failed, using local file");
            }
        }
    }

    Feed::read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const URL: &str = "https://example.com/list.txt";

    fn local_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_download_wins() {
        let file = local_file("old.example.com\n");
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq(URL))
            .times(1)
            .returning(|_| Ok(b"new.example.com\n".to_vec()));

        let feed = acquire(file.path(), Some(URL), &fetcher).unwrap();
        assert_eq!(feed.bytes, b"new.example.com\n");
        assert!(feed.is_downloaded());
        assert_eq!(feed.path, file.path());
    }

    #[test]
    fn test_failed_download_falls_back() {
        let file = local_file("old.example.com\n");
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|url| Err(Error::fetch(url, "HTTP 503")));

        let feed = acquire(file.path(), Some(URL), &fetcher).unwrap();
        assert_eq!(feed.bytes, b"old.example.com\n");
        assert_eq!(feed.origin, Origin::Local);
    }

    #[test]
    fn test_empty_download_falls_back() {
        let file = local_file("old.example.com\n");
        let mut fetcher = MockFeedFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_| Ok(Vec::new()));

        let feed = acquire(file.path(), Some(URL), &fetcher).unwrap();
        assert_eq!(feed.origin, Origin::Local);
    }

    #[test]
    fn test_no_url_never_fetches() {
        let file = local_file("a.example.com\n");
        let mut fetcher = MockFeedFetcher::new();
        fetcher.expect_fetch().times(0);

        let feed = acquire(file.path(), None, &fetcher).unwrap();
        assert_eq!(feed.origin, Origin::Local);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gfwlist.txt");
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|url| Err(Error::fetch(url, "unreachable")));

        let err = acquire(&missing, Some(URL), &fetcher).unwrap_err();
        assert!(err.is_input_not_found());
    }
}
