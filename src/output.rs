//! Writing extracted kubeconfig to its destination
use crate::errors::{KubeconfigError, KubeconfigResult};
use crate::prelude::*;
use std::{
    env, fmt,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Output path meaning "write to standard output"
pub const STDOUT_SENTINEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Interprets an output path: `-` is stdout, empty string is the given default.
    ///
    /// Relative paths are resolved against the current directory. Fails if it is unavailable.
    pub fn resolve(path: &str, default: &Path) -> KubeconfigResult<Self> {
        let path = match path {
            STDOUT_SENTINEL => return Ok(Destination::Stdout),
            "" => default,
            path => Path::new(path),
        };
        absolute(path, env::current_dir()).map(Destination::File)
    }

    /// Writes all the bytes to the destination and returns its resolved location.
    ///
    /// `stdout` is only touched for [Destination::Stdout]. A file is created or truncated
    /// and closed before returning, whatever the outcome.
    pub fn commit(&self, bytes: &[u8], stdout: &mut impl Write) -> KubeconfigResult<String> {
        match self {
            Destination::Stdout => {
                write_fully(stdout, bytes).map_err(|source| KubeconfigError::Write {
                    destination: STDOUT_SENTINEL.into(),
                    source,
                })?;
            }
            Destination::File(path) => {
                let mut file =
                    File::create(path).map_err(|source| KubeconfigError::DestinationCreate {
                        path: path.clone(),
                        source,
                    })?;
                trace!("Writing {} bytes to {}", bytes.len(), path.display());
                write_fully(&mut file, bytes)
                    .and_then(|_| file.sync_all())
                    .map_err(|source| KubeconfigError::Write {
                        destination: path.display().to_string(),
                        source,
                    })?;
            }
        }
        Ok(self.to_string())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str(STDOUT_SENTINEL),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Writes kubeconfig bytes to `path` (see [Destination::resolve]) and returns the resolved path,
/// or `-` when written to stdout.
pub fn write_config(bytes: &[u8], path: &str, default: &Path) -> KubeconfigResult<String> {
    Destination::resolve(path, default)?.commit(bytes, &mut io::stdout())
}

fn write_fully(target: &mut impl Write, bytes: &[u8]) -> IoResult<()> {
    target.write_all(bytes)?;
    target.flush()
}

fn absolute(path: &Path, cwd: IoResult<PathBuf>) -> KubeconfigResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    cwd.map(|cwd| cwd.join(path))
        .map_err(|source| KubeconfigError::DestinationCreate {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Writer accepting at most `chunk` bytes per call and failing after `limit` bytes
    struct Faulty {
        limit: usize,
        chunk: usize,
        written: Vec<u8>,
    }

    impl Write for Faulty {
        fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
            let left = self.limit - self.written.len();
            if left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            let n = left.min(buf.len()).min(self.chunk);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> IoResult<()> {
            Ok(())
        }
    }

    #[test]
    fn check_destination_resolution() -> Result<()> {
        let default = Path::new("/srv/kubeconfig-dev.yaml");

        assert_eq!(Destination::resolve("-", default)?, Destination::Stdout);
        assert_eq!(
            Destination::resolve("", default)?,
            Destination::File(default.to_path_buf())
        );
        assert_eq!(
            Destination::resolve("/etc/kube.yaml", default)?,
            Destination::File("/etc/kube.yaml".into())
        );

        let relative = Destination::resolve("kube.yaml", default)?;
        assert_eq!(relative, Destination::File(env::current_dir()?.join("kube.yaml")));
        Ok(())
    }

    #[test]
    fn missing_current_dir_is_reported() {
        let cwd = Err(io::Error::new(io::ErrorKind::NotFound, "cwd removed"));

        match absolute(Path::new("kube.yaml"), cwd).unwrap_err() {
            KubeconfigError::DestinationCreate { path, source } => {
                assert_eq!(path, Path::new("kube.yaml"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            e => panic!("Unexpected error: {}", e),
        }

        let cwd = Err(io::Error::new(io::ErrorKind::NotFound, "cwd removed"));
        assert_eq!(
            absolute(Path::new("/etc/kube.yaml"), cwd).unwrap(),
            Path::new("/etc/kube.yaml")
        );
    }

    #[test]
    fn stdout_destination_never_touches_filesystem() -> Result<()> {
        let tmp = TempDir::new()?;
        let default = tmp.path().join("kubeconfig.yaml");
        let mut stdout = Vec::new();

        let location = Destination::resolve("-", &default)?.commit(b"apiVersion: v1\n", &mut stdout)?;

        assert_eq!(location, "-");
        assert_eq!(stdout, b"apiVersion: v1\n");
        assert!(!default.exists());
        Ok(())
    }

    #[test]
    fn file_destination_never_writes_stdout() -> Result<()> {
        let tmp = TempDir::new()?;
        let default = tmp.path().join("kubeconfig.yaml");
        let mut stdout = Vec::new();

        let location = Destination::resolve("", &default)?.commit(b"kind: Config\n", &mut stdout)?;

        assert_eq!(location, default.display().to_string());
        assert!(stdout.is_empty());
        assert_eq!(fs::read(&default)?, b"kind: Config\n");
        Ok(())
    }

    #[test]
    fn repeated_writes_truncate() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("kubeconfig.yaml");
        let path = path.to_str().unwrap();
        fs::write(path, "stale content which is much longer than new one")?;

        let first = write_config(b"kind: Config\n", path, Path::new("unused"))?;
        let second = write_config(b"kind: Config\n", path, Path::new("unused"))?;

        assert_eq!(first, second);
        assert_eq!(fs::read(path)?, b"kind: Config\n");
        Ok(())
    }

    #[test]
    fn missing_directory_is_reported() -> Result<()> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("no-such-dir").join("kubeconfig.yaml");

        let error = write_config(b"kind: Config\n", path.to_str().unwrap(), Path::new("unused"))
            .unwrap_err();

        match error {
            KubeconfigError::DestinationCreate { path: reported, .. } => assert_eq!(reported, path),
            e => panic!("Unexpected error: {}", e),
        }
        Ok(())
    }

    #[test]
    fn short_writes_are_continued() -> Result<()> {
        let mut stdout = Faulty {
            limit: 1024,
            chunk: 3,
            written: vec![],
        };

        Destination::Stdout.commit(b"kind: Config\n", &mut stdout)?;
        assert_eq!(stdout.written, b"kind: Config\n");
        Ok(())
    }

    #[test]
    fn failed_write_is_reported() {
        let mut stdout = Faulty {
            limit: 4,
            chunk: 1024,
            written: vec![],
        };

        let error = Destination::Stdout
            .commit(b"kind: Config\n", &mut stdout)
            .unwrap_err();

        match error {
            KubeconfigError::Write { destination, source } => {
                assert_eq!(destination, "-");
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            e => panic!("Unexpected error: {}", e),
        }
        assert_eq!(stdout.written, b"kind");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_file_write_is_reported() {
        let error = write_config(b"kind: Config\n", "/dev/full", Path::new("unused")).unwrap_err();

        match error {
            KubeconfigError::Write { destination, source } => {
                assert_eq!(destination, "/dev/full");
                assert_eq!(source.raw_os_error(), Some(28));
            }
            e => panic!("Unexpected error: {}", e),
        }
    }
}
