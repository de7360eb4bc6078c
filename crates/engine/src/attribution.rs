// crates/engine/src/attribution.rs
//! 注釈行の作者解決 (git)
//!
//! Only two git invocations are ever issued, both described by
//! [`AttributionQuery`]. Arguments are passed as argv and every process is
//! killed once its timeout expires.

use crate::error::{EngineError, Result};
use crate::path_security::{PathPolicy, stays_inside};
use std::ffi::OsString;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Author placeholder git reports for uncommitted lines.
const NOT_COMMITTED: &str = "Not Committed Yet";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Resolves the author of one line of a file inside the repository.
pub trait Attributor: Send + Sync {
    fn author(&self, relative: &Path, line: usize) -> Option<String>;
}

/// Never attributes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttribution;

impl Attributor for NoAttribution {
    fn author(&self, _relative: &Path, _line: usize) -> Option<String> {
        None
    }
}

/// The complete set of git queries this crate may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionQuery {
    /// `git config user.name`
    ConfiguredIdentity,
    /// `git blame --porcelain -L <n>,<n> -- <path>`
    BlameLine { path: PathBuf, line: NonZeroUsize },
}

impl AttributionQuery {
    /// Validate and build a blame query for `relative` (relative to `root`).
    ///
    /// # Errors
    ///
    /// [`EngineError::PermissionDenied`] when the line is zero or the path is
    /// absolute, escapes the root, contains NUL, starts with `-`, or does not
    /// resolve inside `root`.
    pub fn blame_line(root: &Path, relative: &Path, line: usize) -> Result<Self> {
        let deny = |why: &str| {
            EngineError::PermissionDenied(format!("blame of '{}': {why}", relative.display()))
        };
        let line = NonZeroUsize::new(line).ok_or_else(|| deny("line must be at least 1"))?;
        if relative.is_absolute() || relative.has_root() {
            return Err(deny("path must be relative"));
        }
        if !stays_inside(relative)
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(deny("path escapes the repository"));
        }
        if relative.to_string_lossy().starts_with('-') {
            return Err(deny("path looks like an option"));
        }
        PathPolicy::within(root)
            .and_then(|policy| policy.check(&root.join(relative)))
            .map_err(|e| deny(&e.to_string()))?;
        Ok(Self::BlameLine {
            path: relative.to_path_buf(),
            line,
        })
    }

    /// Argument vector handed to `git`.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        match self {
            Self::ConfiguredIdentity => vec!["config".into(), "user.name".into()],
            Self::BlameLine { path, line } => vec![
                "blame".into(),
                "--porcelain".into(),
                "-L".into(),
                format!("{line},{line}").into(),
                "--".into(),
                path.as_os_str().to_os_string(),
            ],
        }
    }
}

/// `git blame` backed attribution.
#[derive(Debug)]
pub struct GitAttributor {
    root: PathBuf,
    program: OsString,
    timeout: Duration,
    identity: OnceLock<Option<String>>,
}

impl GitAttributor {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            program: OsString::from("git"),
            timeout,
            identity: OnceLock::new(),
        }
    }

    /// Use `program` instead of the `git` found on `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run an allow-listed query and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// [`EngineError::ExternalToolUnavailable`] when git cannot be started,
    /// fails, times out or prints nothing.
    pub fn query(&self, query: &AttributionQuery) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(query.args()).current_dir(&self.root);
        let stdout = run_with_timeout(cmd, self.timeout)?;
        let text = String::from_utf8_lossy(&stdout).trim().to_string();
        if text.is_empty() {
            return Err(EngineError::ExternalToolUnavailable(format!(
                "git {:?} produced no output",
                query.args()
            )));
        }
        Ok(text)
    }

    /// `user.name`, queried at most once.
    pub fn configured_identity(&self) -> Option<String> {
        self.identity
            .get_or_init(|| match self.query(&AttributionQuery::ConfiguredIdentity) {
                Ok(name) => Some(name),
                Err(e) => {
                    log::debug!("no configured git identity: {e}");
                    None
                }
            })
            .clone()
    }

    fn blame(&self, relative: &Path, line: usize) -> Result<Option<String>> {
        let query = AttributionQuery::blame_line(&self.root, relative, line)?;
        let output = self.query(&query)?;
        Ok(match parse_porcelain_author(&output) {
            Some(NOT_COMMITTED) => self.configured_identity(),
            Some(author) => Some(author.to_string()),
            None => None,
        })
    }
}

impl Attributor for GitAttributor {
    fn author(&self, relative: &Path, line: usize) -> Option<String> {
        match self.blame(relative, line) {
            Ok(author) => author,
            Err(e @ EngineError::PermissionDenied(_)) => {
                log::warn!("{e}");
                None
            }
            Err(e) => {
                log::debug!("attribution skipped for {}:{line}: {e}", relative.display());
                None
            }
        }
    }
}

/// Author named on the `author ` header of `git blame --porcelain` output.
#[must_use]
pub fn parse_porcelain_author(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("author "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Spawn `cmd`, collect stdout, and kill it if it outlives `timeout`.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<Vec<u8>> {
    let unavailable = |why: String| EngineError::ExternalToolUnavailable(why);
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| unavailable(format!("failed to start git: {e}")))?;

    let reader = child.stdout.take().map(|mut stdout| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        })
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(unavailable(format!("git timed out after {timeout:?}")));
            }
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(unavailable(format!("failed to wait for git: {e}"))),
        }
    };

    let stdout = match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| unavailable("stdout reader panicked".into()))?
            .map_err(|e| unavailable(format!("failed to read git output: {e}")))?,
        None => Vec::new(),
    };
    if !status.success() {
        return Err(unavailable(format!("git exited with {status}")));
    }
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_blame_args_are_fixed() {
        let q = AttributionQuery::BlameLine {
            path: PathBuf::from("src/main.rs"),
            line: NonZeroUsize::new(12).unwrap(),
        };
        let args: Vec<_> = q.args().into_iter().map(|a| a.into_string().unwrap()).collect();
        assert_eq!(args, ["blame", "--porcelain", "-L", "12,12", "--", "src/main.rs"]);
        assert_eq!(
            AttributionQuery::ConfiguredIdentity.args(),
            [OsString::from("config"), OsString::from("user.name")]
        );
    }

    #[test]
    fn test_blame_line_validation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.rs"), "// x\n").unwrap();
        let root = temp.path();

        assert!(AttributionQuery::blame_line(root, Path::new("a.rs"), 1).is_ok());
        for (path, line) in [
            ("a.rs", 0),
            ("../a.rs", 1),
            ("sub/../../a.rs", 1),
            ("-a.rs", 1),
            ("missing.rs", 1),
        ] {
            assert!(
                matches!(
                    AttributionQuery::blame_line(root, Path::new(path), line),
                    Err(EngineError::PermissionDenied(_))
                ),
                "{path}:{line}"
            );
        }
        let absolute = root.join("a.rs");
        assert!(matches!(
            AttributionQuery::blame_line(root, &absolute, 1),
            Err(EngineError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_parse_porcelain_author() {
        let out = "4f1c2d 3 3 1\nauthor Jane Doe\nauthor-mail <jane@example.com>\n\tcode\n";
        assert_eq!(parse_porcelain_author(out), Some("Jane Doe"));
        assert_eq!(parse_porcelain_author("garbage"), None);
    }

    #[test]
    fn test_no_attribution() {
        assert_eq!(NoAttribution.author(Path::new("a.rs"), 1), None);
    }

    #[test]
    fn test_outside_repository_yields_no_author() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.rs"), "// x\n").unwrap();
        let git = GitAttributor::new(temp.path(), Duration::from_secs(5));
        assert_eq!(git.author(Path::new("a.rs"), 1), None);
        assert_eq!(git.author(Path::new("../a.rs"), 1), None);
    }

    /// Run git in `dir`; `false` when git is missing or fails.
    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    /// One committed line by "Committer Bob", local identity "Local Person".
    fn committed_repo() -> Option<TempDir> {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("a.rs"), "// TODO: committed\n").unwrap();
        let ok = git(dir, &["init", "-q"])
            && git(dir, &["config", "user.name", "Local Person"])
            && git(dir, &["config", "user.email", "local@example.com"])
            && git(dir, &["add", "a.rs"])
            && git(
                dir,
                &[
                    "-c",
                    "user.name=Committer Bob",
                    "-c",
                    "user.email=bob@example.com",
                    "-c",
                    "commit.gpgsign=false",
                    "commit",
                    "-q",
                    "-m",
                    "init",
                ],
            );
        ok.then_some(temp)
    }

    #[test]
    fn test_blame_reports_committer_and_local_identity() {
        let Some(repo) = committed_repo() else {
            eprintln!("git unavailable, skipping");
            return;
        };
        let root = repo.path().canonicalize().unwrap();
        fs::write(root.join("a.rs"), "// TODO: committed\n// FIXME: pending\n").unwrap();

        let attributor = GitAttributor::new(&root, Duration::from_secs(10));
        assert_eq!(
            attributor.author(Path::new("a.rs"), 1).as_deref(),
            Some("Committer Bob")
        );
        assert_eq!(
            attributor.author(Path::new("a.rs"), 2).as_deref(),
            Some("Local Person")
        );
        assert_eq!(attributor.configured_identity().as_deref(), Some("Local Person"));
        assert_eq!(attributor.author(Path::new("a.rs"), 9), None);
    }

    #[test]
    fn test_missing_program_yields_no_author() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.rs"), "// x\n").unwrap();
        let attributor = GitAttributor::new(temp.path(), Duration::from_secs(1))
            .with_program(temp.path().join("no-such-git"));
        assert!(matches!(
            attributor.query(&AttributionQuery::ConfiguredIdentity),
            Err(EngineError::ExternalToolUnavailable(_))
        ));
        assert_eq!(attributor.author(Path::new("a.rs"), 1), None);
    }

    #[cfg(unix)]
    fn stub_program(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_hanging_git_is_killed_at_timeout() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.rs"), "// x\n").unwrap();
        let bin = TempDir::new().unwrap();
        let stub = stub_program(bin.path(), "git", "exec sleep 30");

        let attributor =
            GitAttributor::new(temp.path(), Duration::from_secs(1)).with_program(stub);
        let started = Instant::now();
        assert_eq!(attributor.author(Path::new("a.rs"), 1), None);
        assert!(started.elapsed() < Duration::from_secs(10), "{:?}", started.elapsed());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_git_yields_no_author() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.rs"), "// x\n").unwrap();
        let bin = TempDir::new().unwrap();
        let stub = stub_program(bin.path(), "git", "echo 'author Nobody'; exit 3");

        let attributor =
            GitAttributor::new(temp.path(), Duration::from_secs(5)).with_program(stub);
        assert_eq!(attributor.author(Path::new("a.rs"), 1), None);
    }
}
