// Shared test helpers for integration tests
#![allow(dead_code)]

use container_command::{CommandRunner, RunnerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A stand-in for `docker exec`. It parses the same flags, records its
/// argument vector next to itself (one file per container name), and then
/// runs the command on the host. The container name `missing` behaves like
/// a container that does not exist.
const FAKE_BACKEND: &str = r#"#!/bin/sh
if [ "$1" != "exec" ]; then
  echo "unknown command: $1" >&2
  exit 125
fi
dir=$(dirname "$0")
shift
while [ $# -gt 0 ]; do
  case "$1" in
    -u) FAKE_USER="$2"; export FAKE_USER; shift 2 ;;
    -w) cd "$2" || exit 126; shift 2 ;;
    *) break ;;
  esac
done
container="$1"
shift
printf '%s\n' "$container" "$@" > "$dir/argv-$container"
if [ "$container" = "missing" ]; then
  echo "Error response from daemon: No such container: missing" >&2
  exit 1
fi
FAKE_CONTAINER="$container"
export FAKE_CONTAINER
exec "$@"
"#;

static BACKEND: OnceLock<PathBuf> = OnceLock::new();

/// Returns the path of the fake backend script, writing it once per test
/// binary so no test executes a file another thread is still writing.
pub fn fake_backend() -> &'static Path {
    BACKEND.get_or_init(|| {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR"))
            .join(format!("fake-backend-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("Failed to create fake backend directory");
        let script = dir.join("fake-docker");
        fs::write(&script, FAKE_BACKEND).expect("Failed to write fake backend");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake backend executable");
        }
        script
    })
}

pub fn backend_name() -> String {
    fake_backend().display().to_string()
}

/// A runner pointed at the fake backend with the given deadline.
pub fn fake_runner(timeout_secs: u64) -> CommandRunner {
    CommandRunner::new(RunnerConfig {
        backend: backend_name(),
        timeout_secs,
    })
}

/// The container name and command tokens the fake backend last received
/// for `container`.
pub fn recorded_argv(container: &str) -> Vec<String> {
    let path = fake_backend()
        .parent()
        .expect("fake backend has a parent directory")
        .join(format!("argv-{container}"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("No argv recorded at {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}

/// Writes a task file into `dir` and returns its path.
pub fn write_task_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("Tasks.toml");
    fs::write(&path, content).expect("Failed to write task file");
    path
}
