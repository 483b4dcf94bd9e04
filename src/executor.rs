use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};
use crate::{compiler::CSource, config::ToolchainConfig};

/// Failures at the external toolchain boundary. None of these are retried.
#[derive(Debug)]
pub enum ExecError {
    Io(io::Error),
    /// The configured compiler could not be spawned.
    CompilerMissing { compiler: String },
    CompileFailed { status: ExitStatus, stderr: String },
    ExecutionFailed { status: ExitStatus },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Io(e) => write!(f, "{}", e),
            ExecError::CompilerMissing { compiler } =>
                write!(f, "compiler `{}` was not found on the PATH", compiler),
            ExecError::CompileFailed { status, stderr } =>
                write!(f, "compilation failed ({})\n{}", status, stderr.trim_end()),
            ExecError::ExecutionFailed { status } =>
                write!(f, "execution failed ({})", status),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

/// The generated source file and compiled binary for one run. Both are removed
/// when this is dropped, unless they were asked to be kept.
#[derive(Debug)]
pub struct Artifacts {
    pub source: PathBuf,
    pub binary: PathBuf,
    keep: bool,
}

impl Artifacts {
    /// Names are `ml-<pid>.c` and `ml-<pid>` (plus the platform executable suffix).
    pub fn new(dir: &Path, pid: u32, keep: bool) -> Self {
        // An empty dir would make the binary name a bare PATH lookup
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        Artifacts {
            source: dir.join(format!("ml-{}.c", pid)),
            binary: dir.join(format!("ml-{}{}", pid, std::env::consts::EXE_SUFFIX)),
            keep,
        }
    }

    pub fn for_config(config: &ToolchainConfig) -> Self {
        let dir = config.artifact_dir.clone().unwrap_or_else(std::env::temp_dir);
        Self::new(&dir, std::process::id(), config.keep_artifacts)
    }
}

impl Drop for Artifacts {
    fn drop(&mut self) {
        if self.keep {
            log::info!("keeping {} and {}", self.source.display(), self.binary.display());
            return;
        }
        for path in [&self.source, &self.binary].iter() {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    log::warn!("could not remove {}: {}", path.display(), e);
                }
            }
        }
    }
}

/// Write the source out and build it with the configured compiler.
pub fn compile(src: &CSource, config: &ToolchainConfig) -> Result<Artifacts, ExecError> {
    let artifacts = Artifacts::for_config(config);
    fs::write(&artifacts.source, &src.0)?;
    log::info!("compiling {} with {}", artifacts.source.display(), config.compiler);

    let output = Command::new(&config.compiler)
        .args(&config.flags)
        .arg("-o")
        .arg(&artifacts.binary)
        .arg(&artifacts.source)
        .args(&config.libs)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ExecError::CompilerMissing { compiler: config.compiler.clone() },
            _ => ExecError::Io(e),
        })?;

    if !output.status.success() {
        return Err(ExecError::CompileFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(artifacts)
}

/// Run a compiled program and capture its stdout. Its stderr goes straight to ours.
pub fn execute(artifacts: &Artifacts) -> Result<String, ExecError> {
    log::info!("running {}", artifacts.binary.display());
    let output = Command::new(&artifacts.binary)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()?;

    if !output.status.success() {
        return Err(ExecError::ExecutionFailed { status: output.status });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Compile and execute, cleaning up afterwards either way.
pub fn run(src: &CSource, config: &ToolchainConfig) -> Result<String, ExecError> {
    let artifacts = compile(src, config)?;
    execute(&artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compiler::translate, normalizer::normalize, types::TranslateOptions};

    fn have_gcc() -> bool {
        Command::new("gcc").arg("--version").output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// A private artifact directory per test, since tests share a pid.
    fn config_in(name: &str) -> ToolchainConfig {
        let dir = std::env::temp_dir().join(format!("runml-test-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        ToolchainConfig { artifact_dir: Some(dir), ..Default::default() }
    }

    fn c(source: &str) -> CSource {
        translate(source, &TranslateOptions::default()).unwrap()
    }

    #[test]
    fn artifact_names_use_pid() {
        let a = Artifacts::new(Path::new("/tmp/work"), 42, true);
        assert_eq!(a.source, Path::new("/tmp/work/ml-42.c"));
        assert_eq!(a.binary,
            Path::new("/tmp/work").join(format!("ml-42{}", std::env::consts::EXE_SUFFIX)));
    }

    #[test]
    fn empty_dir_is_current_dir() {
        let a = Artifacts::new(Path::new(""), 7, true);
        assert_eq!(a.source, Path::new("./ml-7.c"));
    }

    #[test]
    fn drop_removes_files_unless_kept() {
        let config = config_in("drop");
        let dir = config.artifact_dir.clone().unwrap();

        let a = Artifacts::new(&dir, 1, false);
        fs::write(&a.source, "x").unwrap();
        fs::write(&a.binary, "x").unwrap();
        let (src, bin) = (a.source.clone(), a.binary.clone());
        drop(a);
        assert!(!src.exists());
        assert!(!bin.exists());

        let kept = Artifacts::new(&dir, 2, true);
        fs::write(&kept.source, "x").unwrap();
        let src = kept.source.clone();
        drop(kept);
        assert!(src.exists());
        fs::remove_file(src).unwrap();
    }

    #[test]
    fn missing_compiler_is_reported() {
        let config = ToolchainConfig {
            compiler: "runml-no-such-compiler".to_string(),
            ..config_in("missing")
        };
        match run(&c("print 1"), &config) {
            Err(ExecError::CompilerMissing { compiler }) => assert_eq!(compiler, "runml-no-such-compiler"),
            other => panic!("expected CompilerMissing, got {:?}", other),
        }
    }

    #[test]
    fn square_prints_sixteen() {
        if !have_gcc() {
            return;
        }
        let config = config_in("square");
        let stdout = run(&c(include_str!("../demos/square.ml")), &config).unwrap();
        assert_eq!(stdout, "16.000000\n");
        assert_eq!(normalize(&stdout), "16\n");
    }

    #[test]
    fn functions_demo_output() {
        if !have_gcc() {
            return;
        }
        let config = config_in("functions");
        let stdout = run(&c(include_str!("../demos/functions.ml")), &config).unwrap();
        assert_eq!(normalize(&stdout), "7.500000\n3.500000\n5\n");
    }

    #[test]
    fn reassignment_compiles() {
        if !have_gcc() {
            return;
        }
        let config = config_in("reassign");
        let stdout = run(&c("x <- 1\nx <- x + 2\nprint x"), &config).unwrap();
        assert_eq!(normalize(&stdout), "3\n");
    }

    #[test]
    fn integer_prints_are_widened() {
        if !have_gcc() {
            return;
        }
        let config = config_in("widen");
        let stdout = run(&c("print 1\nprint 2 + 3\nprint 7 / 2"), &config).unwrap();
        assert_eq!(normalize(&stdout), "1\n5\n3\n");
    }

    #[test]
    fn function_without_return_builds() {
        if !have_gcc() {
            return;
        }
        let config = config_in("noreturn");
        let stdout = run(&c("function hello a\n\tprint a\nhello 3"), &config).unwrap();
        assert_eq!(normalize(&stdout), "3\n");
    }

    #[test]
    fn shadowed_function_name_builds() {
        if !have_gcc() {
            return;
        }
        let config = config_in("shadow");
        let stdout = run(&c("function sq x\n\treturn x * x\nfunction g sq\n\treturn sq + 1\nprint g sq 3"), &config).unwrap();
        assert_eq!(normalize(&stdout), "10\n");
    }

    #[test]
    fn compile_failure_cleans_up() {
        if !have_gcc() {
            return;
        }
        let config = config_in("badsrc");
        // A print with no operand translates fine and is rejected by the compiler
        match run(&c("print"), &config) {
            Err(ExecError::CompileFailed { stderr, .. }) => assert!(!stderr.is_empty()),
            other => panic!("expected CompileFailed, got {:?}", other),
        }
        let leftover = Artifacts::new(config.artifact_dir.as_ref().unwrap(), std::process::id(), true);
        assert!(!leftover.source.exists());
    }

    #[test]
    fn nonzero_exit_is_execution_failure() {
        if !have_gcc() {
            return;
        }
        let config = config_in("exit");
        match run(&c("print 1\nreturn 3"), &config) {
            Err(ExecError::ExecutionFailed { status }) => assert_eq!(status.code(), Some(3)),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }
}
