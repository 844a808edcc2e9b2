use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use target_lexicon::Triple;
use temp_dir::TempDir;

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error("couldn't run backend: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "backend exited with code {code}\n{}{}",
        String::from_utf8_lossy(.stdout),
        String::from_utf8_lossy(.stderr)
    )]
    Exited {
        code: i32,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },

    #[error(
        "backend was terminated by a signal\n{}{}",
        String::from_utf8_lossy(.stdout),
        String::from_utf8_lossy(.stderr)
    )]
    Terminated { stdout: Vec<u8>, stderr: Vec<u8> },
}

/// The external program that turns LLVM IR into an executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Clang,
    Custom(String, Vec<String>),
}

impl Backend {
    /// Clang can only be assumed to be present when building for the host.
    pub fn detect(target: &Triple) -> Option<Self> {
        (target == &Triple::host()).then_some(Self::Clang)
    }

    pub fn command(&self, ir_file: impl AsRef<OsStr>, output: impl AsRef<OsStr>) -> Command {
        match self {
            Self::Clang => {
                let mut cmd = Command::new("clang");

                cmd.args(["-x", "ir"]);
                cmd.arg(ir_file);

                cmd.arg("-o");
                cmd.arg(output);

                cmd
            }

            Self::Custom(program, args) => {
                let mut cmd = Command::new(program);
                cmd.args(args);

                cmd.arg(ir_file);

                cmd.arg("-o");
                cmd.arg(output);

                cmd
            }
        }
    }

    /// Writes `ir` to a fresh temporary directory and runs the backend on it. The
    /// directory is removed afterwards whatever the outcome.
    pub fn build(&self, ir: &str, output: &Path) -> Result<(), DriverError> {
        let dir = TempDir::new()?;
        let ir_file = dir.path().join("module.ll");
        std::fs::write(&ir_file, ir)?;

        let result = self.command(&ir_file, output).output()?;

        if result.status.success() {
            return Ok(());
        }

        match result.status.code() {
            Some(code) => Err(DriverError::Exited {
                code,
                stdout: result.stdout,
                stderr: result.stderr,
            }),

            None => Err(DriverError::Terminated {
                stdout: result.stdout,
                stderr: result.stderr,
            }),
        }
    }
}
