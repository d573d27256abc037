//! External compressor minifier
//!
//! Pipes content through a program (e.g. `terser`, `csso`) on stdin and
//! takes its stdout as the minified result.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::ports::{Minifier, MinifyError};

/// Minifier backed by an external process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMinifier {
    program: String,
    args: Vec<String>,
}

impl CommandMinifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from an argv list; `None` when the list is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).with_args(args.iter().cloned()))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Minifier for CommandMinifier {
    fn minify(&self, content: &str) -> Result<String, MinifyError> {
        let spawn_err = |source| MinifyError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin from a separate thread so a compressor that streams
        // output before reading all input cannot deadlock on a full pipe.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_err(std::io::Error::other("stdin not captured")))?;
        let input = content.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(spawn_err)?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        // A compressor that rejects its input may exit before reading all of
        // it; its status and stderr explain more than the broken pipe does.
        if !output.status.success() {
            return Err(MinifyError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_err)?;

        String::from_utf8(output.stdout).map_err(|_| MinifyError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}
