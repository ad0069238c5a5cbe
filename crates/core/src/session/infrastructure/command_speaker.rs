use std::process::{Command, Stdio};

use crate::session::domain::narrator::Speaker;

/// Speaks by running an external text-to-speech program with the text as
/// its last argument, e.g. `espeak` or `say`.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line such as `"espeak -s 150"` on whitespace.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(format!("{} exited with {status}", self.program).into());
        }
        Ok(())
    }
}

/// Writes narration to the log instead of speaking it.
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("[narration] {text}");
        Ok(())
    }
}
