//! Blocking console interaction
//!
//! All user-facing text and prompts go through `Prompter`, so the pipeline
//! can be driven from scripted input in tests.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use log::debug;

use crate::errors::{AppError, AppResult};

/// Interactive input and output
pub trait Prompter {
    /// Print a line of text
    fn echo(&mut self, text: &str) -> AppResult<()>;

    /// Ask for an integer in `[0, count - 1]`, re-prompting until one is given
    fn prompt_index(&mut self, message: &str, count: usize) -> AppResult<usize>;

    /// Ask a yes/no question; the default answer is no
    fn confirm(&mut self, message: &str) -> AppResult<bool>;
}

/// Prompter over any buffered reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin and stdout
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(AppError::Aborted);
        }

        let answer = line.trim().to_string();
        debug!("Prompt answer: {:?}", answer);
        Ok(answer)
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn echo(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn prompt_index(&mut self, message: &str, count: usize) -> AppResult<usize> {
        if count == 0 {
            return Err(AppError::InvalidArgument("nothing to select from".to_string()));
        }
        let upper = count - 1;

        loop {
            let answer = self.ask(&format!("{}: ", message))?;
            if answer.is_empty() {
                continue;
            }

            match answer.parse::<i64>() {
                Ok(value) if value >= 0 && (value as u64) <= upper as u64 => return Ok(value as usize),
                Ok(value) => {
                    writeln!(self.output, "Error: {} is not in the range 0<=x<={}.", value, upper)?;
                }
                Err(_) => {
                    writeln!(self.output, "Error: '{}' is not a valid integer range.", answer)?;
                }
            }
        }
    }

    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        loop {
            let answer = self.ask(&format!("{} [y/N]: ", message))?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Error: invalid input")?,
            }
        }
    }
}
