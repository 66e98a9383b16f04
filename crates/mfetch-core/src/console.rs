//! User-facing console: status lines out, one yes/no answer in.

use std::io::{self, BufRead, Stdin, Stdout, Write};

/// Input and output streams for the fetcher. Tests pass byte buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Console::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` without a newline and read one answer line.
    ///
    /// Only `y` (any case, surrounding whitespace ignored) counts as yes.
    /// An empty answer or end of input is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut answer = String::new();
        let n = self.input.read_line(&mut answer)?;
        if n == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_yes(&answer))
    }
}

/// True for an affirmative answer.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
