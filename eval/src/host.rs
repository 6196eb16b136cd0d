use std::io::{self, BufRead, Write};

use rand::rngs::ThreadRng;
use rand::Rng;

/// The console and randomness the builtins act on.
pub trait Host {
    /// Write `text` as is, without a trailing newline.
    fn print(&mut self, text: &str) -> io::Result<()>;
    /// Next input line without its line terminator, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    /// Uniformly distributed in `0..bound`. Callers guarantee `bound > 0`.
    fn rand(&mut self, bound: i64) -> i64;
}

#[derive(Default)]
pub struct StdHost {
    rng: ThreadRng,
}

impl StdHost {
    pub fn new() -> StdHost {
        StdHost {
            rng: rand::thread_rng(),
        }
    }
}

impl Host for StdHost {
    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(line)))
    }

    fn rand(&mut self, bound: i64) -> i64 {
        self.rng.gen_range(0..bound)
    }
}

pub fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
