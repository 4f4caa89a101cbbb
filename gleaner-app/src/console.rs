//! Line-oriented terminal I/O: prompts that re-ask until the answer is
//! usable, plus the human-readable report lines each command prints.
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print a failure for the user and log it; the caller decides whether
    /// to carry on.
    pub fn report(&mut self, what: &str, err: &dyn Display) -> io::Result<()> {
        tracing::error!(target: "gleaner", error = %err, "{what}");
        writeln!(self.output, "error: {what}: {err}")
    }

    /// Ask once. End of input is an error so loops cannot spin forever.
    fn ask(&mut self, question: &str) -> io::Result<String> {
        writeln!(self.output, ">>> {question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Non-empty URL.
    pub fn url(&mut self) -> io::Result<String> {
        loop {
            let url = self.ask("Paste the page URL and press ENTER:")?;
            if !url.is_empty() {
                return Ok(url);
            }
            self.say("No URL detected, try again.")?;
        }
    }

    /// Show `headers` and read two in-range column indices.
    pub fn column_pair(&mut self, headers: &[String]) -> io::Result<(usize, usize)> {
        self.say("Available columns:")?;
        for (i, name) in headers.iter().enumerate() {
            self.say(format_args!("[{i}] {name}"))?;
        }
        loop {
            let Some(first) = self.index("Number of column 1 (main):")? else {
                continue;
            };
            let Some(second) = self.index("Number of column 2 (secondary):")? else {
                continue;
            };
            if first < headers.len() && second < headers.len() {
                return Ok((first, second));
            }
            self.say("That column does not exist, check the list above.")?;
        }
    }

    fn index(&mut self, question: &str) -> io::Result<Option<usize>> {
        let raw = self.ask(question)?;
        match raw.parse::<usize>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                self.say(format_args!("'{raw}' is not a column number."))?;
                Ok(None)
            }
        }
    }

    /// Account name, without a leading `@`.
    pub fn target(&mut self) -> io::Result<String> {
        loop {
            let name = self.ask("Target account:")?;
            let name = name.trim_start_matches('@');
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
    }

    /// Blank, `0` or anything non-numeric means no limit.
    pub fn limit(&mut self) -> io::Result<Option<usize>> {
        let raw = self.ask("How many followers to analyse? (0 = all, slow and risky)")?;
        Ok(raw.parse::<usize>().ok().filter(|&n| n > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    #[test]
    fn url_is_reasked_while_empty() {
        let mut c = console("\n   \nhttps://example.org\n");
        assert_eq!(c.url().unwrap(), "https://example.org");
        assert_eq!(printed(c).matches("No URL detected").count(), 2);
    }

    #[test]
    fn eof_is_an_error() {
        let mut c = console("\n");
        let err = c.url().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn column_pair_rejects_garbage_and_out_of_range() {
        let headers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut c = console("x\n0\n7\n2\n1\n");
        assert_eq!(c.column_pair(&headers).unwrap(), (2, 1));
        let out = printed(c);
        assert!(out.contains("[2] C"));
        assert!(out.contains("'x' is not a column number."));
        assert!(out.contains("does not exist"));
    }

    #[test]
    fn target_strips_at_and_skips_blank() {
        let mut c = console("\n@\n@nasa\n");
        assert_eq!(c.target().unwrap(), "nasa");
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(console("\n").limit().unwrap(), None);
        assert_eq!(console("0\n").limit().unwrap(), None);
        assert_eq!(console("many\n").limit().unwrap(), None);
        assert_eq!(console(" 25 \n").limit().unwrap(), Some(25));
    }

    #[test]
    fn report_prints_context() {
        let mut c = console("");
        c.report("download failed", &"timed out").unwrap();
        assert_eq!(printed(c), "error: download failed: timed out\n");
    }
}
