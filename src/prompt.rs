use std::io::{BufRead, Write};

use crate::calendar;
use crate::error::{Error, ErrorKind, Result};

/// Asks for year and month on an interactive terminal (or anything line based).
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "no input given"));
        }

        Ok(answer.trim().to_owned())
    }

    /// Yes/no question; anything but `y` or `yes` (and end of input) is no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.ask(question) {
            Ok(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
            Err(e) if matches!(e.kind, ErrorKind::InvalidInput) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn ask_year(&mut self) -> Result<i32> {
        let answer = self.ask("Year (e.g. 2025): ")?;
        parse_number(&answer)
    }

    pub fn ask_month(&mut self) -> Result<u32> {
        let answer = self.ask("Month (1-12): ")?;
        calendar::validate_month(parse_number(&answer)?)
    }
}

fn parse_number<T: std::str::FromStr>(answer: &str) -> Result<T> {
    answer.parse::<T>().map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            &format!("'{}' is not a number", answer),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_year_and_month() {
        let mut p = prompt("2025\n  7 \n");
        assert_eq!(p.ask_year().unwrap(), 2025);
        assert_eq!(p.ask_month().unwrap(), 7);
        assert_eq!(
            String::from_utf8(p.output).unwrap(),
            "Year (e.g. 2025): Month (1-12): "
        );
    }

    #[test]
    fn rejects_non_numeric() {
        let err = prompt("twenty\n").ask_year().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput));
        assert!(err.to_string().contains("'twenty'"));
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert!(prompt("13\n").ask_month().is_err());
        assert!(prompt("0\n").ask_month().is_err());
    }

    #[test]
    fn confirmation() {
        assert!(prompt("y\n").confirm("Download? ").unwrap());
        assert!(prompt(" YES \n").confirm("Download? ").unwrap());
        assert!(!prompt("n\n").confirm("Download? ").unwrap());
        assert!(!prompt("").confirm("Download? ").unwrap());
    }

    #[test]
    fn end_of_input() {
        let err = prompt("").ask_year().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput));
    }
}
