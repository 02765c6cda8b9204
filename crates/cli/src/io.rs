//! Validated terminal input.
//!
//! Every reader re-prompts until it has a value the core can trust, so
//! downstream code never sees raw console text.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use floorcraft_core::order::validate_customer_name;

const DATE_INPUT_FORMAT: &str = "%m-%d-%Y";

/// The primitives the controller consumes. All values come back already
/// validated; `allow_empty` variants return `None` when the user keeps
/// the current value by entering nothing.
pub trait UserIo {
    fn print(&mut self, line: &str);
    fn read_name(&mut self, prompt: &str) -> String;
    fn read_name_allow_empty(&mut self, prompt: &str) -> String;
    fn read_u32_in_range(&mut self, prompt: &str, min: u32, max: u32) -> u32;
    fn read_u32_allow_empty(&mut self, prompt: &str, min: u32, max: u32) -> Option<u32>;
    fn read_decimal_in_range(&mut self, prompt: &str, min: Decimal, max: Decimal) -> Decimal;
    fn read_decimal_allow_empty(&mut self, prompt: &str, min: Decimal, max: Decimal)
    -> Option<Decimal>;
    fn read_date(&mut self, prompt: &str) -> NaiveDate;
    fn read_yes_no(&mut self, prompt: &str) -> bool;
}

/// Console implementation over any line-oriented reader/writer pair;
/// production uses stdin/stdout, tests use in-memory buffers.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl ConsoleIo<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The writer, for tests that inspect what was displayed.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> String {
        writeln!(self.output, "{prompt}").expect("terminal output closed");
        self.output.flush().expect("terminal output closed");
        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .expect("terminal input failed");
        if bytes == 0 {
            // Interactive sessions cannot continue past a closed stdin.
            panic!("terminal input closed");
        }
        line.trim().to_string()
    }
}

impl<R: BufRead, W: Write> UserIo for ConsoleIo<R, W> {
    fn print(&mut self, line: &str) {
        writeln!(self.output, "{line}").expect("terminal output closed");
    }

    fn read_name(&mut self, prompt: &str) -> String {
        loop {
            let value = self.read_line(prompt);
            match validate_customer_name(&value) {
                Ok(()) => return value,
                Err(e) => self.print(&e.to_string()),
            }
        }
    }

    fn read_name_allow_empty(&mut self, prompt: &str) -> String {
        loop {
            let value = self.read_line(prompt);
            if value.is_empty() {
                return value;
            }
            match validate_customer_name(&value) {
                Ok(()) => return value,
                Err(e) => self.print(&e.to_string()),
            }
        }
    }

    fn read_u32_in_range(&mut self, prompt: &str, min: u32, max: u32) -> u32 {
        loop {
            if let Some(value) = self.read_u32_allow_empty(prompt, min, max) {
                return value;
            }
            self.print("No input received, please try again.");
        }
    }

    fn read_u32_allow_empty(&mut self, prompt: &str, min: u32, max: u32) -> Option<u32> {
        loop {
            let value = self.read_line(prompt);
            if value.is_empty() {
                return None;
            }
            match value.parse::<u32>() {
                Ok(n) if (min..=max).contains(&n) => return Some(n),
                _ => self.print(&format!("Please enter a number between {min} and {max}.")),
            }
        }
    }

    fn read_decimal_in_range(&mut self, prompt: &str, min: Decimal, max: Decimal) -> Decimal {
        loop {
            if let Some(value) = self.read_decimal_allow_empty(prompt, min, max) {
                return value;
            }
            self.print("No input received, please try again.");
        }
    }

    fn read_decimal_allow_empty(
        &mut self,
        prompt: &str,
        min: Decimal,
        max: Decimal,
    ) -> Option<Decimal> {
        loop {
            let value = self.read_line(prompt);
            if value.is_empty() {
                return None;
            }
            match value.parse::<Decimal>() {
                Ok(n) if n >= min && n <= max => return Some(n),
                _ => self.print(&format!("Please enter a number between {min} and {max}.")),
            }
        }
    }

    fn read_date(&mut self, prompt: &str) -> NaiveDate {
        loop {
            let value = self.read_line(prompt);
            match NaiveDate::parse_from_str(&value, DATE_INPUT_FORMAT) {
                Ok(date) => return date,
                Err(_) => self.print("Please enter a date as MM-DD-YYYY."),
            }
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> bool {
        loop {
            let value = self.read_line(prompt).to_ascii_lowercase();
            match value.as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.print("Please answer Y or N."),
            }
        }
    }
}
