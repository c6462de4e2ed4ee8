//! User prompts
//!
//! `TerminalPrompter` asks on an interactive terminal and re-asks on bad
//! input; end of input cancels. `ScriptedPrompter` reads one answer per line
//! from any reader and falls back to the default for blank, invalid or
//! missing answers, so it never blocks waiting for a terminal.

use std::io::{self, BufRead, Write};

/// Source of answers for interactive commands
///
/// `None` means the user cancelled.
pub trait Prompter {
    /// Yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool>;

    /// Pick one option, returning its index
    fn select(&mut self, message: &str, options: &[&str], default: usize)
        -> io::Result<Option<usize>>;

    /// Toggle any number of options
    fn multi_select(
        &mut self,
        message: &str,
        options: &[&str],
        selected: &[bool],
    ) -> io::Result<Option<Vec<bool>>>;

    /// Free text; an empty answer yields the default (or an empty string)
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>>;
}

fn print_prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

fn print_options(message: &str, options: &[&str]) {
    println!("{message}");
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
}

fn print_toggles(message: &str, options: &[&str], selected: &[bool]) {
    println!("{message}");
    for (i, option) in options.iter().enumerate() {
        let mark = if selected.get(i).copied().unwrap_or(false) {
            'x'
        } else {
            ' '
        };
        println!("  {}. [{mark}] {option}", i + 1);
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

/// Parse `1,3` style answers. `none` clears every option.
fn parse_toggles(answer: &str, len: usize) -> Option<Vec<bool>> {
    let answer = answer.trim();
    let mut picked = vec![false; len];
    if answer.eq_ignore_ascii_case("none") {
        return Some(picked);
    }
    for part in answer.split(|c: char| c == ',' || c.is_whitespace()) {
        if part.is_empty() {
            continue;
        }
        let index = parse_choice(part, len)?;
        picked[index] = true;
    }
    Some(picked)
}

fn default_marks(selected: &[bool]) -> String {
    let marks: Vec<String> = selected
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if marks.is_empty() {
        "none".to_string()
    } else {
        marks.join(",")
    }
}

fn yes_no_hint(default: bool) -> &'static str {
    if default {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}

/// Prompts on the controlling terminal
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Read one line; `None` at end of input
    fn read_line(prompt: &str) -> io::Result<Option<String>> {
        print_prompt(prompt)?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        loop {
            let Some(answer) = Self::read_line(&format!("{message} {} ", yes_no_hint(default)))?
            else {
                return Ok(false);
            };
            if answer.trim().is_empty() {
                return Ok(default);
            }
            if let Some(value) = parse_yes_no(&answer) {
                return Ok(value);
            }
            println!("Please answer y or n.");
        }
    }

    fn select(
        &mut self,
        message: &str,
        options: &[&str],
        default: usize,
    ) -> io::Result<Option<usize>> {
        print_options(message, options);
        loop {
            let Some(answer) = Self::read_line(&format!("Choice [{}]: ", default + 1))? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(default));
            }
            if let Some(index) = parse_choice(&answer, options.len()) {
                return Ok(Some(index));
            }
            println!("Enter a number between 1 and {}.", options.len());
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        options: &[&str],
        selected: &[bool],
    ) -> io::Result<Option<Vec<bool>>> {
        print_toggles(message, options, selected);
        loop {
            let prompt = format!(
                "Numbers separated by commas, or 'none' [{}]: ",
                default_marks(selected)
            );
            let Some(answer) = Self::read_line(&prompt)? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(selected.to_vec()));
            }
            if let Some(picked) = parse_toggles(&answer, options.len()) {
                return Ok(Some(picked));
            }
            println!("Enter numbers between 1 and {}.", options.len());
        }
    }

    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let prompt = match default {
            Some(d) if !d.is_empty() => format!("{message} [{d}]: "),
            _ => format!("{message}: "),
        };
        let Some(answer) = Self::read_line(&prompt)? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Some(default.unwrap_or_default().to_string()));
        }
        Ok(Some(answer.to_string()))
    }
}

/// Reads answers line by line, never blocking on a terminal
pub struct ScriptedPrompter<R> {
    reader: R,
}

impl<R: BufRead> ScriptedPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next answer, `None` once the input is exhausted or unreadable
    fn next_answer(&mut self, prompt: &str) -> Option<String> {
        let mut line = String::new();
        let answer = match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()).filter(|a| !a.is_empty()),
        };
        println!("{prompt}{}", answer.as_deref().unwrap_or_default());
        answer
    }
}

impl<R: BufRead> Prompter for ScriptedPrompter<R> {
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        let answer = self.next_answer(&format!("{message} {} ", yes_no_hint(default)));
        Ok(answer.and_then(|a| parse_yes_no(&a)).unwrap_or(default))
    }

    fn select(
        &mut self,
        message: &str,
        options: &[&str],
        default: usize,
    ) -> io::Result<Option<usize>> {
        print_options(message, options);
        let answer = self.next_answer(&format!("Choice [{}]: ", default + 1));
        Ok(Some(
            answer
                .and_then(|a| parse_choice(&a, options.len()))
                .unwrap_or(default),
        ))
    }

    fn multi_select(
        &mut self,
        message: &str,
        options: &[&str],
        selected: &[bool],
    ) -> io::Result<Option<Vec<bool>>> {
        print_toggles(message, options, selected);
        let answer = self.next_answer(&format!(
            "Numbers separated by commas, or 'none' [{}]: ",
            default_marks(selected)
        ));
        Ok(Some(
            answer
                .and_then(|a| parse_toggles(&a, options.len()))
                .unwrap_or_else(|| selected.to_vec()),
        ))
    }

    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let prompt = match default {
            Some(d) if !d.is_empty() => format!("{message} [{d}]: "),
            _ => format!("{message}: "),
        };
        let answer = self.next_answer(&prompt);
        Ok(Some(
            answer.unwrap_or_else(|| default.unwrap_or_default().to_string()),
        ))
    }
}
