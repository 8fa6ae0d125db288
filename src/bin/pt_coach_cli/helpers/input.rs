// ABOUTME: Line-based stdin prompts for the interactive pt-coach wizard
// ABOUTME: Re-asks on unparsable answers; closed input ends the session cleanly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Result};
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers from stdin one line at a time
pub struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line
    pub async fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt} ");
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_owned()),
            None => bail!("input closed"),
        }
    }

    /// Read a line, `None` when left blank
    pub async fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = self.ask(prompt).await?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Read until the answer parses as `T`
    pub async fn ask_parsed<T>(&mut self, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let answer = self.ask(prompt).await?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(error) => println!("  {error}"),
            }
        }
    }

    /// Yes/no question; blank takes `default`
    pub async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{prompt} {hint}")).await?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("  Please answer y or n."),
            }
        }
    }

    /// Numbered menu; returns the chosen index
    pub async fn choose<T: Display>(&mut self, prompt: &str, options: &[T]) -> Result<usize> {
        println!("{prompt}");
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
        loop {
            let choice: usize = self.ask_parsed(">").await?;
            if (1..=options.len()).contains(&choice) {
                return Ok(choice - 1);
            }
            println!("  Choose a number between 1 and {}.", options.len());
        }
    }

    /// Comma-separated menu numbers; blank selects nothing
    pub async fn choose_many<T: Display>(&mut self, prompt: &str, options: &[T]) -> Result<Vec<usize>> {
        println!("{prompt}");
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
        'ask: loop {
            let answer = self.ask("Numbers, comma separated (blank for none):").await?;
            let mut picked = Vec::new();
            for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                match part.parse::<usize>() {
                    Ok(n) if (1..=options.len()).contains(&n) => {
                        if !picked.contains(&(n - 1)) {
                            picked.push(n - 1);
                        }
                    }
                    _ => {
                        println!("  '{part}' is not one of the listed numbers.");
                        continue 'ask;
                    }
                }
            }
            return Ok(picked);
        }
    }
}
