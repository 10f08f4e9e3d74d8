use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt::Write;

use crate::action::command::{format_command, is_github_actions, is_runner_debug};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
    Debug,
}

#[derive(Debug, Clone, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        self.log_message_with_trace(level, message, Vec::new());
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        if level == LogLevel::Debug && !is_runner_debug() {
            return;
        }

        println!(
            "{} {} {}",
            self.tool_signature(),
            self.format_status(level),
            message
        );
        for t in &trace {
            println!("     ↳ {}", t);
        }

        // Surface problems as annotations on the workflow run.
        if is_github_actions() {
            let annotation = std::iter::once(message)
                .chain(trace.iter().copied())
                .collect::<Vec<_>>()
                .join(": ");
            match level {
                LogLevel::Warning => println!("{}", format_command("warning", &[], &annotation)),
                LogLevel::Error => println!("{}", format_command("error", &[], &annotation)),
                _ => {}
            }
        }
    }

    fn tool_signature(&self) -> String {
        let mut s = String::new();

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');

        let _ = write!(
            &mut s,
            "{}",
            SetForegroundColor(Color::Rgb {
                r: 255,
                g: 113,
                b: 57,
            })
        );
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str("AMO");
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    fn format_status(&self, level: LogLevel) -> String {
        let (color, status) = level.style();
        let mut s = String::new();

        s.push('[');
        let _ = write!(&mut s, "{}", SetForegroundColor(color));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str(status);
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }
}

impl LogLevel {
    /// Colour and label, on the Firefox palette.
    fn style(self) -> (Color, &'static str) {
        match self {
            LogLevel::Success => (Color::Rgb { r: 18, g: 188, b: 0 }, "SUCCESS"),
            LogLevel::Error => (Color::Rgb { r: 215, g: 0, b: 34 }, "ERROR"),
            LogLevel::Info => (Color::Rgb { r: 10, g: 132, b: 255 }, "INFO"),
            LogLevel::Warning => (Color::Rgb { r: 255, g: 148, b: 0 }, "WARNING"),
            LogLevel::Debug => (Color::Rgb { r: 115, g: 115, b: 115 }, "DEBUG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_levels() {
        let logger = Logger::new();
        assert!(logger.format_status(LogLevel::Success).contains("SUCCESS"));
        assert!(logger.format_status(LogLevel::Warning).contains("WARNING"));
        assert!(logger.tool_signature().contains("AMO"));
    }

    #[test]
    fn every_level_has_its_own_colour() {
        let levels = [
            LogLevel::Success,
            LogLevel::Error,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Debug,
        ];
        let colours: Vec<Color> = levels.iter().map(|l| l.style().0).collect();
        for (i, colour) in colours.iter().enumerate() {
            assert!(!colours[i + 1..].contains(colour));
        }

        let error = Logger::new().format_status(LogLevel::Error);
        assert!(error.contains(&SetForegroundColor(Color::Rgb { r: 215, g: 0, b: 34 }).to_string()));
        assert!(error.contains("ERROR"));
    }
}
