//! Status lines

use colored::Colorize;
use std::fmt::Display;

pub fn step(message: impl Display) {
    println!("{} {}", "→".cyan(), message);
}

pub fn success(message: impl Display) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn warning(message: impl Display) {
    println!("{} {}", "!".yellow(), message);
}

pub fn failure(message: impl Display) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
