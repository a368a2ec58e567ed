//! Colored tree output for the terminal
//!
//! This module provides `ConsolePrinter` which prints a finished walk the
//! way `tree` does, coloring directories, files and error markers.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::icons::directory_icon;
use crate::tree::{EntryKind, StructureModel};

use super::tree::summary_line;

/// Width of one tree level (`│   `, `├── `), in characters.
const LEVEL_WIDTH: usize = 4;

/// Console printer for a finished walk.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePrinter {
    use_color: bool,
}

impl ConsolePrinter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print to stdout.
    pub fn print(&self, model: &StructureModel) -> io::Result<()> {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(&mut stdout, model)
    }

    /// Write the tree, then the `N directories, M files` summary.
    pub fn write_to<W: WriteColor>(&self, out: &mut W, model: &StructureModel) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        writeln!(out, "{} {}", directory_icon(model.root_name()), model.root_name())?;
        out.reset()?;

        for (entry, line) in model.entries().iter().zip(model.lines()) {
            // The tree graphics are the first (depth + 1) levels of the line
            let split = line
                .char_indices()
                .nth((entry.depth + 1) * LEVEL_WIDTH)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            let (graphics, label) = line.split_at(split);

            write!(out, "{}", graphics)?;
            let mut spec = ColorSpec::new();
            match &entry.kind {
                EntryKind::Directory => spec.set_fg(Some(Color::Blue)).set_bold(true),
                EntryKind::File { .. } => spec.set_fg(Some(Color::White)),
                EntryKind::AccessDenied => spec.set_fg(Some(Color::Yellow)),
                EntryKind::Error { .. } => spec.set_fg(Some(Color::Red)),
            };
            out.set_color(&spec)?;
            write!(out, "{}", label)?;
            out.reset()?;
            writeln!(out)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", summary_line(model))?;
        Ok(())
    }
}
