//! Output formatting for search results

use crate::index::IndexEntry;
use crate::search::SearchResult;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// JSON shape of a single result row
#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub position: usize,
    pub name: String,
    pub path: String,
    pub is_dir: bool,
}

/// JSON shape of a whole result
#[derive(Debug, Serialize)]
pub struct JsonResult {
    pub results: Vec<JsonEntry>,
    pub folders: usize,
    pub files: usize,
}

impl JsonResult {
    pub fn from_result<E: IndexEntry>(result: &SearchResult<E>) -> Self {
        let results = result
            .entries()
            .iter()
            .map(|row| JsonEntry {
                position: row.position,
                name: row.entry.name().to_string(),
                // Entries whose path cannot be rebuilt fall back to the bare name
                path: row
                    .entry
                    .full_path()
                    .unwrap_or_else(|_| row.entry.name().to_string()),
                is_dir: row.entry.is_dir(),
            })
            .collect();
        Self {
            results,
            folders: result.folder_count(),
            files: result.file_count(),
        }
    }
}

/// Print results one path per line, folders highlighted, followed by counts
pub fn print_results<E: IndexEntry>(result: &SearchResult<E>, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_results(&mut stdout, result)
}

/// Write results to any color-capable writer
pub fn write_results<W: WriteColor, E: IndexEntry>(out: &mut W, result: &SearchResult<E>) -> io::Result<()> {
    for entry in result.iter() {
        let path = entry.full_path().unwrap_or_else(|_| entry.name().to_string());
        if entry.is_dir() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            write!(out, "{}/", path)?;
            out.reset()?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", path)?;
        }
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(
        out,
        "{} results ({} folders, {} files)",
        result.len(),
        result.folder_count(),
        result.file_count()
    )?;
    out.reset()?;
    writeln!(out)?;

    Ok(())
}

/// Print results as pretty JSON
pub fn print_json<E: IndexEntry>(result: &SearchResult<E>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &JsonResult::from_result(result))?;
    writeln!(handle)?;
    Ok(())
}
