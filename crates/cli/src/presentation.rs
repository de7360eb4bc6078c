// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use comfy_table::{Table, presets};
use devtodo_engine::Language;
use devtodo_engine::results::{ResultSet, ScanReport};
use serde::Serialize;
use std::io::Write;

/// Write the scan results in `format`.
///
/// # Errors
///
/// Serialization or write failure.
pub fn render<W: Write>(report: &ScanReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report.results)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, &report.results)?,
        OutputFormat::Jsonl => write_jsonl(&report.results, out)?,
    }
    out.flush()?;
    Ok(())
}

fn write_table<W: Write>(report: &ScanReport, out: &mut W) -> Result<()> {
    if report.results.is_empty() {
        writeln!(out, "No annotations found.")?;
    }
    for (keyword, entry) in &report.results {
        writeln!(out, "{keyword} ({})", entry.total)?;
        let mut table = Table::new();
        table.load_preset(presets::NOTHING);
        for (file, occurrences) in &entry.files {
            for occ in occurrences {
                let author = occ
                    .author
                    .as_deref()
                    .map(|a| format!("[{a}]"))
                    .unwrap_or_default();
                table.add_row(vec![
                    format!("{file}:{}", occ.line),
                    occ.message.clone(),
                    author,
                ]);
            }
        }
        writeln!(out, "{table}")?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "[devtodo] Completed: {} files scanned, {} annotations.",
        report.files_scanned,
        report.results.total()
    )?;
    Ok(())
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    keyword: &'a str,
    file: &'a str,
    #[serde(rename = "lineNo")]
    line: usize,
    message: &'a str,
    author: Option<&'a str>,
}

fn write_jsonl<W: Write>(results: &ResultSet, out: &mut W) -> Result<()> {
    for (keyword, entry) in results {
        for (file, occurrences) in &entry.files {
            for occ in occurrences {
                let record = JsonlRecord {
                    keyword,
                    file,
                    line: occ.line,
                    message: &occ.message,
                    author: occ.author.as_deref(),
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Summarise skipped files (stderr).
///
/// # Errors
///
/// Write failure.
pub fn write_skipped<W: Write>(report: &ScanReport, out: &mut W) -> Result<()> {
    if report.cancelled {
        writeln!(out, "[devtodo] scan cancelled")?;
    }
    if report.skipped.is_empty() {
        return Ok(());
    }
    writeln!(out, "[devtodo] skipped {} file(s):", report.skipped.len())?;
    for skipped in &report.skipped {
        writeln!(out, "  {}: {}", skipped.path.display(), skipped.reason)?;
    }
    Ok(())
}

/// 対応言語とコメント区切りの一覧
///
/// # Errors
///
/// Write failure.
pub fn write_languages<W: Write>(out: &mut W) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["LANGUAGE", "LINE", "BLOCK"]);
    for &lang in Language::ALL {
        let profile = lang.profile();
        let line = profile
            .line
            .map(|l| {
                l.prefixes
                    .iter()
                    .map(|p| p.trim_end())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let block = profile
            .block
            .map(|b| format!("{} {}", b.open, b.close))
            .unwrap_or_default();
        table.add_row(vec![lang.id().to_string(), line, block]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
