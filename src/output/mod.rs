// mod.rs - Output formatters module

use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::core::DistanceMatrix;

/// Distance matrix output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    MoltenTsv,
    MoltenCsv,
    Phylip,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "molten" | "molten-tsv" => Ok(OutputFormat::MoltenTsv),
            "molten-csv" => Ok(OutputFormat::MoltenCsv),
            "phylip" => Ok(OutputFormat::Phylip),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unsupported output format: {}. Use: tsv, csv, molten, molten-csv, phylip, json",
                s
            )),
        }
    }
}

impl OutputFormat {
    pub fn description(&self) -> &str {
        match self {
            OutputFormat::Tsv => "tab-separated matrix",
            OutputFormat::Csv => "comma-separated matrix",
            OutputFormat::MoltenTsv => "tab-separated pairs",
            OutputFormat::MoltenCsv => "comma-separated pairs",
            OutputFormat::Phylip => "PHYLIP square matrix",
            OutputFormat::Json => "JSON",
        }
    }
}

/// How the matrix is rendered
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Top-left header cell; `None` leaves it blank
    pub corner: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tsv,
            corner: Some(default_corner()),
        }
    }
}

/// "snp-dists <version>", the label used for the top-left cell
pub fn default_corner() -> String {
    format!("{} {}", crate::EXENAME, crate::VERSION)
}

#[derive(Serialize)]
struct JsonMatrix<'a> {
    names: &'a [&'a str],
    matrix: Vec<&'a [usize]>,
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                format!("Failed to create parent directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

/// Buffered writer for the output file, or stdout when no path is given
pub fn open_output(file_path: Option<&str>) -> Result<Box<dyn Write>, String> {
    match file_path {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = File::create(path)
                .map_err(|e| format!("Failed to create output file '{}': {}", path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn write_error(e: impl std::fmt::Display) -> String {
    format!("Write error: {}", e)
}

/// Header row then one row per sequence: name followed by its distances
fn write_delimited<W: Write>(
    writer: W,
    delimiter: u8,
    names: &[&str],
    matrix: &DistanceMatrix,
    corner: Option<&str>,
) -> Result<(), String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    let header = std::iter::once(corner.unwrap_or("")).chain(names.iter().copied());
    wtr.write_record(header).map_err(write_error)?;

    for (name, row) in names.iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(name.to_string());
        record.extend(row.iter().map(|d| d.to_string()));
        wtr.write_record(&record).map_err(write_error)?;
    }

    wtr.flush().map_err(|e| format!("Flush error: {}", e))
}

/// One line per ordered pair, row-major, self pairs included
fn write_molten<W: Write>(
    writer: W,
    delimiter: u8,
    names: &[&str],
    matrix: &DistanceMatrix,
) -> Result<(), String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    for (i, row) in matrix.rows().enumerate() {
        for (j, distance) in row.iter().enumerate() {
            let distance = distance.to_string();
            wtr.write_record([names[i], names[j], distance.as_str()])
                .map_err(write_error)?;
        }
    }

    wtr.flush().map_err(|e| format!("Flush error: {}", e))
}

fn write_phylip<W: Write>(mut writer: W, names: &[&str], matrix: &DistanceMatrix) -> Result<(), String> {
    writeln!(writer, "    {}", names.len()).map_err(write_error)?;
    for (name, row) in names.iter().zip(matrix.rows()) {
        write!(writer, "{:<10}", name).map_err(write_error)?;
        for distance in row {
            write!(writer, " {}", distance).map_err(write_error)?;
        }
        writeln!(writer).map_err(write_error)?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}

fn write_json<W: Write>(mut writer: W, names: &[&str], matrix: &DistanceMatrix) -> Result<(), String> {
    let document = JsonMatrix {
        names,
        matrix: matrix.rows().collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &document)
        .map_err(|e| format!("Failed to serialize matrix: {}", e))?;
    writeln!(writer).map_err(write_error)?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}

/// Write distance matrix in the specified format
pub fn write_matrix<W: Write>(
    writer: W,
    names: &[&str],
    matrix: &DistanceMatrix,
    options: &OutputOptions,
) -> Result<(), String> {
    if names.len() != matrix.len() {
        return Err(format!(
            "Matrix has {} rows but {} names were given",
            matrix.len(),
            names.len()
        ));
    }

    let corner = options.corner.as_deref();
    match options.format {
        OutputFormat::Tsv => write_delimited(writer, b'\t', names, matrix, corner),
        OutputFormat::Csv => write_delimited(writer, b',', names, matrix, corner),
        OutputFormat::MoltenTsv => write_molten(writer, b'\t', names, matrix),
        OutputFormat::MoltenCsv => write_molten(writer, b',', names, matrix),
        OutputFormat::Phylip => write_phylip(writer, names, matrix),
        OutputFormat::Json => write_json(writer, names, matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DistanceEngine;
    use crate::data::{Alignment, SequenceRecord};

    fn example() -> (Vec<&'static str>, DistanceMatrix) {
        let alignment = Alignment::from_records(vec![
            SequenceRecord::new("s1", "ACGT"),
            SequenceRecord::new("s2", "ACGA"),
            SequenceRecord::new("s3", "ACGT"),
        ])
        .unwrap();
        let matrix = DistanceEngine::default().compute(&alignment);
        (vec!["s1", "s2", "s3"], matrix)
    }

    fn render(format: OutputFormat, corner: Option<&str>) -> String {
        let (names, matrix) = example();
        let options = OutputOptions {
            format,
            corner: corner.map(str::to_string),
        };
        let mut buffer = Vec::new();
        write_matrix(&mut buffer, &names, &matrix, &options).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_tsv_output() {
        let out = render(OutputFormat::Tsv, Some("snp-dists 0.6.3"));
        assert_eq!(
            out,
            "snp-dists 0.6.3\ts1\ts2\ts3\ns1\t0\t1\t0\ns2\t1\t0\t1\ns3\t0\t1\t0\n"
        );
    }

    #[test]
    fn test_blank_corner() {
        let out = render(OutputFormat::Csv, None);
        assert_eq!(out.lines().next().unwrap(), ",s1,s2,s3");
    }

    #[test]
    fn test_delimiter_does_not_change_values() {
        let tsv = render(OutputFormat::Tsv, Some("x"));
        let csv = render(OutputFormat::Csv, Some("x"));
        assert_eq!(tsv.replace('\t', ","), csv);
    }

    #[test]
    fn test_molten_output() {
        let out = render(OutputFormat::MoltenTsv, Some("ignored"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "s1\ts1\t0");
        assert_eq!(lines[1], "s1\ts2\t1");
        assert_eq!(lines[5], "s2\ts3\t1");

        let out = render(OutputFormat::MoltenCsv, None);
        assert!(out.starts_with("s1,s1,0\ns1,s2,1\n"));
    }

    #[test]
    fn test_names_written_verbatim() {
        let (_, matrix) = example();
        let names = ["s\"1", "a,b", "c d"];
        let options = OutputOptions {
            format: OutputFormat::Tsv,
            corner: None,
        };
        let mut buffer = Vec::new();
        write_matrix(&mut buffer, &names, &matrix, &options).unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert_eq!(out.lines().next().unwrap(), "\ts\"1\ta,b\tc d");
        assert!(out.contains("\ns\"1\t0\t1\t0\n"));

        let options = OutputOptions {
            format: OutputFormat::MoltenTsv,
            corner: None,
        };
        let mut buffer = Vec::new();
        write_matrix(&mut buffer, &names, &matrix, &options).unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.starts_with("s\"1\ts\"1\t0\ns\"1\ta,b\t1\n"));
    }

    #[test]
    fn test_phylip_output() {
        let out = render(OutputFormat::Phylip, None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "    3");
        assert_eq!(lines[2], "s2         1 0 1");
    }

    #[test]
    fn test_json_output() {
        let out = render(OutputFormat::Json, None);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["names"][1], "s2");
        assert_eq!(value["matrix"][1], serde_json::json!([1, 0, 1]));
    }

    #[test]
    fn test_name_count_mismatch() {
        let (_, matrix) = example();
        let mut buffer = Vec::new();
        let result = write_matrix(&mut buffer, &["s1"], &matrix, &OutputOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("TSV").unwrap(), OutputFormat::Tsv);
        assert_eq!(OutputFormat::from_str("molten").unwrap(), OutputFormat::MoltenTsv);
        assert_eq!(OutputFormat::from_str("phylip").unwrap(), OutputFormat::Phylip);
        assert!(OutputFormat::from_str("nexus").is_err());
    }

    #[test]
    fn test_open_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/matrix.tsv");
        let path_str = path.to_str().unwrap();
        {
            let (names, matrix) = example();
            let writer = open_output(Some(path_str)).unwrap();
            write_matrix(writer, &names, &matrix, &OutputOptions::default()).unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&default_corner()));
    }
}
