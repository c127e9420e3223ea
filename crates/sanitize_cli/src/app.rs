//! Read names, sanitize them in parallel, print the results

use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use rayon::prelude::*;
use sanitize_core::{Mode, Sanitizer};
use serde::Serialize;

use crate::config::{AppConfig, OutputConfig, OutputFormat};

/// One sanitized name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Renamed {
    /// Original name, lossily decoded for display
    pub input: String,
    pub output: String,
    pub changed: bool,
}

/// Run the tool with a fully merged configuration
pub fn run(config: &AppConfig, names: &[OsString]) -> anyhow::Result<()> {
    let sanitizer = config.sanitizer();

    let inputs = if names.is_empty() {
        tracing::debug!("Reading names from stdin");
        read_lines(io::stdin().lock())?
    } else {
        names.iter().map(|n| n.as_encoded_bytes().to_vec()).collect()
    };

    let results = sanitize_all(&sanitizer, config.sanitize.mode, &inputs);
    let changed = results.iter().filter(|r| r.changed).count();
    tracing::info!(
        total = results.len(),
        changed,
        mode = %config.sanitize.mode,
        "Sanitized names"
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_results(&mut out, &results, &config.output)?;
    out.flush()?;
    Ok(())
}

/// Split `reader` into non-empty lines of raw bytes, dropping `\r\n` endings
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Sanitize every input, keeping input order
pub fn sanitize_all(sanitizer: &Sanitizer, mode: Mode, inputs: &[Vec<u8>]) -> Vec<Renamed> {
    inputs
        .par_iter()
        .map(|input| {
            let output = sanitizer.apply_bytes(mode, input);
            let changed = output.as_bytes() != input.as_slice();
            if changed {
                tracing::debug!(input = %String::from_utf8_lossy(input), output = %output, "Renamed");
            }
            Renamed {
                input: String::from_utf8_lossy(input).into_owned(),
                output,
                changed,
            }
        })
        .collect()
}

pub fn write_results<W: Write>(
    out: &mut W,
    results: &[Renamed],
    options: &OutputConfig,
) -> anyhow::Result<()> {
    for result in results {
        if options.changed_only && !result.changed {
            continue;
        }
        match options.format {
            OutputFormat::Plain => writeln!(out, "{}", result.output)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(result)?)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(names: &[&str]) -> Vec<Vec<u8>> {
        names.iter().map(|n| n.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_read_lines() {
        let data: &[u8] = b"first\r\nsecond\n\nthi\xffrd\n";
        let lines = read_lines(data).unwrap();
        assert_eq!(lines, vec![b"first".to_vec(), b"second".to_vec(), b"thi\xffrd".to_vec()]);
    }

    #[test]
    fn test_sanitize_all_keeps_order() {
        let sanitizer = Sanitizer::new();
        let names: Vec<String> = (0..200).map(|i| format!("file__{i}?.txt")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let results = sanitize_all(&sanitizer, Mode::Clean, &inputs(&names));
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.output, format!("file_{i}.txt"));
            assert!(result.changed);
        }
    }

    #[test]
    fn test_unchanged_flag() {
        let sanitizer = Sanitizer::new();
        let results = sanitize_all(&sanitizer, Mode::Name, &inputs(&["ok.txt", "a:b"]));
        assert!(!results[0].changed);
        assert!(results[1].changed);
        assert_eq!(results[1].output, "ab");
    }

    #[test]
    fn test_write_plain_changed_only() {
        let sanitizer = Sanitizer::new();
        let results = sanitize_all(&sanitizer, Mode::Clean, &inputs(&["ok.txt", "a  b"]));
        let options = OutputConfig {
            format: OutputFormat::Plain,
            changed_only: true,
        };

        let mut out = Vec::new();
        write_results(&mut out, &results, &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab\n");
    }

    #[test]
    fn test_write_json() {
        let sanitizer = Sanitizer::new();
        let results = sanitize_all(&sanitizer, Mode::Name, &inputs(&["a|b"]));
        let options = OutputConfig {
            format: OutputFormat::Json,
            changed_only: false,
        };

        let mut out = Vec::new();
        write_results(&mut out, &results, &options).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"input\":\"a|b\",\"output\":\"ab\",\"changed\":true}\n"
        );
    }
}
