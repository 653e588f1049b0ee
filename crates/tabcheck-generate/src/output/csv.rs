use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use tabcheck_core::{Combination, FACTOR_NAMES, validate};

use crate::errors::GenerationError;
use crate::model::{SuiteKind, SuiteReport};
use crate::suites::pairwise::pair_coverage;

/// Write combinations as a delimited suite file.
///
/// Columns follow the first case's column order; an empty suite gets the
/// canonical factor header. Returns the number of bytes written.
pub fn write_suite_csv(
    path: &Path,
    cases: &[Combination],
    delimiter: u8,
) -> Result<u64, csv::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(csv::Error::from)?;
        }
    }

    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(counting);

    let header: Vec<String> = match cases.first() {
        Some(first) => first.fields().map(|(key, _)| key.to_string()).collect(),
        None => FACTOR_NAMES.iter().map(|name| name.to_string()).collect(),
    };
    writer.write_record(&header)?;

    for case in cases {
        let record: Vec<&str> = header
            .iter()
            .map(|column| case.get(column).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

/// Write a suite file and summarize it.
pub fn write_suite(
    kind: SuiteKind,
    path: &Path,
    cases: &[Combination],
    delimiter: u8,
) -> Result<SuiteReport, GenerationError> {
    let bytes_written = write_suite_csv(path, cases, delimiter)?;
    let valid_cases = cases.iter().filter(|case| validate(case).valid).count();
    let fingerprint = hash_file(path)?;

    let report = SuiteReport {
        kind,
        path: path.to_path_buf(),
        cases: cases.len(),
        valid_cases,
        invalid_cases: cases.len() - valid_cases,
        coverage: pair_coverage(cases),
        bytes_written,
        fingerprint,
    };

    info!(
        suite = %kind,
        path = %path.display(),
        cases = report.cases,
        invalid = report.invalid_cases,
        "suite written"
    );

    Ok(report)
}

pub(crate) fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
