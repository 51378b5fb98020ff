//! File level operations of the preparation pipeline
//!
//! These read raw corpus files, run a [`SentenceSegmenter`] over every line and
//! store the result as tagged text, one document per line.

use crate::text::segmenter::SentenceSegmenter;
use crate::text::tagging::{self, TaggingError};
use crate::util::encoding;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How each line of an input file is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    #[default]
    Plain,
    Json,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineRecord {
    Plain(String),
    Json(serde_json::Value),
}

/// Which directory entries `apply_to_dir` visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirEntryFilter {
    #[default]
    All,
    FilesOnly,
    DirsOnly,
}

impl DirEntryFilter {
    fn accepts(&self, path: &Path) -> bool {
        match self {
            Self::All => true,
            Self::FilesOnly => path.is_file(),
            Self::DirsOnly => path.is_dir(),
        }
    }
}

/// List entries of `dir` as full paths, sorted by name
pub fn list_dir_full_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("cannot list directory: {:?}", dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("cannot read directory entry in {:?}", dir))?;
    paths.sort();
    Ok(paths)
}

fn log_progress(index: usize, progress_interval: usize) {
    if index > 0 && progress_interval > 0 && index % progress_interval == 0 {
        debug!("processed {} lines", index);
    }
}

/// Read a text file as trimmed lines
pub fn read_lines(path: &Path, progress_interval: usize) -> Result<Vec<String>> {
    let text = encoding::read_to_utf8(path)?;
    let lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            log_progress(i, progress_interval);
            line.trim().to_string()
        })
        .collect::<Vec<_>>();
    debug!("read {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

/// Read a JSON lines file, deserializing every line as `T`
pub fn read_json_lines_as<T: DeserializeOwned>(
    path: &Path,
    progress_interval: usize,
) -> Result<Vec<T>> {
    let text = encoding::read_to_utf8(path)?;
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        log_progress(i, progress_interval);
        let record = serde_json::from_str(line.trim())
            .with_context(|| format!("invalid json at {:?} line {}", path, i + 1))?;
        records.push(record);
    }
    debug!("read {} json records from {:?}", records.len(), path);
    Ok(records)
}

pub fn read_json_lines(path: &Path, progress_interval: usize) -> Result<Vec<serde_json::Value>> {
    read_json_lines_as(path, progress_interval)
}

/// Read a file line by line in the given format
pub fn read_file(
    path: &Path,
    format: LineFormat,
    progress_interval: usize,
) -> Result<Vec<LineRecord>> {
    Ok(match format {
        LineFormat::Plain => read_lines(path, progress_interval)?
            .into_iter()
            .map(LineRecord::Plain)
            .collect(),
        LineFormat::Json => read_json_lines(path, progress_interval)?
            .into_iter()
            .map(LineRecord::Json)
            .collect(),
    })
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("cannot create file: {:?}", path))?;
    Ok(BufWriter::new(file))
}

/// Segment every line of `in_path` and write it as tagged text to `out_path`
///
/// Returns the number of lines written. Blank input lines become empty lines.
pub fn tag_file(
    in_path: &Path,
    out_path: &Path,
    segmenter: &dyn SentenceSegmenter,
    remove_existing_tags: bool,
) -> Result<usize> {
    let text = encoding::read_to_utf8(in_path)?;
    let mut out = create_output(out_path)?;
    let mut count = 0;
    for line in text.lines() {
        let line = line.trim();
        let sentences = if remove_existing_tags {
            segmenter.segment(&tagging::strip_tags(line))
        } else {
            segmenter.segment(line)
        };
        writeln!(out, "{}", tagging::encode(&sentences))
            .with_context(|| format!("cannot write to {:?}", out_path))?;
        count += 1;
    }
    out.flush()
        .with_context(|| format!("cannot write to {:?}", out_path))?;
    debug!("tagged {} lines: {:?} -> {:?}", count, in_path, out_path);
    Ok(count)
}

/// Decode every line of a tagged file
pub fn read_tagged_file(path: &Path) -> Result<Vec<Vec<String>>> {
    let text = encoding::read_to_utf8(path)?;
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            tagging::decode(line).map_err(|e: TaggingError| {
                let category = e.category();
                anyhow::Error::new(e).context(format!(
                    "malformed tagged text at {:?} line {} ({})",
                    path,
                    i + 1,
                    category
                ))
            })
        })
        .collect()
}

/// Keep only the first `n` sentences of every line
pub fn retain_first_sentences(
    in_path: &Path,
    out_path: &Path,
    segmenter: &dyn SentenceSegmenter,
    n: usize,
    progress_interval: usize,
) -> Result<usize> {
    let text = encoding::read_to_utf8(in_path)?;
    let mut out = create_output(out_path)?;
    let mut count = 0;
    for (i, line) in text.lines().enumerate() {
        let sentences = segmenter.segment(line.trim());
        let kept = sentences.iter().take(n).map(String::as_str);
        writeln!(out, "{}", itertools::join(kept, " "))
            .with_context(|| format!("cannot write to {:?}", out_path))?;
        log_progress(i, progress_interval);
        count += 1;
    }
    out.flush()
        .with_context(|| format!("cannot write to {:?}", out_path))?;
    Ok(count)
}

/// Call `f(in_path, out_path)` for every entry of `in_dir`
///
/// `out_path` is the entry's name joined to `out_dir`. Entries are visited in
/// name order, one at a time; the first error stops the walk.
pub fn apply_to_dir<F>(
    in_dir: &Path,
    out_dir: &Path,
    filter: DirEntryFilter,
    quiet: bool,
    mut f: F,
) -> Result<usize>
where
    F: FnMut(&Path, &Path) -> Result<()>,
{
    if !in_dir.is_dir() {
        return Err(anyhow!("input directory does not exist: {:?}", in_dir));
    }
    if !out_dir.is_dir() {
        return Err(anyhow!("output directory does not exist: {:?}", out_dir));
    }
    let mut applied = 0;
    for in_path in list_dir_full_paths(in_dir)? {
        if !filter.accepts(&in_path) {
            continue;
        }
        let Some(name) = in_path.file_name() else {
            continue;
        };
        let out_path = out_dir.join(name);
        if !quiet {
            info!("applying function to {:?}", in_path);
        }
        f(&in_path, &out_path).with_context(|| format!("failed on {:?}", in_path))?;
        applied += 1;
    }
    Ok(applied)
}
