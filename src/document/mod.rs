//! Template documents and file I/O.
//!
//! A solver template is plain line-oriented text containing exactly one
//! marker line (`.2D_INT`) followed by the six-line integration block.
//! Everything before the marker and after the block is opaque to this
//! tool and passes through byte-for-byte; only the block is rewritten.

use crate::geometry::RegionGeometry;
use crate::{Error, Result};
use log::debug;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker line opening the integration block.
pub const MARKER: &str = ".2D_INT";

/// Number of content lines in the integration block following the marker.
pub const BLOCK_LINES: usize = 6;

/// A solver template split around the integration block.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDocument {
    /// Lines up to and including the marker.
    prefix: Vec<String>,
    /// The parsed integration region.
    region: RegionGeometry,
    /// Lines after the integration block.
    suffix: Vec<String>,
}

impl InputDocument {
    /// Parse a template from its full text.
    ///
    /// The marker must occur exactly once, with at least [`BLOCK_LINES`]
    /// lines following it. Line endings are normalized to `\n`.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();

        let mut markers = lines.iter().enumerate().filter(|(_, l)| **l == MARKER);
        let marker_idx = match markers.next() {
            Some((idx, _)) => idx,
            None => return Err(Error::MarkerNotFound),
        };
        let extra = markers.count();
        if extra > 0 {
            return Err(Error::DuplicateMarker(extra + 1));
        }

        let block_end = (marker_idx + 1 + BLOCK_LINES).min(lines.len());
        let block = &lines[marker_idx + 1..block_end];
        // Line numbers are 1-based; the block starts two lines past the
        // marker's 0-based index.
        let region = RegionGeometry::from_block(block, marker_idx + 2)?;

        Ok(Self {
            prefix: lines[..=marker_idx].iter().map(|l| l.to_string()).collect(),
            region,
            suffix: lines[block_end..].iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Read and parse a template file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The parsed integration region.
    #[inline]
    pub fn region(&self) -> &RegionGeometry {
        &self.region
    }

    /// Render the document with its own region (identity rewrite).
    pub fn render(&self) -> String {
        self.render_with(&self.region)
    }

    /// Render the document with a replacement region.
    ///
    /// Produces the prefix lines, the six block lines of `region`, then
    /// the suffix lines, each newline-terminated.
    pub fn render_with(&self, region: &RegionGeometry) -> String {
        let mut out = String::new();
        for line in &self.prefix {
            out.push_str(line);
            out.push('\n');
        }
        for line in region.block_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        for line in &self.suffix {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Derive the path of slice `index` from the input path.
///
/// `basename.ext` maps to `basename_{index}.ext` next to the input;
/// an input without an extension maps to `basename_{index}`.
pub fn output_path(input: &Path, index: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };
    input.with_file_name(name)
}

/// Render and write one file per region, returning the written paths.
///
/// Files are named with [`output_path`], re-rooted under `output_dir`
/// when given (the directory is created as needed). Existing files are
/// silently overwritten. Writes are independent and fan out over the
/// rayon thread pool; a failed write is terminal and leaves the files
/// written so far on disk.
pub fn write_documents<I>(
    doc: &InputDocument,
    regions: I,
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = RegionGeometry>,
{
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let jobs: Vec<(PathBuf, RegionGeometry)> = regions
        .into_iter()
        .enumerate()
        .map(|(s, region)| {
            let mut path = output_path(input, s as u32);
            if let Some(dir) = output_dir {
                if let Some(name) = path.file_name() {
                    path = dir.join(name);
                }
            }
            (path, region)
        })
        .collect();

    jobs.par_iter().try_for_each(|(path, region)| {
        debug!("writing {}", path.display());
        fs::write(path, doc.render_with(region)).map_err(Error::Io)
    })?;

    Ok(jobs.into_iter().map(|(path, _)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::slice::{Axis, Slicer};

    const TEMPLATE: &str = "\
* sweep template
.2D_INT
0 0 0
1 0 0
4
0 1 0
4
4
* trailing solver cards
.END
";

    #[test]
    fn test_parse() {
        let doc = InputDocument::parse(TEMPLATE).unwrap();
        assert_eq!(doc.region().p1, Point3::zero());
        assert_eq!(doc.region().u(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(doc.region().v(), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_render_identity() {
        let doc = InputDocument::parse(TEMPLATE).unwrap();
        assert_eq!(doc.render(), TEMPLATE);
    }

    #[test]
    fn test_prefix_suffix_pass_through() {
        let doc = InputDocument::parse(TEMPLATE).unwrap();
        let region = RegionGeometry::from_vectors(
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            4,
            4,
            4,
        );
        let rendered = doc.render_with(&region);
        assert!(rendered.starts_with("* sweep template\n.2D_INT\n"));
        assert!(rendered.ends_with("* trailing solver cards\n.END\n"));
    }

    #[test]
    fn test_crlf_normalized() {
        let crlf = TEMPLATE.replace('\n', "\r\n");
        let doc = InputDocument::parse(&crlf).unwrap();
        assert_eq!(doc.render(), TEMPLATE);
    }

    #[test]
    fn test_marker_not_found() {
        assert!(matches!(
            InputDocument::parse("* nothing here\n"),
            Err(Error::MarkerNotFound)
        ));
    }

    #[test]
    fn test_duplicate_marker() {
        let text = format!("{TEMPLATE}{MARKER}\n");
        assert!(matches!(
            InputDocument::parse(&text),
            Err(Error::DuplicateMarker(2))
        ));
    }

    #[test]
    fn test_truncated_block() {
        let text = ".2D_INT\n0 0 0\n1 0 0\n";
        match InputDocument::parse(text) {
            Err(Error::TruncatedBlock { expected, found }) => {
                assert_eq!(expected, BLOCK_LINES);
                assert_eq!(found, 2);
            }
            other => panic!("expected TruncatedBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("template.inp"), 0),
            PathBuf::from("template_0.inp")
        );
        assert_eq!(
            output_path(Path::new("runs/sweep/template.inp"), 4),
            PathBuf::from("runs/sweep/template_4.inp")
        );
        assert_eq!(
            output_path(Path::new("template"), 2),
            PathBuf::from("template_2")
        );
        assert_eq!(
            output_path(Path::new("archive.tar.gz"), 1),
            PathBuf::from("archive.tar_1.gz")
        );
    }

    #[test]
    fn test_write_documents() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.inp");
        fs::write(&input, TEMPLATE).unwrap();

        let doc = InputDocument::from_path(&input).unwrap();
        let slicer = Slicer::new(Axis::U, 2).unwrap();
        let paths = write_documents(&doc, slicer.slices(doc.region()), &input, None).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], dir.path().join("template_0.inp"));
        assert_eq!(paths[1], dir.path().join("template_1.inp"));

        let first = fs::read_to_string(&paths[0]).unwrap();
        assert!(first.contains("\n0 0 0\n0.5 0 0\n4\n0 1 0\n4\n4\n"));
        let second = fs::read_to_string(&paths[1]).unwrap();
        assert!(second.contains("\n0.5 0 0\n1 0 0\n4\n0.5 1 0\n4\n4\n"));
    }

    #[test]
    fn test_write_documents_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.inp");
        fs::write(&input, TEMPLATE).unwrap();
        let out = dir.path().join("slices");

        let doc = InputDocument::from_path(&input).unwrap();
        let slicer = Slicer::new(Axis::V, 3).unwrap();
        let paths =
            write_documents(&doc, slicer.slices(doc.region()), &input, Some(&out)).unwrap();

        assert_eq!(paths.len(), 3);
        for (s, path) in paths.iter().enumerate() {
            assert_eq!(*path, out.join(format!("template_{s}.inp")));
            assert!(path.exists());
        }
    }

    #[test]
    fn test_write_documents_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.inp");
        fs::write(&input, TEMPLATE).unwrap();
        let stale = dir.path().join("template_0.inp");
        fs::write(&stale, "stale contents").unwrap();

        let doc = InputDocument::from_path(&input).unwrap();
        let slicer = Slicer::new(Axis::U, 1).unwrap();
        write_documents(&doc, slicer.slices(doc.region()), &input, None).unwrap();

        assert_eq!(fs::read_to_string(&stale).unwrap(), TEMPLATE);
    }
}
