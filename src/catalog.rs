//! CSV ingest and export for the movie catalog.
//!
//! Input rows have exactly three fields: `id,title,genres`. Fields may be
//! double-quoted (titles often contain commas); a doubled quote inside a
//! quoted field is an escaped quote. Export applies the inverse quoting.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::errors::{CatalogError, CatalogResult};
use crate::record::Movie;
use crate::tree::MovieTree;

pub const EXPORT_HEADER: &str = "Movie ID,Title,Genres";

/// Outcome of loading a catalog file.
#[derive(Debug)]
pub struct LoadReport {
    pub tree: MovieTree,
    /// Rows inserted into the tree.
    pub loaded: usize,
    /// Rows rejected: malformed fields or duplicate sort keys.
    pub skipped: usize,
}

/// Loads a catalog file into a fresh search tree.
///
/// The first `skip_rows` lines are treated as headers. Malformed rows and
/// duplicate keys are logged and skipped rather than aborting the load; the
/// counts are surfaced in the report so callers can decide whether a dirty
/// input is acceptable.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_catalog(path: impl AsRef<Path>, skip_rows: usize) -> CatalogResult<LoadReport> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut tree = MovieTree::new();
    let mut loaded = 0;
    let mut skipped = 0;

    for (line_no, line) in reader.lines().enumerate().skip(skip_rows) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let movie = match parse_row(&line, line_no + 1) {
            Ok(movie) => movie,
            Err(e) => {
                warn!("skipping row: {}", e);
                skipped += 1;
                continue;
            }
        };
        match tree.insert(movie) {
            Ok(_) => loaded += 1,
            Err(e) => {
                warn!("skipping row {}: {}", line_no + 1, e);
                skipped += 1;
            }
        }
    }

    debug!("loaded {} movies, skipped {}", loaded, skipped);
    Ok(LoadReport {
        tree,
        loaded,
        skipped,
    })
}

/// Parses one data row into a movie record.
///
/// Rejects the row before `Movie::new` is called if the field count or the
/// identifier is wrong; the record constructor never sees malformed data.
pub fn parse_row(line: &str, line_no: usize) -> CatalogResult<Movie> {
    let fields = split_row(line);
    if fields.len() != 3 {
        return Err(CatalogError::MalformedRow {
            line: line_no,
            reason: format!("expected 3 fields, got {}", fields.len()),
        });
    }
    let id: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| CatalogError::MalformedRow {
            line: line_no,
            reason: format!("invalid movie id: {:?}", fields[0]),
        })?;
    Ok(Movie::new(id, &fields[1], &fields[2]))
}

/// Writes a query result as CSV: header row, then one row per movie with the
/// derived title key and the genres rejoined with `|`.
#[instrument(level = "debug", skip(movies), fields(path = %path.as_ref().display(), rows = movies.len()))]
pub fn export_subset(path: impl AsRef<Path>, movies: &[&Movie]) -> CatalogResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", EXPORT_HEADER)?;
    for movie in movies {
        writeln!(writer, "{}", format_row(movie))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn format_row(movie: &Movie) -> String {
    format!(
        "{},{},{}",
        movie.id(),
        escape(movie.sort_key()),
        escape(&movie.genres().iter().join("|"))
    )
}

/// Splits one CSV line on commas, honoring double-quoted fields and doubled
/// quote escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        crate::util::testing::init_test_setup();
    }

    #[test]
    fn test_split_row_plain() {
        assert_eq!(
            split_row("1,Toy Story (1995),Adventure|Animation"),
            ["1", "Toy Story (1995)", "Adventure|Animation"]
        );
    }

    #[test]
    fn test_split_row_quoted_comma() {
        assert_eq!(
            split_row(r#"11,"American President, The (1995)",Comedy|Drama|Romance"#),
            ["11", "American President, The (1995)", "Comedy|Drama|Romance"]
        );
    }

    #[test]
    fn test_split_row_escaped_quote() {
        assert_eq!(split_row(r#"5,"He said ""hi""",Comedy"#)[1], r#"He said "hi""#);
    }

    #[test]
    fn test_escape_roundtrip() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(split_row(&format!("1,{},x", escape("a,b")))[1], "a,b");
    }

    #[test]
    fn test_parse_row_rejects_bad_id() {
        let err = parse_row("abc,Title,Genre", 3).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_parse_row_rejects_wrong_field_count() {
        assert!(parse_row("1,Title", 2).is_err());
        assert!(parse_row("1,Title,Genre,Extra", 2).is_err());
    }
}
