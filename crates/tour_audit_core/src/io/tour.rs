use std::{fs, path::Path};

use crate::{Error, Result};

/// Candidate tour: city ids in the order the solver listed them.
///
/// Parsing is deliberately permissive: only lines made entirely of ASCII
/// digits are kept, so TSPLIB `.tour` headers, the `-1` terminator, `EOF`,
/// comments and blank lines all fall away.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    ids: Vec<String>,
}

impl Tour {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Reads and parses a tour file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::input(path, e))?;
        let tour = Self::from_text(&String::from_utf8_lossy(&bytes));

        log::info!("tour: path={} steps={}", path.display(), tour.len());
        Ok(tour)
    }

    pub fn from_text(text: &str) -> Self {
        let ids = text
            .lines()
            .map(str::trim)
            .filter(|line| is_city_id(line))
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tour {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

fn is_city_id(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::Tour;
    use crate::Error;

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("tour-audit-tests-{name}-{nanos}"))
    }

    #[test]
    fn from_text_keeps_digit_lines_in_file_order() {
        let tour = Tour::from_text("3\n1\n  2  \n4\n");
        assert_eq!(tour.ids(), ["3", "1", "2", "4"]);
    }

    #[test]
    fn from_text_skips_headers_terminator_and_blank_lines() {
        let text = "NAME : run.tour\nTYPE : TOUR\nTOUR_SECTION\n1\n\n3\n# note\n2\n-1\nEOF\n";
        let tour = Tour::from_text(text);
        assert_eq!(tour.ids(), ["1", "3", "2"]);
    }

    #[test]
    fn from_text_rejects_lines_with_mixed_content() {
        let tour = Tour::from_text("1 2\n+3\n4.0\n5\n");
        assert_eq!(tour.ids(), ["5"]);
    }

    #[test]
    fn from_text_keeps_duplicates_and_leading_zeros() {
        let tour = Tour::from_text("01\n1\n1\n");
        assert_eq!(tour.ids(), ["01", "1", "1"]);
    }

    #[test]
    fn from_file_tolerates_non_utf8_header_bytes() {
        let dir = unique_temp_dir("tour-latin1");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("route.txt");
        let mut bytes = b"COMMENT: r".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"sultat\n2\n1\n");
        fs::write(&path, bytes).expect("write tour file");

        let tour = Tour::from_file(&path).expect("read tour");
        assert_eq!(tour.ids(), ["2", "1"]);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn empty_text_yields_empty_tour() {
        assert!(Tour::from_text("").is_empty());
    }

    #[test]
    fn from_file_reads_from_disk() {
        let dir = unique_temp_dir("tour-read");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("route.txt");
        fs::write(&path, "1\n2\n3\n").expect("write tour file");

        let tour = Tour::from_file(&path).expect("read tour");
        assert_eq!(tour, ["1", "2", "3"].into_iter().collect::<Tour>());

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn from_file_reports_missing_file_as_input_error() {
        let path = unique_temp_dir("tour-missing").join("nope.txt");
        let err = Tour::from_file(&path).expect_err("missing file should fail");
        assert!(matches!(err, Error::Input { .. }));
    }
}
