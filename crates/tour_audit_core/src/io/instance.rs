//! TSPLIB-style instance reader.
//!
//! Header lines (`KEY: value` or `KEY = value`) are read until
//! `NODE_COORD_SECTION`. Inside the section every line is scanned for numeric
//! tokens regardless of spacing; a line with at least three tokens is
//! `id x y`. The section ends at the first line containing `EOF` or opening
//! another `*_SECTION` block. Blank lines inside the section are skipped.

use std::{fs, path::Path, sync::LazyLock};

use indexmap::IndexMap;
use regex::Regex;

use crate::{City, Error, Result};

const NODE_COORD_SECTION_HEADER: &str = "NODE_COORD_SECTION";
const SECTION_SUFFIX: &str = "_SECTION";
const EOF_MARKER: &str = "EOF";
const EUCLIDEAN_EDGE_WEIGHT_TYPE: &str = "EUC_2D";
const MIN_COORD_TOKENS: usize = 3;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?").expect("numeric token pattern is valid")
});

/// A parsed problem instance: header metadata plus cities keyed by id, in
/// file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instance {
    pub name: Option<String>,
    pub comment_lines: Vec<String>,
    pub problem_type: Option<String>,
    /// `DIMENSION` as declared in the header; not trusted for validation.
    pub dimension: Option<usize>,
    pub edge_weight_type: Option<String>,
    cities: IndexMap<String, City>,
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses an instance file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::input(path, e))?;
        let instance = Self::from_text(&String::from_utf8_lossy(&bytes));

        log::info!(
            "instance: path={} name={} cities={}",
            path.display(),
            instance.name.as_deref().unwrap_or("-"),
            instance.len()
        );
        instance.warn_on_header_mismatch();

        Ok(instance)
    }

    /// Parses instance text. Never fails: unrecognized content is skipped and
    /// a file without coordinates yields an empty instance.
    pub fn from_text(text: &str) -> Self {
        let mut instance = Self::new();
        let mut in_coord_section = false;

        for raw_line in text.lines() {
            let line = raw_line.trim();

            if in_coord_section {
                if line.contains(EOF_MARKER) || line.contains(SECTION_SUFFIX) {
                    break;
                }
                if let Some(city) = parse_coord_line(line)
                    && let Some(previous) = instance.insert(city)
                {
                    log::debug!("instance: duplicate id, dropped city={previous}");
                }
                continue;
            }

            if line.contains(NODE_COORD_SECTION_HEADER) {
                in_coord_section = true;
                continue;
            }

            instance.apply_header(line);
        }

        instance
    }

    /// Inserts a city, replacing and returning any earlier city with the same id.
    pub fn insert(&mut self, city: City) -> Option<City> {
        self.cities.insert(city.id.clone(), city)
    }

    pub fn get(&self, id: &str) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cities in file order (first occurrence position for overwritten ids).
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    fn apply_header(&mut self, line: &str) {
        let Some((key, value)) = line
            .split_once(':')
            .or_else(|| line.split_once('='))
            .map(|(key, value)| (key.trim().to_ascii_uppercase(), value.trim()))
        else {
            return;
        };

        match key.as_str() {
            "NAME" => self.name = Some(value.to_string()),
            "COMMENT" => self.comment_lines.push(value.to_string()),
            "TYPE" => self.problem_type = Some(value.to_string()),
            "DIMENSION" => match value.parse::<usize>() {
                Ok(dimension) => self.dimension = Some(dimension),
                Err(e) => log::warn!("instance: ignoring bad DIMENSION value '{value}': {e}"),
            },
            "EDGE_WEIGHT_TYPE" => self.edge_weight_type = Some(value.to_ascii_uppercase()),
            _ => {}
        }
    }

    fn warn_on_header_mismatch(&self) {
        if let Some(dimension) = self.dimension
            && dimension != self.len()
        {
            log::warn!(
                "instance: DIMENSION is {dimension}, but NODE_COORD_SECTION has {} cities",
                self.len()
            );
        }

        if let Some(kind) = self.edge_weight_type.as_deref()
            && kind != EUCLIDEAN_EDGE_WEIGHT_TYPE
        {
            log::warn!(
                "instance: EDGE_WEIGHT_TYPE is {kind}; distances are still straight-line Euclidean"
            );
        }
    }
}

fn parse_coord_line(line: &str) -> Option<City> {
    let tokens: Vec<&str> = NUMERIC_TOKEN
        .find_iter(line)
        .map(|m| m.as_str())
        .take(MIN_COORD_TOKENS)
        .collect();

    let [id, x, y] = tokens.as_slice() else {
        return None;
    };
    let x = x.parse::<f64>().ok()?;
    let y = y.parse::<f64>().ok()?;

    Some(City::new(*id, x, y))
}
