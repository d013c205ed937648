extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rgb::RGB8;

use crate::error::PickError;
use crate::metric::DistanceMetric;

/// One named reference color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    /// Auxiliary hex string from the source data. Never used for matching.
    pub hex: Option<String>,
    pub rgb: RGB8,
}

impl PaletteEntry {
    /// An entry without a hex string.
    pub fn new(name: impl Into<String>, rgb: RGB8) -> Self {
        Self {
            name: name.into(),
            hex: None,
            rgb,
        }
    }

    /// Attach the hex string from the source row.
    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex = Some(hex.into());
        self
    }
}

/// An immutable, ordered, non-empty set of named colors.
///
/// Names are not required to be unique. Every lookup walks entries in load
/// order, and the first entry at the minimum distance wins.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from entries in lookup order.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PickError> {
        if entries.is_empty() {
            return Err(PickError::EmptyPalette);
        }
        Ok(Self { entries })
    }

    /// Caller guarantees `entries` is non-empty.
    pub(crate) fn from_entries_unchecked(entries: Vec<PaletteEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        Self { entries }
    }

    /// Parse headerless CSV rows of `name,hex,r,g,b`.
    ///
    /// Rows with a leading index column (`index,name,hex,r,g,b`) are accepted
    /// as well; the index is ignored. Blank lines are skipped.
    pub fn from_csv(text: &str) -> Result<Self, PickError> {
        let mut entries = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }
            entries.push(parse_row(raw, line)?);
        }
        let palette = Self::new(entries)?;
        log::debug!("parsed palette with {} entries", palette.len());
        Ok(palette)
    }

    /// Read and parse a palette CSV file.
    #[cfg(feature = "std")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, PickError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PickError::PaletteIo {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_csv(&text)?;
        log::debug!("loaded {} colors from {}", palette.len(), path.display());
        Ok(palette)
    }

    /// Entries in load order. Ties resolve to the earliest one.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries, at least 1.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the nearest entry to `query` (brute force, first wins on ties).
    pub fn nearest(&self, query: RGB8, metric: DistanceMetric) -> &PaletteEntry {
        let mut best = &self.entries[0];
        let mut best_rank = metric.rank(query, best.rgb);

        for entry in &self.entries[1..] {
            if best_rank == 0 {
                break;
            }
            let d = metric.rank(query, entry.rgb);
            if d < best_rank {
                best_rank = d;
                best = entry;
            }
        }

        best
    }

    /// Name of the nearest entry.
    pub fn nearest_name(&self, query: RGB8, metric: DistanceMetric) -> &str {
        &self.nearest(query, metric).name
    }

    /// Validate untrusted components, then find the nearest entry.
    pub fn resolve(
        &self,
        r: i64,
        g: i64,
        b: i64,
        metric: DistanceMetric,
    ) -> Result<&PaletteEntry, PickError> {
        let query = query_from_components(r, g, b)?;
        Ok(self.nearest(query, metric))
    }

    /// Find the K nearest entries, nearest first. Equidistant entries keep palette order.
    pub fn k_nearest(&self, query: RGB8, metric: DistanceMetric, k: usize) -> Vec<&PaletteEntry> {
        let mut ranked: Vec<(u32, &PaletteEntry)> = self
            .entries
            .iter()
            .map(|e| (metric.rank(query, e.rgb), e))
            .collect();

        ranked.sort_by_key(|(d, _)| *d);
        ranked.into_iter().take(k).map(|(_, e)| e).collect()
    }

    /// First entry whose RGB equals `query` exactly.
    pub fn exact(&self, query: RGB8) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.rgb == query)
    }

    /// First entry with the given name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Convert wide-integer components into a query color, rejecting anything outside 0..=255.
pub fn query_from_components(r: i64, g: i64, b: i64) -> Result<RGB8, PickError> {
    let check = |channel: char, value: i64| {
        u8::try_from(value).map_err(|_| PickError::InvalidComponent { channel, value })
    };
    Ok(RGB8::new(check('r', r)?, check('g', g)?, check('b', b)?))
}

fn parse_row(raw: &str, line: usize) -> Result<PaletteEntry, PickError> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    let fields = match fields.len() {
        5 => &fields[..],
        6 => &fields[1..],
        _ => {
            return Err(PickError::MalformedRow {
                line,
                reason: "expected 5 fields: name,hex,r,g,b",
            })
        }
    };
    if fields.iter().any(|f| f.is_empty()) {
        return Err(PickError::MalformedRow {
            line,
            reason: "empty field",
        });
    }

    let component = |channel: char, value: &str| {
        value
            .parse::<u8>()
            .map_err(|_| PickError::InvalidRowComponent {
                line,
                channel,
                value: value.to_string(),
            })
    };

    let rgb = RGB8::new(
        component('r', fields[2])?,
        component('g', fields[3])?,
        component('b', fields[4])?,
    );
    Ok(PaletteEntry::new(fields[0], rgb).with_hex(fields[1]))
}
