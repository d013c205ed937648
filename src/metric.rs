use rgb::RGB8;

/// Distance used to rank palette entries against a query color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Straight-line distance in RGB space: `sqrt(Δr² + Δg² + Δb²)`.
    #[default]
    Euclidean,
    /// City-block distance: `|Δr| + |Δg| + |Δb|`. Cheaper, ranks slightly differently.
    Manhattan,
}

impl DistanceMetric {
    /// Exact integer ranking key. Monotonic in [`distance`](Self::distance),
    /// so equal keys are exactly equal distances.
    #[inline]
    pub fn rank(self, a: RGB8, b: RGB8) -> u32 {
        let dr = (i32::from(a.r) - i32::from(b.r)).unsigned_abs();
        let dg = (i32::from(a.g) - i32::from(b.g)).unsigned_abs();
        let db = (i32::from(a.b) - i32::from(b.b)).unsigned_abs();
        match self {
            Self::Euclidean => dr * dr + dg * dg + db * db,
            Self::Manhattan => dr + dg + db,
        }
    }

    /// The metric's actual distance value.
    pub fn distance(self, a: RGB8, b: RGB8) -> f64 {
        let key = f64::from(self.rank(a, b));
        match self {
            Self::Euclidean => sqrt(key),
            Self::Manhattan => key,
        }
    }

    /// Lowercase name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        }
    }
}

impl core::str::FromStr for DistanceMetric {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("euclidean") || s.eq_ignore_ascii_case("l2") {
            Ok(Self::Euclidean)
        } else if s.eq_ignore_ascii_case("manhattan") || s.eq_ignore_ascii_case("l1") {
            Ok(Self::Manhattan)
        } else {
            Err("expected `euclidean` or `manhattan`")
        }
    }
}

#[cfg(feature = "std")]
fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

// Newton iteration; inputs are at most 3 * 255², so 32 rounds is plenty.
#[cfg(not(feature = "std"))]
fn sqrt(v: f64) -> f64 {
    if v <= 0.0 {
        return 0.0;
    }
    let mut x = v;
    for _ in 0..32 {
        x = 0.5 * (x + v / x);
    }
    x
}
