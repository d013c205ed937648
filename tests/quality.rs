//! Exhaustive-ish checks of the nearest-match guarantees against brute force.

use zenpick::{DistanceMetric, Palette, PaletteEntry};

const METRICS: [DistanceMetric; 2] = [DistanceMetric::Euclidean, DistanceMetric::Manhattan];

/// Pseudo-random colors via a multiplicative hash.
fn hashed_colors(n: usize, seed: u32) -> Vec<rgb::RGB8> {
    (0..n as u32)
        .map(|i| {
            let h = (i.wrapping_add(seed)).wrapping_mul(2654435761);
            rgb::RGB8::new(h as u8, (h >> 8) as u8, (h >> 16) as u8)
        })
        .collect()
}

fn hashed_palette(n: usize) -> Palette {
    let entries = hashed_colors(n, 7)
        .into_iter()
        .enumerate()
        .map(|(i, c)| PaletteEntry::new(format!("c{i}"), c))
        .collect();
    Palette::new(entries).unwrap()
}

#[test]
fn result_is_globally_minimal() {
    let palette = hashed_palette(300);
    for q in hashed_colors(2000, 9001) {
        for m in METRICS {
            let best = palette.nearest(q, m);
            let best_d = m.distance(q, best.rgb);
            for e in palette.entries() {
                assert!(
                    best_d <= m.distance(q, e.rgb),
                    "{m:?}: {} at {best_d} beaten by {} for {q:?}",
                    best.name,
                    e.name
                );
            }
        }
    }
}

#[test]
fn result_is_first_among_equals() {
    let palette = hashed_palette(64);
    for q in hashed_colors(500, 42) {
        for m in METRICS {
            let best = palette.nearest(q, m);
            let min = m.rank(q, best.rgb);
            let first = palette
                .entries()
                .iter()
                .find(|e| m.rank(q, e.rgb) == min)
                .unwrap();
            assert!(std::ptr::eq(best, first));
        }
    }
}

#[test]
fn every_entry_resolves_to_distance_zero() {
    let palette = Palette::css3();
    for e in palette.entries() {
        for m in METRICS {
            let hit = palette.nearest(e.rgb, m);
            assert_eq!(m.distance(e.rgb, hit.rgb), 0.0);
            // Aliases resolve to the earliest entry with that value.
            assert_eq!(hit.name, palette.exact(e.rgb).unwrap().name);
        }
    }
}

#[test]
fn k_nearest_head_matches_nearest() {
    let palette = hashed_palette(100);
    for q in hashed_colors(200, 3) {
        for m in METRICS {
            let k = palette.k_nearest(q, m, 5);
            assert_eq!(k.len(), 5);
            assert!(std::ptr::eq(k[0], palette.nearest(q, m)));
            assert!(k.windows(2).all(|w| m.rank(q, w[0].rgb) <= m.rank(q, w[1].rgb)));
        }
    }
}
