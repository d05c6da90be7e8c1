#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const CATEGORY10: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

pub fn category10(index: usize) -> Rgb {
    CATEGORY10[index % CATEGORY10.len()]
}

/// 31-multiplier hash over UTF-16 code units with 32-bit wraparound of the shifted term,
/// mapped to `[0, 1]`.
pub fn name_seed(name: &str) -> f64 {
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    f64::from(hash as u32) / 4_294_967_295.0
}

pub fn rainbow(t: f64) -> Rgb {
    let t = t - t.floor();
    let ts = (t - 0.5).abs();
    let h = 360.0 * t - 100.0;
    let s = 1.5 - 1.5 * ts;
    let l = 0.8 - 0.9 * ts;
    cubehelix_to_rgb(h, s, l)
}

fn cubehelix_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sinh, cosh) = h.sin_cos();
    let r = 255.0 * (l + a * (A * cosh + B * sinh));
    let g = 255.0 * (l + a * (C * cosh + D * sinh));
    let b = 255.0 * (l + a * (E * cosh));
    Rgb(channel(r), channel(g), channel(b))
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn seeded_palette(player: &str, count: usize) -> Vec<Rgb> {
    let base = name_seed(player);
    (0..count)
        .map(|i| rainbow((base + i as f64 / count as f64) % 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_stable_and_bounded() {
        assert_eq!(name_seed(""), 0.0);
        // "a" hashes to its code unit.
        assert!((name_seed("a") - 97.0 / 4_294_967_295.0).abs() < 1e-15);
        // "ab" = 98 + (97 << 5) - 97
        assert!((name_seed("ab") - 3105.0 / 4_294_967_295.0).abs() < 1e-15);
        let seed = name_seed("Michael Jordan");
        assert_eq!(seed, name_seed("Michael Jordan"));
        assert!((0.0..=1.0).contains(&seed));
    }

    #[test]
    fn rainbow_wraps() {
        assert_eq!(rainbow(0.25), rainbow(1.25));
        // Midpoint of the cycle is the brightest green-yellow.
        assert_eq!(rainbow(0.5), Rgb(175, 240, 91));
    }

    #[test]
    fn palette_has_one_colour_per_team() {
        let colours = seeded_palette("Kareem Abdul-Jabbar", 3);
        assert_eq!(colours.len(), 3);
        assert_ne!(colours[0], colours[1]);
    }
}
