use std::f64::consts::TAU;

use rand::Rng;

pub const NEAR_RADIUS: f64 = 80.0;
pub const FAR_RADIUS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarLayer {
    pub stars: Vec<Star>,
    pub point_size: f32,
    pub opacity: f32,
}

/// Bright foreground stars with a temperature-like color spread.
pub fn near_layer(rng: &mut impl Rng, count: usize) -> StarLayer {
    let stars = (0..count)
        .map(|_| {
            let position = shell_point(rng, NEAR_RADIUS, 0.4);
            let size = 0.2 + rng.r#gen::<f64>().powf(2.5) * 1.3;
            let kind: f64 = rng.r#gen();
            let (h, s, l) = if kind < 0.1 {
                (
                    0.6 + rng.r#gen::<f64>() * 0.05,
                    0.5 + rng.r#gen::<f64>() * 0.3,
                    0.7 + rng.r#gen::<f64>() * 0.3,
                )
            } else if kind < 0.4 {
                (
                    0.2 + rng.r#gen::<f64>() * 0.4,
                    0.1 + rng.r#gen::<f64>() * 0.2,
                    0.8 + rng.r#gen::<f64>() * 0.2,
                )
            } else if kind < 0.8 {
                (
                    0.1 + rng.r#gen::<f64>() * 0.05,
                    0.1 + rng.r#gen::<f64>() * 0.2,
                    0.7 + rng.r#gen::<f64>() * 0.2,
                )
            } else {
                (
                    0.02 + rng.r#gen::<f64>() * 0.04,
                    0.4 + rng.r#gen::<f64>() * 0.3,
                    0.6 + rng.r#gen::<f64>() * 0.2,
                )
            };
            Star {
                position,
                size: size as f32,
                color: hsl_to_rgb(h, s, l),
            }
        })
        .collect();
    StarLayer {
        stars,
        point_size: 1.2,
        opacity: 1.0,
    }
}

/// Dim background stars.
pub fn far_layer(rng: &mut impl Rng, count: usize) -> StarLayer {
    let stars = (0..count)
        .map(|_| {
            let position = shell_point(rng, FAR_RADIUS, 0.5);
            let size = 0.1 + rng.r#gen::<f64>().powi(3) * 0.3;
            let kind: f64 = rng.r#gen();
            let (h, s, l) = if kind < 0.2 {
                (0.6 + rng.r#gen::<f64>() * 0.1, 0.2, 0.5 + rng.r#gen::<f64>() * 0.2)
            } else if kind < 0.8 {
                (0.0, rng.r#gen::<f64>() * 0.1, 0.6 + rng.r#gen::<f64>() * 0.2)
            } else {
                (0.05 + rng.r#gen::<f64>() * 0.05, 0.3, 0.5 + rng.r#gen::<f64>() * 0.2)
            };
            Star {
                position,
                size: size as f32,
                color: hsl_to_rgb(h, s, l),
            }
        })
        .collect();
    StarLayer {
        stars,
        point_size: 0.6,
        opacity: 0.7,
    }
}

/// Point on a sphere of `radius`; `exponent` skews the polar distribution.
fn shell_point(rng: &mut impl Rng, radius: f64, exponent: f64) -> [f32; 3] {
    let theta = rng.r#gen::<f64>() * TAU;
    let phi = (rng.r#gen::<f64>().powf(exponent) * 2.0 - 1.0).acos();
    [
        (radius * phi.sin() * theta.cos()) as f32,
        (radius * phi.sin() * theta.sin()) as f32,
        (radius * phi.cos()) as f32,
    ]
}

/// HSL with all components in `0..=1`, hue wrapping.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l as f32; 3];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0) as f32,
        hue_channel(p, q, h) as f32,
        hue_channel(p, q, h - 1.0 / 3.0) as f32,
    ]
}

fn hue_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{FAR_RADIUS, NEAR_RADIUS, far_layer, hsl_to_rgb, near_layer};

    #[test]
    fn stars_lie_on_their_shell_with_bounded_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let near = near_layer(&mut rng, 200);
        let far = far_layer(&mut rng, 200);
        assert_eq!(near.stars.len(), 200);

        for (layer, radius, min, max) in [(&near, NEAR_RADIUS, 0.2, 1.5), (&far, FAR_RADIUS, 0.1, 0.4)] {
            for star in &layer.stars {
                let [x, y, z] = star.position.map(f64::from);
                let r = (x * x + y * y + z * z).sqrt();
                assert!((r - radius).abs() < 1e-3, "radius {r}");
                let size = f64::from(star.size);
                assert!(size >= min - 1e-6 && size <= max + 1e-6, "size {size}");
            }
        }
    }

    #[test]
    fn same_seed_gives_same_sky() {
        let a = near_layer(&mut StdRng::seed_from_u64(42), 50);
        let b = near_layer(&mut StdRng::seed_from_u64(42), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn hsl_conversion_matches_known_colors() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.6), [0.6, 0.6, 0.6]);
        let blue = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
        assert!(blue[0].abs() < 1e-6 && blue[1].abs() < 1e-6 && (blue[2] - 1.0).abs() < 1e-6);
    }
}
