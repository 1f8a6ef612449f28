//! Particle field behind the decorative canvas effect.

/// Pairs closer than this are joined by a line.
pub const LINK_DISTANCE: f64 = 100.0;
/// Opacity of a link between two coincident particles.
pub const LINK_MAX_OPACITY: f64 = 0.1;
pub const DEFAULT_COUNT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// Draws all six attributes from `rand`, which yields values in `[0, 1)`.
    fn random(width: f64, height: f64, rand: &mut impl FnMut() -> f64) -> Self {
        Self {
            x: rand() * width,
            y: rand() * height,
            radius: rand() * 3.0 + 1.0,
            speed_x: (rand() - 0.5) * 0.5,
            speed_y: (rand() - 0.5) * 0.5,
            opacity: rand() * 0.5 + 0.1,
        }
    }

    /// Heading in radians, used to orient leaf glyphs.
    pub fn heading(&self) -> f64 {
        self.speed_y.atan2(self.speed_x)
    }
}

/// A line between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Linear falloff from [`LINK_MAX_OPACITY`] at zero distance to nothing at `max_distance`.
pub fn link_opacity(distance: f64, max_distance: f64) -> Option<f64> {
    if distance < max_distance {
        Some(LINK_MAX_OPACITY * (1.0 - distance / max_distance))
    } else {
        None
    }
}

/// Advances `pos` by `speed` and reflects off `[0, limit]`.
///
/// A position pushed past an edge is mirrored back across it, and held at the
/// far edge when the box is narrower than one step. If it was already outside
/// (the box shrank under it) the speed is only pointed inward so it drifts
/// back over the following frames.
fn advance(pos: &mut f64, speed: &mut f64, limit: f64) {
    let was_inside = (0.0..=limit).contains(pos);
    *pos += *speed;
    if *pos < 0.0 {
        if was_inside {
            *pos = (-*pos).min(limit);
        }
        *speed = speed.abs();
    } else if *pos > limit {
        if was_inside {
            *pos = (2.0 * limit - *pos).max(0.0);
        }
        *speed = -speed.abs();
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    link_distance: f64,
}

impl ParticleField {
    pub fn seed(count: usize, width: f64, height: f64, mut rand: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(width, height, &mut rand))
            .collect();
        Self {
            particles,
            width,
            height,
            link_distance: LINK_DISTANCE,
        }
    }

    pub fn with_link_distance(mut self, distance: f64) -> Self {
        self.link_distance = distance;
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// New bounds; particles keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            advance(&mut p.x, &mut p.speed_x, w);
            advance(&mut p.y, &mut p.speed_y, h);
        }
    }

    /// Every unordered pair closer than the link distance, each pair once.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        for (a, p) in self.particles.iter().enumerate() {
            for (b, q) in self.particles.iter().enumerate().skip(a + 1) {
                let distance = (p.x - q.x).hypot(p.y - q.y);
                if let Some(opacity) = link_opacity(distance, self.link_distance) {
                    out.push(Link {
                        a,
                        b,
                        distance,
                        opacity,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            speed_x: 0.0,
            speed_y: 0.0,
            radius: 1.0,
            opacity: 0.5,
        }
    }

    fn field(particles: Vec<Particle>, w: f64, h: f64) -> ParticleField {
        ParticleField {
            particles,
            width: w,
            height: h,
            link_distance: LINK_DISTANCE,
        }
    }

    #[test]
    fn seeded_attributes_in_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        let f = ParticleField::seed(DEFAULT_COUNT, 640.0, 480.0, || rng.f64());
        assert_eq!(f.particles().len(), DEFAULT_COUNT);
        for p in f.particles() {
            assert!((0.0..640.0).contains(&p.x));
            assert!((0.0..480.0).contains(&p.y));
            assert!((1.0..4.0).contains(&p.radius));
            assert!((-0.25..0.25).contains(&p.speed_x));
            assert!((0.1..0.6).contains(&p.opacity));
        }
    }

    #[test]
    fn reflects_off_right_edge() {
        let mut p = still(99.9, 50.0);
        p.speed_x = 0.3;
        let mut f = field(vec![p], 100.0, 100.0);
        f.step();
        let p = f.particles()[0];
        assert!((p.x - 99.8).abs() < 1e-9);
        assert_eq!(p.speed_x, -0.3);
    }

    #[test]
    fn reflects_off_top_edge() {
        let mut p = still(50.0, 0.1);
        p.speed_y = -0.25;
        let mut f = field(vec![p], 100.0, 100.0);
        f.step();
        let p = f.particles()[0];
        assert!((p.y - 0.15).abs() < 1e-9);
        assert_eq!(p.speed_y, 0.25);
    }

    #[test]
    fn box_narrower_than_a_step_holds_particle() {
        let mut p = still(0.05, 0.0);
        p.speed_x = 0.2;
        p.speed_y = -0.2;
        let mut f = field(vec![p], 0.1, 0.0);
        for _ in 0..10 {
            f.step();
            let p = f.particles()[0];
            assert!((0.0..=0.1).contains(&p.x), "x = {}", p.x);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn shrink_steers_outsiders_back() {
        let mut p = still(500.0, 50.0);
        p.speed_x = 0.2;
        let mut f = field(vec![p], 600.0, 100.0);
        f.resize(200.0, 100.0);
        f.step();
        let p = f.particles()[0];
        assert!(p.x > 200.0);
        assert!(p.speed_x < 0.0);
        for _ in 0..2000 {
            f.step();
        }
        assert!(f.particles()[0].x <= 200.0);
    }

    #[test]
    fn links_are_unordered_pairs() {
        let f = field(vec![still(0.0, 0.0), still(30.0, 40.0), still(300.0, 0.0)], 400.0, 400.0);
        let links = f.links();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].distance - 50.0).abs() < 1e-9);
        assert!((links[0].opacity - 0.05).abs() < 1e-9);
    }

    #[test]
    fn custom_link_distance() {
        let f = field(vec![still(0.0, 0.0), still(150.0, 0.0)], 400.0, 400.0)
            .with_link_distance(200.0);
        assert_eq!(f.links().len(), 1);
    }

    #[test]
    fn opacity_cutoff() {
        assert_eq!(link_opacity(100.0, 100.0), None);
        assert_eq!(link_opacity(150.0, 100.0), None);
        assert_eq!(link_opacity(0.0, 100.0), Some(LINK_MAX_OPACITY));
    }
}
