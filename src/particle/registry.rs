//! Accumulated particles of one search run, with overlap resolution.
//!
//! Admission is order-sensitive: members are scanned in insertion order and
//! the first member that out-ranks an overlapping candidate rejects it on the
//! spot, even if a later member would have been evicted by it.
use super::Particle;
use log::debug;
use serde::{Deserialize, Serialize};

/// Thresholds deciding whether a candidate may enter the registry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRule {
    /// Candidates less circular than this are rejected.
    pub min_circularity: f64,
    /// Candidates need at least `min_point_ratio · target_points` points.
    pub min_point_ratio: f64,
    pub target_points: usize,
    /// Two particles overlap when their centres are closer than
    /// `overlap_tolerance · (r_a + r_b)`.
    pub overlap_tolerance: f64,
}

impl AdmissionRule {
    pub fn overlaps(&self, a: &Particle, b: &Particle) -> bool {
        a.center().distance(&b.center()) < self.overlap_tolerance * (a.radius() + b.radius())
    }
}

/// Outcome of [`ParticleRegistry::try_admit`].
#[derive(Clone, Debug, PartialEq)]
pub enum Admission {
    /// Appended; `evicted` overlapping members were removed to make room.
    Admitted { evicted: usize },
    /// Circularity below the rule's minimum.
    NotCircular { circularity: f64 },
    /// Fewer contour points than the rule requires.
    TooFewPoints { points: usize, required: f64 },
    /// Overlaps the member at `index`, which is more circular.
    Outranked { index: usize },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Ordered set of accepted particles.
#[derive(Clone, Debug, Default)]
pub struct ParticleRegistry {
    particles: Vec<Particle>,
}

impl ParticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// The first member with the highest circularity.
    pub fn most_circular(&self) -> Option<&Particle> {
        self.particles.iter().fold(None, |best, p| match best {
            Some(b) if b.circularity() >= p.circularity() => Some(b),
            _ => Some(p),
        })
    }

    /// Try to add `candidate` under `rule`.
    ///
    /// Shape checks come first. Then every overlapping member is compared by
    /// circularity: members no more circular than the candidate are marked for
    /// eviction, and the first strictly more circular one rejects the
    /// candidate and ends the scan. Marked members are only removed if the
    /// candidate is finally appended.
    pub fn try_admit(&mut self, candidate: Particle, rule: &AdmissionRule) -> Admission {
        let circularity = candidate.circularity();
        if circularity < rule.min_circularity {
            return Admission::NotCircular { circularity };
        }
        let required = rule.min_point_ratio * rule.target_points as f64;
        if (candidate.len() as f64) < required {
            return Admission::TooFewPoints {
                points: candidate.len(),
                required,
            };
        }

        let mut evict = Vec::new();
        for (index, member) in self.particles.iter().enumerate() {
            if !rule.overlaps(member, &candidate) {
                continue;
            }
            if circularity >= member.circularity() {
                evict.push(index);
            } else {
                return Admission::Outranked { index };
            }
        }

        for &index in evict.iter().rev() {
            self.particles.remove(index);
        }
        debug!(
            "admitted particle at ({:.1}, {:.1}) r={:.2} c={:.4} n={}, evicted {}",
            candidate.center().x,
            candidate.center().y,
            candidate.radius(),
            circularity,
            candidate.len(),
            evict.len()
        );
        self.particles.push(candidate);
        Admission::Admitted {
            evicted: evict.len(),
        }
    }

    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }
}

impl IntoIterator for ParticleRegistry {
    type Item = Particle;
    type IntoIter = std::vec::IntoIter<Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParticleRegistry {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Contour, Point};
    use std::f64::consts::PI;

    fn rule() -> AdmissionRule {
        AdmissionRule {
            min_circularity: 0.9,
            min_point_ratio: 0.8,
            target_points: 20,
            overlap_tolerance: 0.8,
        }
    }

    /// Circle of `n` points; `squash` < 1 flattens it vertically to lower
    /// the circularity.
    fn disc(cx: f64, cy: f64, r: f64, n: usize, squash: f64) -> Particle {
        let contour: Contour = (0..n)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / n as f64;
                Point::new(cx + r * t.cos(), cy + squash * r * t.sin())
            })
            .collect();
        Particle::new(contour)
    }

    #[test]
    fn disjoint_candidates_are_both_admitted() {
        let mut reg = ParticleRegistry::new();
        assert!(reg.try_admit(disc(0.0, 0.0, 10.0, 20, 1.0), &rule()).is_admitted());
        assert!(reg.try_admit(disc(50.0, 0.0, 10.0, 20, 1.0), &rule()).is_admitted());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn shape_checks_reject_without_overlap() {
        let mut reg = ParticleRegistry::new();
        let flat = Particle::new(Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ]));
        assert_eq!(flat.circularity(), 0.0);
        assert!(matches!(
            reg.try_admit(flat, &rule()),
            Admission::NotCircular { .. }
        ));
        assert!(matches!(
            reg.try_admit(disc(0.0, 0.0, 10.0, 15, 1.0), &rule()),
            Admission::TooFewPoints { points: 15, .. }
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn better_candidate_evicts_overlapping_member() {
        let mut reg = ParticleRegistry::new();
        let worse = disc(0.0, 0.0, 10.0, 20, 0.85);
        let better = disc(2.0, 0.0, 10.0, 20, 1.0);
        assert!(worse.circularity() >= 0.9 && worse.circularity() < better.circularity());

        assert!(reg.try_admit(worse.clone(), &rule()).is_admitted());
        assert_eq!(
            reg.try_admit(better.clone(), &rule()),
            Admission::Admitted { evicted: 1 }
        );
        assert_eq!(reg.particles(), &[better.clone()]);

        assert_eq!(reg.try_admit(worse, &rule()), Admission::Outranked { index: 0 });
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn equal_circularity_replaces_member() {
        let mut reg = ParticleRegistry::new();
        let a = disc(0.0, 0.0, 10.0, 20, 1.0);
        let b = a.clone();
        reg.try_admit(a, &rule());
        assert!(reg.try_admit(b.clone(), &rule()).is_admitted());
        assert_eq!(reg.particles(), &[b]);
    }

    #[test]
    fn first_stronger_member_stops_the_scan() {
        let mut reg = ParticleRegistry::new();
        let strong = disc(-6.0, 0.0, 10.0, 20, 1.0);
        let weak = disc(6.0, 0.0, 10.0, 20, 0.85);
        reg.try_admit(strong.clone(), &rule());
        reg.try_admit(weak.clone(), &rule());
        assert_eq!(reg.len(), 1, "weak overlaps strong and is rejected");

        // Build the order-sensitive case directly: a weak member listed before
        // a strong one. The candidate beats the first but loses to the second,
        // and nothing is evicted.
        let mut reg = ParticleRegistry {
            particles: vec![weak.clone(), strong.clone()],
        };
        let mid = disc(0.0, 0.0, 10.0, 20, 0.93);
        assert!(mid.circularity() > weak.circularity());
        assert!(mid.circularity() < strong.circularity());
        assert_eq!(reg.try_admit(mid, &rule()), Admission::Outranked { index: 1 });
        assert_eq!(reg.particles(), &[weak, strong]);
    }

    #[test]
    fn most_circular_picks_the_roundest_member() {
        let mut reg = ParticleRegistry::new();
        assert!(reg.most_circular().is_none());
        let a = disc(0.0, 0.0, 10.0, 20, 0.95);
        let b = disc(100.0, 0.0, 10.0, 20, 1.0);
        let c = disc(200.0, 0.0, 10.0, 20, 0.99);
        reg.try_admit(a, &rule());
        reg.try_admit(b.clone(), &rule());
        reg.try_admit(c, &rule());
        assert_eq!(reg.most_circular(), Some(&b));
    }
}
