//! Complexity Domains
//!
//! Maps a growth-rate score onto named complexity classes. The score ranges
//! overlap at their edges, so a single score can match several domains; all
//! matches are returned, most severe first.

use serde::{Deserialize, Serialize};

/// Qualitative rating attached to a complexity domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    /// O(n!)
    Abysmal,
    /// O(Xⁿ)
    Atrocious,
    /// O(nˣ)
    Disastrous,
    /// O(n log n)
    Bad,
    /// O(n)
    Fair,
    /// O(log n)
    Good,
    /// O(1)
    Excellent,
    /// No domain could be determined
    Unknown,
}

impl std::fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceRating::Abysmal => write!(f, "abysmal"),
            PerformanceRating::Atrocious => write!(f, "atrocious"),
            PerformanceRating::Disastrous => write!(f, "disastrous"),
            PerformanceRating::Bad => write!(f, "bad"),
            PerformanceRating::Fair => write!(f, "fair"),
            PerformanceRating::Good => write!(f, "good"),
            PerformanceRating::Excellent => write!(f, "excellent"),
            PerformanceRating::Unknown => write!(f, "unknown"),
        }
    }
}

/// A named complexity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityDomain {
    /// Big-O notation, e.g. `O(n log n)`
    pub scientific_notation: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Qualitative rating
    pub rating: PerformanceRating,
}

/// Inclusive score range claimed by a domain
#[derive(Debug, Clone, Copy)]
pub struct DomainRange {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
    /// Domain reported when the score falls in range
    pub domain: ComplexityDomain,
}

impl DomainRange {
    /// Whether `score` falls inside this range (bounds inclusive)
    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower && score <= self.upper
    }
}

/// Domain catalog, most severe first.
pub const DOMAIN_TABLE: [DomainRange; 7] = [
    DomainRange {
        lower: 0.97,
        upper: 1.0,
        domain: ComplexityDomain {
            scientific_notation: "O(n!)",
            description: "Factorial Complexity",
            rating: PerformanceRating::Abysmal,
        },
    },
    DomainRange {
        lower: 0.5,
        upper: 0.97,
        domain: ComplexityDomain {
            scientific_notation: "O(Xⁿ)",
            description: "Exponential Time",
            rating: PerformanceRating::Atrocious,
        },
    },
    DomainRange {
        lower: 0.3,
        upper: 0.5,
        domain: ComplexityDomain {
            scientific_notation: "O(nˣ)",
            description: "Polynomial Complexity",
            rating: PerformanceRating::Disastrous,
        },
    },
    DomainRange {
        lower: 0.2,
        upper: 0.3,
        domain: ComplexityDomain {
            scientific_notation: "O(n log n)",
            description: "Loglinear Complexity",
            rating: PerformanceRating::Bad,
        },
    },
    DomainRange {
        lower: 0.2,
        upper: 0.28,
        domain: ComplexityDomain {
            scientific_notation: "O(n)",
            description: "Linear Complexity",
            rating: PerformanceRating::Fair,
        },
    },
    DomainRange {
        lower: 0.1,
        upper: 0.25,
        domain: ComplexityDomain {
            scientific_notation: "O(log n)",
            description: "Logarithmic Complexity",
            rating: PerformanceRating::Good,
        },
    },
    DomainRange {
        lower: 0.0,
        upper: 0.1,
        domain: ComplexityDomain {
            scientific_notation: "O(1)",
            description: "Constant Complexity",
            rating: PerformanceRating::Excellent,
        },
    },
];

/// Return every domain whose range contains `score`, in table order.
///
/// A `NaN` score matches nothing.
pub fn estimate_domains(score: f64) -> Vec<ComplexityDomain> {
    DOMAIN_TABLE
        .iter()
        .filter(|range| range.contains(score))
        .map(|range| range.domain)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(score: f64) -> Vec<PerformanceRating> {
        estimate_domains(score).iter().map(|d| d.rating).collect()
    }

    #[test]
    fn test_boundary_overlap_at_quarter() {
        assert_eq!(
            ratings(0.25),
            vec![
                PerformanceRating::Bad,
                PerformanceRating::Fair,
                PerformanceRating::Good
            ]
        );
    }

    #[test]
    fn test_constant() {
        let domains = estimate_domains(0.01);
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].scientific_notation, "O(1)");
        assert_eq!(domains[0].description, "Constant Complexity");
        assert_eq!(domains[0].rating, PerformanceRating::Excellent);
    }

    #[test]
    fn test_exponential_and_factorial_share_edge() {
        assert_eq!(
            ratings(0.97),
            vec![PerformanceRating::Abysmal, PerformanceRating::Atrocious]
        );
        assert_eq!(ratings(0.7), vec![PerformanceRating::Atrocious]);
        assert_eq!(ratings(1.0), vec![PerformanceRating::Abysmal]);
    }

    #[test]
    fn test_linear_upper_edge() {
        assert_eq!(ratings(0.29), vec![PerformanceRating::Bad]);
        assert_eq!(
            ratings(0.28),
            vec![PerformanceRating::Bad, PerformanceRating::Fair]
        );
    }

    #[test]
    fn test_output_is_ordered_by_severity() {
        for step in 0..=100 {
            let score = step as f64 / 100.0;
            let domains = estimate_domains(score);
            assert!(!domains.is_empty(), "score {score} matched nothing");

            let positions: Vec<usize> = domains
                .iter()
                .map(|d| {
                    DOMAIN_TABLE
                        .iter()
                        .position(|r| r.domain == *d)
                        .unwrap()
                })
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_nan_and_out_of_range_match_nothing() {
        assert!(estimate_domains(f64::NAN).is_empty());
        assert!(estimate_domains(-0.1).is_empty());
        assert!(estimate_domains(1.5).is_empty());
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(PerformanceRating::Atrocious.to_string(), "atrocious");
        assert_eq!(PerformanceRating::Unknown.to_string(), "unknown");
    }
}
