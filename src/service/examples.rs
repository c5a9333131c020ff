use serde::Serialize;

/// A named sample matrix offered to callers as a starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub matrix: Vec<Vec<i64>>,
}

fn example<R: AsRef<[i64]>>(name: &'static str, description: &'static str, rows: &[R]) -> Example {
    Example {
        name,
        description,
        matrix: rows.iter().map(|r| r.as_ref().to_vec()).collect(),
    }
}

fn identity(n: usize) -> Vec<Vec<i64>> {
    (0..n).map(|i| (0..n).map(|j| i64::from(i == j)).collect()).collect()
}

/// The built-in catalog, smallest interesting cases first.
pub fn catalog() -> Vec<Example> {
    vec![
        example(
            "3×3 Rank 2",
            "A 3×3 matrix with rank 2 (linearly dependent rows)",
            &[[1, 2, 3], [4, 5, 6], [7, 8, 9]],
        ),
        example("3×3 Identity", "The 3×3 identity matrix (full rank)", &identity(3)),
        example("2×2 Identity", "The 2×2 identity matrix", &identity(2)),
        example("4×4 Identity", "The 4×4 identity matrix", &identity(4)),
        example("5×5 Identity", "The 5×5 identity matrix (max size)", &identity(5)),
        example(
            "2×3 Rectangular",
            "A rectangular matrix with more columns than rows",
            &[[1, 2, 3], [4, 5, 6]],
        ),
        example(
            "3×2 Rectangular",
            "A rectangular matrix with more rows than columns",
            &[[1, 2], [3, 4], [5, 6]],
        ),
        example(
            "3×4 With Zero Row",
            "A 3×4 matrix of rank 2 whose last row is zero",
            &[[1, 0, 2, 1], [0, 1, 1, 2], [0, 0, 0, 0]],
        ),
        example("2×2 Singular", "A singular 2×2 matrix (rank 1)", &[[1, 2], [2, 4]]),
        example("3×3 Zero Matrix", "The zero matrix (rank 0)", &[[0, 0, 0], [0, 0, 0], [0, 0, 0]]),
        example("2×5 Wide Matrix", "A wide 2×5 matrix", &[[1, 2, 3, 4, 5], [6, 7, 8, 9, 10]]),
        example(
            "5×2 Tall Matrix",
            "A tall 5×2 matrix",
            &[[1, 2], [3, 4], [5, 6], [7, 8], [9, 10]],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;
    use crate::result::ComputationResult;
    use itertools::Itertools;

    #[test]
    fn every_example_is_consistent() {
        let examples = catalog();
        assert_eq!(examples.len(), 12);
        assert!(examples.iter().map(|e| e.name).all_unique());

        for e in &examples {
            let a = Matrix::from_integers(&e.matrix).unwrap();
            let r = ComputationResult::compute(&a).unwrap();
            assert!(r.dimension_check.valid, "{}", e.name);
        }
    }

    #[test]
    fn names_match_shapes_and_ranks() {
        let rank_of = |name: &str| {
            let e = catalog().into_iter().find(|e| e.name == name).unwrap();
            Matrix::from_integers(&e.matrix).unwrap().rank().unwrap()
        };
        assert_eq!(rank_of("3×3 Rank 2"), 2);
        assert_eq!(rank_of("5×5 Identity"), 5);
        assert_eq!(rank_of("3×4 With Zero Row"), 2);
        assert_eq!(rank_of("3×3 Zero Matrix"), 0);
        assert_eq!(rank_of("5×2 Tall Matrix"), 2);
    }
}
