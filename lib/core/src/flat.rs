use crate::error::{Error, Result};
use crate::vector::Vector;
use ordered_float::OrderedFloat;

/// Exact nearest-neighbour index over squared Euclidean distance.
///
/// Every query scans all stored vectors, so results are exact and repeatable.
/// Ties in distance resolve to the lower ordinal.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    vectors: Vec<Vector>,
}

impl FlatL2Index {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
        }
    }

    /// Build an index from vectors that must all share one dimension.
    pub fn build(dim: usize, vectors: Vec<Vector>) -> Result<Self> {
        let mut index = Self::new(dim);
        for vector in vectors {
            index.add(vector)?;
        }
        Ok(index)
    }

    /// Append a vector; its ordinal is the previous [`len`](Self::len).
    pub fn add(&mut self, vector: Vector) -> Result<usize> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        if !vector.is_finite() {
            return Err(Error::InvalidVector(format!(
                "vector {} has a NaN or infinite component",
                self.vectors.len()
            )));
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Vector> {
        self.vectors.get(ordinal)
    }

    /// The `k` nearest vectors as `(ordinal, squared distance)`, nearest first.
    /// `k` is clamped to the number of stored vectors.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        if !query.is_finite() {
            return Err(Error::InvalidVector(
                "query has a NaN or infinite component".to_string(),
            ));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| (ordinal, vector.squared_l2_distance(query)))
            .collect();

        scored.sort_by_key(|&(ordinal, distance)| (OrderedFloat(distance), ordinal));
        scored.truncate(k.min(self.vectors.len()));
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FlatL2Index {
        FlatL2Index::build(
            2,
            vec![
                Vector::new(vec![0.0, 0.0]),
                Vector::new(vec![3.0, 4.0]),
                Vector::new(vec![1.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_search_orders_by_distance() {
        let results = index().search(&Vector::new(vec![0.0, 0.0]), 3).unwrap();
        assert_eq!(results, vec![(0, 0.0), (2, 1.0), (1, 25.0)]);
    }

    #[test]
    fn test_k_clamped() {
        let results = index().search(&Vector::new(vec![3.0, 4.0]), 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (1, 0.0));
    }

    #[test]
    fn test_ties_break_by_ordinal() {
        let index = FlatL2Index::build(
            1,
            vec![Vector::new(vec![2.0]), Vector::new(vec![-2.0]), Vector::new(vec![2.0])],
        )
        .unwrap();
        let results = index.search(&Vector::new(vec![0.0]), 3).unwrap();
        let ordinals: Vec<usize> = results.iter().map(|(o, _)| *o).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_dimension_checked() {
        let mut index = FlatL2Index::new(2);
        assert!(matches!(
            index.add(Vector::new(vec![1.0])),
            Err(Error::InvalidDimension { expected: 2, actual: 1 })
        ));
        assert!(index.search(&Vector::new(vec![1.0, 2.0, 3.0]), 1).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut index = FlatL2Index::new(2);
        assert_eq!(index.add(Vector::new(vec![0.5, 0.0])).unwrap(), 0);
        assert!(matches!(
            index.add(Vector::new(vec![f32::NAN, 0.0])),
            Err(Error::InvalidVector(_))
        ));
        assert!(matches!(
            index.add(Vector::new(vec![0.0, f32::INFINITY])),
            Err(Error::InvalidVector(_))
        ));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(0), Some(&Vector::new(vec![0.5, 0.0])));
        assert!(index.get(1).is_none());

        assert!(matches!(
            index.search(&Vector::new(vec![f32::NAN, 0.0]), 1),
            Err(Error::InvalidVector(_))
        ));
    }
}
