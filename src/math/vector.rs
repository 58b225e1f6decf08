// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Newtype wrapper for a fixed-dimensionality value vector.
///
/// All operations are pure and total: combining vectors of different lengths
/// treats the missing trailing elements of the shorter operand as 0, and
/// non-finite inputs propagate by IEEE arithmetic rules rather than being
/// recovered internally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(pub Vec<f64>);

impl Vector {
    /// Create a new empty vector
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a component, treating out-of-range indices as 0
    pub fn component(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    /// Write a component, zero-extending the vector if it ends before `index`
    pub fn set_component(&mut self, index: usize, value: f64) {
        if self.0.len() <= index {
            self.0.resize(index + 1, 0.0);
        }
        self.0[index] = value;
    }

    /// Elementwise logistic sigmoid of `x + bias`, range (0,1)
    pub fn sigmoid(&self, bias: f64) -> Vector {
        Self(self.0.iter().map(|x| 1.0 / (1.0 + (-(x + bias)).exp())).collect())
    }

    /// Elementwise hyperbolic tangent of `x + bias`, range (-1,1)
    pub fn tanh(&self, bias: f64) -> Vector {
        Self(self.0.iter().map(|x| (x + bias).tanh()).collect())
    }

    /// Elementwise sum; the shorter operand is zero-padded
    pub fn add(&self, other: &Vector) -> Vector {
        let len = self.len().max(other.len());
        Self((0..len).map(|i| self.component(i) + other.component(i)).collect())
    }

    /// Elementwise product; the shorter operand is zero-padded
    pub fn multiply(&self, other: &Vector) -> Vector {
        let len = self.len().max(other.len());
        Self((0..len).map(|i| self.component(i) * other.component(i)).collect())
    }

    /// Elementwise multiply by a scalar
    pub fn scale(&self, factor: f64) -> Vector {
        Self(self.0.iter().map(|x| x * factor).collect())
    }

    /// Elementwise `1 - x`
    pub fn one_minus(&self) -> Vector {
        Self(self.0.iter().map(|x| 1.0 - x).collect())
    }

    /// Gated blend `self·a + (1-self)·b`, with `self` as the gate.
    ///
    /// Computed directly per component so that zero-padding applies to the
    /// gate as well: a missing gate element reads as 0 and passes `b` through.
    pub fn interpolate(&self, a: &Vector, b: &Vector) -> Vector {
        let len = self.len().max(a.len()).max(b.len());
        Self(
            (0..len)
                .map(|i| {
                    let gate = self.component(i);
                    gate * a.component(i) + (1.0 - gate) * b.component(i)
                })
                .collect(),
        )
    }

    /// Copy of this vector truncated or zero-extended to `len`.
    ///
    /// Never scales or interpolates existing components.
    pub fn resized(&self, len: usize) -> Vector {
        Self((0..len).map(|i| self.component(i)).collect())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Self {
        vector.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-3;

    fn assert_close(actual: &Vector, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "length mismatch: {:?}", actual);
        for (i, (a, e)) in actual.0.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < TOLERANCE,
                "component {} differs: {} vs {}",
                i,
                a,
                e
            );
        }
    }

    #[test]
    fn sigmoid_known_values() {
        let v = Vector(vec![1.0, 0.0]);
        assert_close(&v.sigmoid(0.0), &[0.731, 0.5]);
    }

    #[test]
    fn sigmoid_bias_shifts_preactivation() {
        let zero = Vector(vec![0.0]);
        let two = Vector(vec![2.0]);
        assert_eq!(zero.sigmoid(2.0), two.sigmoid(0.0));
    }

    #[test]
    fn sigmoid_stays_in_open_unit_interval() {
        for x in -8..=8 {
            let v = Vector(vec![x as f64]);
            let y = v.sigmoid(0.0).component(0);
            assert!(y > 0.0 && y < 1.0, "sigmoid({}) = {}", x, y);
        }
    }

    #[test]
    fn tanh_known_values() {
        let v = Vector(vec![1.0, 0.0]);
        assert_close(&v.tanh(0.0), &[0.762, 0.0]);
    }

    #[test]
    fn tanh_stays_in_open_interval() {
        for x in -8..=8 {
            let v = Vector(vec![x as f64]);
            let y = v.tanh(0.0).component(0);
            assert!(y > -1.0 && y < 1.0, "tanh({}) = {}", x, y);
        }
    }

    #[test]
    fn add_zero_pads_shorter_operand() {
        let a = Vector(vec![1.0, 2.0]);
        let b = Vector(vec![3.0]);
        assert_eq!(a.add(&b), Vector(vec![4.0, 2.0]));
        assert_eq!(b.add(&a), Vector(vec![4.0, 2.0]));
    }

    #[test]
    fn multiply_zero_pads_shorter_operand() {
        let a = Vector(vec![1.0, 2.0]);
        let b = Vector(vec![3.0]);
        assert_eq!(a.multiply(&b), Vector(vec![3.0, 0.0]));
    }

    #[test]
    fn add_with_empty_vector_is_identity() {
        let a = Vector(vec![1.0, -2.0]);
        assert_eq!(a.add(&Vector::new()), a);
    }

    #[test]
    fn scale_multiplies_every_component() {
        let v = Vector(vec![1.0, -2.0, 0.5]);
        assert_eq!(v.scale(2.0), Vector(vec![2.0, -4.0, 1.0]));
    }

    #[test]
    fn one_minus_complements_components() {
        let v = Vector(vec![0.25, 1.0]);
        assert_eq!(v.one_minus(), Vector(vec![0.75, 0.0]));
    }

    #[test]
    fn interpolate_blends_between_keep_and_candidate() {
        let gate = Vector(vec![1.0, 0.0]);
        let keep = Vector(vec![5.0, 5.0]);
        let candidate = Vector(vec![-1.0, -1.0]);
        assert_eq!(gate.interpolate(&keep, &candidate), Vector(vec![5.0, -1.0]));

        let half = Vector(vec![0.5]);
        assert_close(&half.interpolate(&Vector(vec![2.0]), &Vector(vec![4.0])), &[3.0]);
    }

    #[test]
    fn interpolate_zero_pads_short_gate() {
        // A missing gate element reads as 0, so the candidate passes through.
        let gate = Vector(vec![1.0]);
        let keep = Vector(vec![5.0, 5.0]);
        let candidate = Vector(vec![-1.0, -1.0]);
        assert_eq!(gate.interpolate(&keep, &candidate), Vector(vec![5.0, -1.0]));
    }

    #[test]
    fn non_finite_inputs_propagate() {
        let v = Vector(vec![f64::NAN]);
        assert!(v.sigmoid(0.0).component(0).is_nan());

        let inf = Vector(vec![f64::INFINITY]);
        assert_eq!(inf.add(&Vector(vec![1.0])).component(0), f64::INFINITY);
    }

    #[test]
    fn resized_truncates_and_zero_extends() {
        let v = Vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.resized(2), Vector(vec![1.0, 2.0]));
        assert_eq!(v.resized(4), Vector(vec![1.0, 2.0, 3.0, 0.0]));
    }

    #[test]
    fn resize_round_trip_recovers_present_components() {
        let v = Vector(vec![1.0, 2.0]);
        assert_eq!(v.resized(3).resized(2), v);

        let w = Vector(vec![1.0, 2.0, 3.0]);
        let back = w.resized(2).resized(3);
        assert_eq!(back.component(0), 1.0);
        assert_eq!(back.component(1), 2.0);
        assert_eq!(back.component(2), 0.0);
    }

    #[test]
    fn component_out_of_range_reads_zero() {
        let v = Vector(vec![7.0]);
        assert_eq!(v.component(0), 7.0);
        assert_eq!(v.component(5), 0.0);
    }

    #[test]
    fn set_component_zero_extends_short_vectors() {
        let mut v = Vector(vec![7.0]);
        v.set_component(0, 1.0);
        assert_eq!(v, Vector(vec![1.0]));

        v.set_component(2, 5.0);
        assert_eq!(v, Vector(vec![1.0, 0.0, 5.0]));
    }
}
