//! Unit-cost calculator.

use serde::Serialize;

use crate::domain::{INR_TO_USD, WeightUnit};

/// Smallest accepted price per gram.
pub const MIN_PRICE_PER_GRAM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInput {
    pub weight: f64,
    pub unit: WeightUnit,
    /// INR per gram.
    pub price_per_gram: f64,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            weight: 10.0,
            unit: WeightUnit::Grams,
            price_per_gram: 75.0,
        }
    }
}

impl CalculatorInput {
    /// Apply the input-surface floors: weight ≥ 0, price ≥ 1.
    pub fn clamped(self) -> Self {
        let weight = if self.weight.is_finite() { self.weight.max(0.0) } else { 0.0 };
        let price_per_gram = if self.price_per_gram.is_finite() {
            self.price_per_gram.max(MIN_PRICE_PER_GRAM)
        } else {
            MIN_PRICE_PER_GRAM
        };
        Self {
            weight,
            unit: self.unit,
            price_per_gram,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub weight_in_grams: f64,
    pub total_cost_inr: f64,
    pub total_cost_usd: f64,
}

pub fn quote(input: &CalculatorInput) -> Quote {
    let weight_in_grams = input.unit.to_grams(input.weight);
    let total_cost_inr = weight_in_grams * input.price_per_gram;
    Quote {
        weight_in_grams,
        total_cost_inr,
        total_cost_usd: to_usd(total_cost_inr),
    }
}

pub fn to_usd(inr: f64) -> f64 {
    inr * INR_TO_USD
}
