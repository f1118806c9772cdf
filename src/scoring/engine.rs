use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{Block, BlockIndex, EvaluationRequest, EvaluationResult, Indicator, Tier};

/// The one failure the engine itself can raise. Everything else (degenerate
/// bounds, empty blocks, zero weight sums) resolves to defined numeric
/// fallbacks instead of erroring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unrecognized block code: {0}")]
    UnrecognizedBlock(String),
}

/// Map an indicator's raw value onto [0, 1].
///
/// `z = (value - min) / (max - min)`, inverted for cost metrics, clamped to
/// [0, 1]. Equal bounds make the ratio undefined; that case resolves to 0.0
/// rather than dividing by zero.
pub fn normalize(ind: &Indicator) -> f64 {
    if ind.max_value == ind.min_value {
        return 0.0;
    }

    let mut z = (ind.value - ind.min_value) / (ind.max_value - ind.min_value);

    if !ind.is_benefit {
        z = 1.0 - z;
    }

    z.clamp(0.0, 1.0)
}

/// Classify the overall index into a qualitative tier.
///
/// Boundaries are half-open with the lower bound inclusive: exactly 0.25 is
/// Medium, exactly 0.75 is Very High. Values outside [0, 1] classify through
/// the same thresholds.
pub fn classify_tier(total_index: f64) -> Tier {
    if total_index < 0.25 {
        Tier::Low
    } else if total_index < 0.50 {
        Tier::Medium
    } else if total_index < 0.75 {
        Tier::High
    } else {
        Tier::VeryHigh
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Score one request: normalize every indicator, aggregate per block,
/// compose the overall index, classify it and pick the extremal blocks.
///
/// Pure and synchronous; the input is never mutated and the result is
/// freshly allocated. Fails fast on the first indicator whose block code is
/// outside the fixed set, with no partial result.
pub fn evaluate(req: &EvaluationRequest) -> Result<EvaluationResult, EngineError> {
    let mut groups: BTreeMap<Block, Vec<&Indicator>> =
        Block::ALL.iter().map(|b| (*b, Vec::new())).collect();

    for ind in &req.indicators {
        let block = Block::from_code(&ind.block)
            .ok_or_else(|| EngineError::UnrecognizedBlock(ind.block.clone()))?;
        groups.entry(block).or_default().push(ind);
    }

    let mut blocks = Vec::with_capacity(Block::ALL.len());
    let mut block_values: BTreeMap<Block, f64> = BTreeMap::new();

    for (block, indicators) in &groups {
        let mut norm_values = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;

        for ind in indicators {
            let z = normalize(ind);
            norm_values.insert(ind.id.clone(), z);
            weighted_sum += z * ind.weight;
            weight_sum += ind.weight;
        }

        // Empty block or all-zero weights: the weighted mean is undefined,
        // the index is defined as 0.
        let value = if weight_sum > 0.0 {
            weighted_sum / weight_sum
        } else {
            0.0
        };

        block_values.insert(*block, value);
        blocks.push(BlockIndex {
            block: *block,
            value: round3(value),
            indicators: norm_values,
        });
    }

    // Composition and extremal selection both run on the unrounded block
    // values; rounding applies only to emitted numbers.
    let weights = req.weights();
    let total_raw: f64 = Block::ALL
        .iter()
        .map(|b| weights.get(*b) * block_values.get(b).copied().unwrap_or(0.0))
        .sum();
    let total_index = round3(total_raw);

    let mut weakest: Option<(Block, f64)> = None;
    let mut strongest: Option<(Block, f64)> = None;
    for block in Block::ALL {
        if let Some(&value) = block_values.get(&block) {
            // Replace only on strict improvement so ties keep the
            // first-seen block in R, P, O, I order.
            if weakest.map_or(true, |(_, w)| value < w) {
                weakest = Some((block, value));
            }
            if strongest.map_or(true, |(_, s)| value > s) {
                strongest = Some((block, value));
            }
        }
    }

    Ok(EvaluationResult {
        organization: req.organization.clone(),
        year: req.year,
        total_index,
        blocks,
        tier: classify_tier(total_index),
        weakest_block: weakest.map(|(b, _)| b),
        strongest_block: strongest.map(|(b, _)| b),
    })
}
