use std::collections::HashSet;

use crate::model::{Block, EvaluationRequest};

/// Validate a scoring request at the boundary, before it reaches the engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_request(req: &EvaluationRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, ind) in req.indicators.iter().enumerate() {
        if ind.max_value <= ind.min_value {
            errors.push(format!(
                "indicators[{}] ({}): max_value ({}) must be greater than min_value ({})",
                i, ind.id, ind.max_value, ind.min_value
            ));
        }

        if !(0.0..=1.0).contains(&ind.weight) {
            errors.push(format!(
                "indicators[{}] ({}): weight {} must be in [0, 1]",
                i, ind.id, ind.weight
            ));
        }

        if Block::from_code(&ind.block).is_none() {
            errors.push(format!(
                "indicators[{}] ({}): unrecognized block code '{}' (expected R, P, O or I)",
                i, ind.id, ind.block
            ));
        }

        if !seen_ids.insert(ind.id.as_str()) {
            errors.push(format!(
                "indicators[{}]: duplicate indicator id '{}'",
                i, ind.id
            ));
        }
    }

    let block_weights = req.weights();
    for block in Block::ALL {
        let weight = block_weights.get(block);
        if weight < 0.0 {
            errors.push(format!(
                "block_weights.{}: must be non-negative, got {}",
                block.code().to_lowercase(),
                weight
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockWeights, Indicator};

    fn indicator(id: &str, block: &str, min: f64, max: f64, weight: f64) -> Indicator {
        Indicator {
            id: id.to_string(),
            name: format!("Indicator {}", id),
            block: block.to_string(),
            value: 50.0,
            min_value: min,
            max_value: max,
            weight,
            is_benefit: true,
        }
    }

    fn request(indicators: Vec<Indicator>) -> EvaluationRequest {
        EvaluationRequest {
            organization: None,
            year: None,
            indicators,
            block_weights: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request(vec![
            indicator("R1", "R", 0.0, 100.0, 1.0),
            indicator("P1", "P", 0.0, 50.0, 0.5),
        ]);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_empty_request_is_valid() {
        assert!(validate_request(&request(vec![])).is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let req = request(vec![indicator("R1", "R", 100.0, 0.0, 1.0)]);
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max_value"));
        assert!(errors[0].contains("R1"));
    }

    #[test]
    fn test_equal_bounds_rejected() {
        // Equal bounds are a validation failure; the engine only tolerates
        // them defensively
        let req = request(vec![indicator("R1", "R", 5.0, 5.0, 1.0)]);
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        let req = request(vec![indicator("R1", "R", 0.0, 100.0, 1.5)]);
        let errors = validate_request(&req).unwrap_err();
        assert!(errors[0].contains("weight"));

        let req = request(vec![indicator("R1", "R", 0.0, 100.0, -0.1)]);
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_unknown_block_rejected() {
        let req = request(vec![indicator("X1", "X", 0.0, 100.0, 1.0)]);
        let errors = validate_request(&req).unwrap_err();
        assert!(errors[0].contains("block code 'X'"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let req = request(vec![
            indicator("R1", "R", 0.0, 100.0, 1.0),
            indicator("R1", "R", 0.0, 100.0, 1.0),
        ]);
        let errors = validate_request(&req).unwrap_err();
        assert!(errors[0].contains("duplicate indicator id 'R1'"));
    }

    #[test]
    fn test_negative_block_weight_rejected() {
        let mut req = request(vec![]);
        req.block_weights = Some(BlockWeights {
            r: -0.25,
            p: 0.25,
            o: 0.25,
            i: 0.25,
        });
        let errors = validate_request(&req).unwrap_err();
        assert!(errors[0].contains("block_weights.r"));
    }

    #[test]
    fn test_collects_all_errors() {
        let req = request(vec![
            indicator("R1", "R", 100.0, 0.0, 1.0), // bounds error
            indicator("X1", "X", 0.0, 100.0, 2.0), // block + weight errors
        ]);
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
