use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed indicator blocks.
///
/// The declaration order (R, P, O, I) is load-bearing: it is the emission
/// order of block indices in results and the tie-break order when selecting
/// the weakest/strongest block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Block {
    R,
    P,
    O,
    I,
}

impl Block {
    /// All blocks in fixed order.
    pub const ALL: [Block; 4] = [Block::R, Block::P, Block::O, Block::I];

    /// Parse a block code. Returns None for anything outside the fixed set.
    pub fn from_code(code: &str) -> Option<Block> {
        match code {
            "R" => Some(Block::R),
            "P" => Some(Block::P),
            "O" => Some(Block::O),
            "I" => Some(Block::I),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Block::R => "R",
            Block::P => "P",
            Block::O => "O",
            Block::I => "I",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single measured indicator.
///
/// `block` is kept as a raw string rather than a `Block` so that an
/// unrecognized code survives deserialization and can be reported by
/// validation (or, failing that, by the engine itself).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    /// Identifier, unique within a request (e.g. "R1", "O3")
    pub id: String,
    /// Display name
    pub name: String,
    /// Block code: "R", "P", "O" or "I"
    pub block: String,
    /// Raw measured value
    pub value: f64,
    /// Declared lower bound
    pub min_value: f64,
    /// Declared upper bound (must strictly exceed min_value)
    pub max_value: f64,
    /// Weight within the block, in [0, 1]
    pub weight: f64,
    /// True if higher raw values are better; false for cost metrics
    #[serde(default = "default_is_benefit")]
    pub is_benefit: bool,
}

fn default_is_benefit() -> bool {
    true
}

/// Relative importance of each block in the overall index.
///
/// The engine uses these as direct multipliers; nothing forces them to sum
/// to 1, only to be non-negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BlockWeights {
    #[serde(default = "default_block_weight")]
    pub r: f64,
    #[serde(default = "default_block_weight")]
    pub p: f64,
    #[serde(default = "default_block_weight")]
    pub o: f64,
    #[serde(default = "default_block_weight")]
    pub i: f64,
}

fn default_block_weight() -> f64 {
    0.25
}

impl Default for BlockWeights {
    fn default() -> Self {
        Self {
            r: 0.25,
            p: 0.25,
            o: 0.25,
            i: 0.25,
        }
    }
}

impl BlockWeights {
    pub fn get(&self, block: Block) -> f64 {
        match block {
            Block::R => self.r,
            Block::P => self.p,
            Block::O => self.o,
            Block::I => self.i,
        }
    }

    /// Sum of the four weights. Informational; not enforced to equal 1.
    pub fn total(&self) -> f64 {
        self.r + self.p + self.o + self.i
    }
}

/// One scoring request: optional organization metadata, the indicator list
/// and the block weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub indicators: Vec<Indicator>,
    /// Absent means "use the configured or built-in defaults"
    #[serde(default)]
    pub block_weights: Option<BlockWeights>,
}

impl EvaluationRequest {
    /// Effective block weights: the request's own, or equal defaults.
    pub fn weights(&self) -> BlockWeights {
        self.block_weights.unwrap_or_default()
    }
}

/// Index for one block: the weighted mean of its normalized indicators plus
/// the per-indicator normalized values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockIndex {
    pub block: Block,
    pub value: f64,
    pub indicators: BTreeMap<String, f64>,
}

/// Qualitative tier derived from the overall index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
            Tier::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

/// Outcome of one scoring run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub organization: Option<String>,
    pub year: Option<i32>,
    /// Overall index, rounded to 3 decimals. Nominally in [0, 1] but not
    /// re-clamped after weighting.
    pub total_index: f64,
    /// One entry per block, in R, P, O, I order, values rounded to 3 decimals
    pub blocks: Vec<BlockIndex>,
    pub tier: Tier,
    pub weakest_block: Option<Block>,
    pub strongest_block: Option<Block>,
}

impl EvaluationResult {
    /// Block values keyed by block, in fixed R, P, O, I order.
    pub fn block_values(&self) -> BTreeMap<Block, f64> {
        self.blocks.iter().map(|b| (b.block, b.value)).collect()
    }
}
