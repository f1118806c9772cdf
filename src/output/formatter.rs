use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::model::{EvaluationResult, Tier};
use crate::scoring::classify_tier;
use crate::store::StoredEvaluation;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn colored_tier(tier: Tier) -> String {
    match tier {
        Tier::Low => tier.to_string().red().to_string(),
        Tier::Medium => tier.to_string().yellow().to_string(),
        Tier::High => tier.to_string().green().to_string(),
        Tier::VeryHigh => tier.to_string().bright_green().to_string(),
    }
}

fn tier_label(tier: Tier, use_colors: bool) -> String {
    if use_colors {
        colored_tier(tier)
    } else {
        tier.to_string()
    }
}

/// Format an evaluation result as a multi-line summary
pub fn format_result(result: &EvaluationResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = match (&result.organization, result.year) {
        (Some(org), Some(year)) => format!("{} ({})", org, year),
        (Some(org), None) => org.clone(),
        (None, Some(year)) => format!("Evaluation ({})", year),
        (None, None) => "Evaluation".to_string(),
    };
    if use_colors {
        lines.push(heading.bold().to_string());
    } else {
        lines.push(heading);
    }

    lines.push(format!(
        "  Total index: {:.3} ({})",
        result.total_index,
        tier_label(result.tier, use_colors)
    ));

    for block_index in &result.blocks {
        lines.push(format!("  {}: {:.3}", block_index.block, block_index.value));
    }

    if let (Some(weakest), Some(strongest)) = (result.weakest_block, result.strongest_block) {
        lines.push(format!(
            "  Weakest: {}  Strongest: {}",
            weakest, strongest
        ));
    }

    lines.join("\n")
}

/// Format an evaluation result with per-indicator normalized values
/// (for verbose mode)
pub fn format_result_detail(result: &EvaluationResult, use_colors: bool) -> String {
    let mut lines = vec![format_result(result, use_colors)];

    for block_index in &result.blocks {
        if block_index.indicators.is_empty() {
            continue;
        }
        lines.push(format!("  Block {} indicators:", block_index.block));
        for (id, z) in &block_index.indicators {
            lines.push(format!("    {}: {:.3}", id, z));
        }
    }

    lines.join("\n")
}

/// Format stored evaluations as an indexed table
/// Columns: index, organization, year, total index, tier, R, P, O, I
pub fn format_store_table(records: &[&StoredEvaluation], use_colors: bool) -> String {
    use crate::model::Block;

    if records.is_empty() {
        return "No stored evaluations.".to_string();
    }

    let term_width = get_terminal_width();

    // Index 3 + year 4 + total 6 + tier 9 + four block columns of 5, plus
    // separators; the rest goes to the organization name
    let fixed_width = 3 + 1 + 4 + 2 + 6 + 2 + 9 + 2 + 4 * 7;

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let year = record
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string());
            let tier = classify_tier(record.total_index);

            let organization = record.organization.as_deref().unwrap_or("-");
            let organization = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(organization, width - fixed_width)
                } else {
                    truncate_name(organization, 20)
                }
            } else {
                organization.to_string()
            };

            let blocks = Block::ALL
                .iter()
                .map(|b| format!("{}={:.3}", b, record.block_value(*b)))
                .collect::<Vec<_>>()
                .join(" ");

            if use_colors {
                format!(
                    "{} {}  {:>4}  {:.3}  {:<9}  {}",
                    index_str.dimmed(),
                    organization.bold(),
                    year,
                    record.total_index,
                    tier_label(tier, true),
                    blocks
                )
            } else {
                format!(
                    "{} {}  {:>4}  {:.3}  {:<9}  {}",
                    index_str, organization, year, record.total_index, tier, blocks
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
