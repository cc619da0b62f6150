//! Plain-text report tables.

use valueon_core::{
    additional_contribution, format_korean_currency, tier_stats, AnalysisInputs, AnalysisResult,
    MemberTier, UnitAllocation, ValidationReport,
};

fn won(amount: f64) -> String {
    format!("{}원", format_korean_currency(amount))
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Full analysis report for the terminal.
pub fn analysis_table(inputs: &AnalysisInputs, result: &AnalysisResult) -> String {
    let mut out = String::new();

    line(&mut out, "COSTS");
    for row in &result.cost_breakdown {
        line(&mut out, &format!("  {:<24} {:>24}", row.name, won(row.value)));
    }
    line(&mut out, &format!("  {:<24} {:>24}", "Total", won(result.total_project_cost)));
    line(&mut out, &format!("  {:<24} {:>24}", "Per floor pyung", won(result.cost_per_pyung)));
    line(&mut out, "");

    line(
        &mut out,
        &format!("UNIT PRICES (base {} / pyung)", won(result.base_price_per_pyung)),
    );
    line(
        &mut out,
        &format!(
            "  {:<12} {:<8} {:>6} {:>22} {:>18} {:>22}",
            "Type", "Tier", "Units", "Price", "Per pyung", "Extra contribution"
        ),
    );
    for price in &result.unit_pricing {
        let units = inputs
            .allocation(&price.allocation_id)
            .map(|a: &UnitAllocation| a.count)
            .unwrap_or(0);
        // Only 1st-tier members paid the initial installment
        let extra = match price.tier {
            MemberTier::First => won(additional_contribution(price.total_price, inputs.initial_payment)),
            _ => "-".to_string(),
        };
        line(
            &mut out,
            &format!(
                "  {:<12} {:<8} {:>6} {:>22} {:>18} {:>22}",
                price.unit_name,
                price.tier.as_str(),
                units,
                won(price.total_price),
                won(price.price_per_pyung),
                extra
            ),
        );
    }
    line(&mut out, "");

    line(&mut out, "REVENUE");
    for row in tier_stats(&inputs.unit_types, &inputs.unit_allocations, &result.unit_pricing) {
        line(
            &mut out,
            &format!(
                "  {:<12} {:>6} {:>22} {:>6.1}%",
                row.group.label(),
                row.count,
                won(row.revenue),
                row.share
            ),
        );
    }
    line(&mut out, &format!("  {:<24} {:>24}", "Total revenue", won(result.total_revenue)));
    line(&mut out, &format!("  {:<24} {:>24}", "Profit", won(result.profit)));

    out
}

/// Counts of every tier of one unit type, e.g. `1st 60 / 2nd 20 / General 20`.
pub fn type_counts(inputs: &AnalysisInputs, unit_type_id: &str) -> String {
    inputs
        .unit_allocations
        .iter()
        .filter(|a| a.unit_type_id == unit_type_id)
        .map(|a| format!("{} {}", a.tier, a.count))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn validation_lines(report: &ValidationReport) -> String {
    if report.is_clean() {
        return "✅ No issues found\n".to_string();
    }
    report
        .warnings
        .iter()
        .map(|w| format!("⚠️  {}\n", w))
        .collect()
}
