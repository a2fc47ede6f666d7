//! Human-readable rendering of reports
//!
//! All rounding to currency precision happens here, never in the engine.

use crate::analytics::ranking::RankMetric;
use crate::analytics::reports::Report;

const RULE_WIDTH: usize = 80;

/// Round half away from zero to two fractional digits
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format with thousands separators and a fixed number of decimals
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `$1,234.56` style currency string
pub fn format_currency(value: f64) -> String {
    let grouped = format_grouped(round_currency(value), 2);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", grouped),
    }
}

fn metric_label(metric: RankMetric) -> &'static str {
    match metric {
        RankMetric::Revenue => "Revenue",
        RankMetric::Quantity => "Quantity",
        RankMetric::Count => "Number of Sales",
        RankMetric::AvgUnitPrice => "Average Price",
    }
}

/// Render the report as the CLI text summary
pub fn render_text(report: &Report) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let overall = &report.overall;
    let overview = &report.overview;
    let monthly = &report.monthly_statistics;
    let mut out = String::new();

    out.push_str(&format!("{}\nSALES DATA ANALYSIS REPORT\n{}\n", heavy, heavy));
    out.push_str(&format!(
        "Period: {} to {}\n\n",
        overview.first_sale_date, overview.last_sale_date
    ));

    out.push_str(&format!("OVERALL STATISTICS\n{}\n", light));
    out.push_str(&format!("Total Revenue:              {}\n", format_currency(overall.sum)));
    out.push_str(&format!("Average Sale Value:         {}\n", format_currency(overall.mean)));
    out.push_str(&format!("Median Sale Value:          {}\n", format_currency(overall.median)));
    out.push_str(&format!(
        "Std Dev Sale Value:         {}\n",
        format_currency(overall.population_stddev)
    ));
    out.push_str(&format!("Min Sale Value:             {}\n", format_currency(overall.min)));
    out.push_str(&format!("Max Sale Value:             {}\n", format_currency(overall.max)));
    out.push_str(&format!(
        "Total Items Sold:           {}\n",
        format_grouped(overview.total_items_sold as f64, 0)
    ));
    out.push_str(&format!(
        "Total Transactions:         {}\n",
        format_grouped(overview.total_transactions as f64, 0)
    ));
    out.push_str(&format!("Unique Products:            {}\n", overview.unique_products));
    out.push_str(&format!(
        "Avg Quantity per Sale:      {:.2}\n",
        overview.average_quantity_per_sale
    ));
    out.push_str(&format!(
        "Average Price:              {}\n\n",
        format_currency(overview.average_unit_price)
    ));

    out.push_str(&format!(
        "TOP {} PRODUCTS (By {})\n{}\n",
        report.top_products.len(),
        metric_label(report.rank_metric),
        light
    ));
    out.push_str(&format!(
        "{:<5} {:<20} {:>15} {:>10} {:>8} {:>14}\n{}\n",
        "Rank", "Product", "Revenue", "Qty Sold", "Sales", "Avg Price", light
    ));
    for (rank, row) in report.top_products.iter().enumerate() {
        out.push_str(&format!(
            "{:<5} {:<20} {:>15} {:>10} {:>8} {:>14}\n",
            rank + 1,
            row.key,
            format_currency(row.revenue_sum),
            format_grouped(row.quantity_sum as f64, 0),
            row.count,
            format_currency(row.avg_unit_price)
        ));
    }
    out.push('\n');

    out.push_str(&format!("MONTHLY SALES TRENDS\n{}\n", light));
    out.push_str(&format!(
        "{:<10} {:>15} {:>10} {:>8}\n{}\n",
        "Month", "Revenue", "Quantity", "# Sales", light
    ));
    for row in &report.monthly {
        out.push_str(&format!(
            "{:<10} {:>15} {:>10} {:>8}\n",
            row.key.to_string(),
            format_currency(row.revenue_sum),
            format_grouped(row.quantity_sum as f64, 0),
            row.count
        ));
    }
    out.push('\n');

    let volatility = monthly
        .coefficient_of_variation()
        .map(|cv| format!("{:.2}%", cv * 100.0))
        .unwrap_or_else(|| "n/a".to_string());
    out.push_str(&format!("MONTHLY REVENUE STATISTICS\n{}\n", light));
    out.push_str(&format!("Average Monthly Revenue:    {}\n", format_currency(monthly.mean)));
    out.push_str(&format!("Median Monthly Revenue:     {}\n", format_currency(monthly.median)));
    out.push_str(&format!(
        "Std Dev Monthly Revenue:    {}\n",
        format_currency(monthly.population_stddev)
    ));
    out.push_str(&format!("Revenue Volatility (CV):    {}\n", volatility));
    if let Some(best) = report.best_month() {
        out.push_str(&format!(
            "Best Month Revenue:         {} ({})\n",
            format_currency(best.revenue_sum),
            best.key
        ));
    }
    if let Some(worst) = report.worst_month() {
        out.push_str(&format!(
            "Worst Month Revenue:        {} ({})\n",
            format_currency(worst.revenue_sum),
            worst.key
        ));
    }
    out.push_str(&format!("{}\n", heavy));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(1033.333333), 1033.33);
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(round_currency(-2.5), -2.5);
        assert_eq!(round_currency(3100.0), 3100.0);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0, 2), "0.00");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-1234.5, 2), "-1,234.50");
        assert_eq!(format_grouped(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(3100.0), "$3,100.00");
        assert_eq!(format_currency(1033.3333), "$1,033.33");
        assert_eq!(format_currency(-42.0), "-$42.00");
    }
}
