//! Plain-text rendering of a batch's grouped results, for the console and
//! for alert mail bodies.

use crate::application::batch::GroupedResults;
use crate::domain::types::AnalysisResult;
use chrono::Utc;
use std::fmt::Write;

/// Render the full batch report. Empty groups are omitted.
pub fn render(groups: &[GroupedResults]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "MARKET IMPACT REPORT - {}",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{}", "=".repeat(78));

    for group in groups {
        if group.results.is_empty() {
            continue;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", group.group);
        let _ = writeln!(
            out,
            "  {:<12} {:>10} {:>9} {:<12} {:>5} {:>8} {:>9}",
            "TICKER", "CLOSE", "EXP.MOVE", "SIGNAL", "RSI", "VOL.SHK", "SENT(N)"
        );

        for result in &group.results {
            let _ = writeln!(
                out,
                "  {:<12} {:>10} {:>8.2}% {:<12} {:>5.1} {:>8.2} {:>+5.2}({})",
                result.ticker,
                result.last_close,
                result.impact.expected_move_pct,
                result.signal.to_string(),
                result.vectors.rsi,
                result.vectors.volume_shock_ratio,
                result.impact.sentiment,
                result.impact.article_count,
            );
            if let Some(position) = &result.position {
                let _ = writeln!(
                    out,
                    "    position: P/L {:+} {} ({:+.2}%) - {}",
                    position.pl, result.currency, position.pl_pct, position.advice
                );
            }
        }
    }

    out
}

/// Render the body of an alert notification for the flagged results.
pub fn render_alert_body(alerts: &[&AnalysisResult]) -> String {
    let mut out = String::new();
    for result in alerts {
        let _ = write!(
            out,
            "{} [{}]: expected move {:+.2}%, volume shock {:.2}",
            result.ticker, result.signal, result.impact.expected_move_pct,
            result.vectors.volume_shock_ratio
        );
        if let Some(position) = &result.position {
            let _ = write!(out, ", advice: {}", position.advice);
        }
        let _ = writeln!(out);
    }
    out
}
