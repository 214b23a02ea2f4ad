//! Report rendering.
//!
//! Formats a finished [`Analysis`] as plain text, Markdown or JSON.

use serde::Serialize;

use crate::core::{Analysis, Context, OutputFormat, Reliability};

/// Serializable view of a finished handover.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub context: Context,
    pub context_label: &'static str,
    pub reliability: Reliability,
    pub analysis: &'a Analysis,
}

impl<'a> Report<'a> {
    /// Wrap an analysis for rendering.
    pub fn new(analysis: &'a Analysis, context: Context) -> Self {
        Self {
            context,
            context_label: context.label(),
            reliability: analysis.reliability(),
            analysis,
        }
    }
}

/// Render an analysis in the requested format.
pub fn render(
    analysis: &Analysis,
    context: Context,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(analysis, context)),
        OutputFormat::Markdown => Ok(to_markdown(analysis, context)),
        OutputFormat::Json => serde_json::to_string_pretty(&Report::new(analysis, context)),
    }
}

/// Convert to markdown.
pub fn to_markdown(analysis: &Analysis, context: Context) -> String {
    let mut md = format!("# Handover Report ({})\n\n", context.label());

    md.push_str(&format!(
        "**Confidence:** {}% - {}\n\n",
        analysis.confidence_score,
        analysis.reliability().description()
    ));

    md.push_str(&format!(
        "## Risks ({} detected, {} high)\n\n",
        analysis.risks.len(),
        analysis.high_risk_count()
    ));
    for risk in &analysis.risks {
        md.push_str(&format!("- **{}** {}\n", risk.severity.badge(), risk.message));
    }
    md.push('\n');

    md.push_str("## Overview\n\n");
    md.push_str(&format!("> {}\n\n", analysis.overview));

    md.push_str("## Responsibilities\n\n");
    for item in &analysis.responsibilities {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');

    md.push_str("## Tasks\n\n");
    for task in &analysis.tasks {
        md.push_str(&format!("- [ ] {task}\n"));
    }
    md.push('\n');

    md.push_str("## Next Actions\n\n");
    for (i, action) in analysis.next_actions.iter().enumerate() {
        md.push_str(&format!("{}. {action}\n", i + 1));
    }

    md
}

/// Convert to plain text for the terminal.
pub fn to_text(analysis: &Analysis, context: Context) -> String {
    let mut out = format!("Handover Report - {}\n", context.label());
    out.push_str(&format!(
        "Confidence: {}% ({})\n\n",
        analysis.confidence_score,
        analysis.reliability().description()
    ));

    out.push_str(&format!(
        "Risks: {} detected, {} high\n",
        analysis.risks.len(),
        analysis.high_risk_count()
    ));
    for risk in &analysis.risks {
        out.push_str(&format!("  [{}] {}\n", risk.severity.badge(), risk.message));
    }

    out.push_str(&format!("\nOverview:\n  {}\n", analysis.overview));

    push_list(&mut out, "Responsibilities", &analysis.responsibilities);
    push_list(&mut out, "Tasks", &analysis.tasks);

    out.push_str("\nNext actions:\n");
    for (i, action) in analysis.next_actions.iter().enumerate() {
        out.push_str(&format!("  {}. {action}\n", i + 1));
    }

    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("\n{title}:\n"));
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnalysisEngine, RuleEngine};

    fn sample() -> Analysis {
        RuleEngine::new().generate_analysis(Context::Healthcare, "Patient stable.")
    }

    #[test]
    fn test_markdown_sections() {
        let md = to_markdown(&sample(), Context::Healthcare);
        assert!(md.starts_with("# Handover Report (Healthcare)"));
        assert!(md.contains("**Confidence:** 65% - Moderate reliability."));
        assert!(md.contains("## Risks (2 detected, 1 high)"));
        assert!(md.contains("- **HIGH** Potential information gap"));
        assert!(md.contains("- [ ] Review current documentation"));
        assert!(md.contains("3. Verify resource access"));
    }

    #[test]
    fn test_text_lists_every_task() {
        let analysis = sample();
        let text = to_text(&analysis, Context::Healthcare);
        for task in &analysis.tasks {
            assert!(text.contains(task.as_str()));
        }
        assert!(text.contains("Risks: 2 detected, 1 high"));
        assert!(text.contains("[MEDIUM] Dependency on external party verification."));
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample(), Context::Healthcare, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["context"], "healthcare");
        assert_eq!(value["context_label"], "Healthcare");
        assert_eq!(value["reliability"], "moderate");
        assert_eq!(value["analysis"]["confidenceScore"], 65);
    }
}
