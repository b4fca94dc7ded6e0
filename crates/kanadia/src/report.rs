use entry_engine::EntryDecision;

use crate::config::Format;

/// Render decisions for stdout.
///
/// Text output is one line per record; with `explain` each line also carries
/// the matched rule and reason.  JSON output is an array of labels, or of
/// full decisions with `explain`.
pub fn render(decisions: &[EntryDecision], format: Format, explain: bool) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(decisions
            .iter()
            .map(|d| text_line(d, explain))
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json if explain => Ok(serde_json::to_string_pretty(decisions)?),
        Format::Json => {
            let labels: Vec<_> = decisions.iter().map(|d| d.disposition).collect();
            Ok(serde_json::to_string(&labels)?)
        }
    }
}

fn text_line(decision: &EntryDecision, explain: bool) -> String {
    if !explain {
        return decision.disposition.to_string();
    }
    format!(
        "{}\t{}\t{}",
        decision.disposition,
        decision.matched_rule.as_deref().unwrap_or("-"),
        decision.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use entry_engine::Disposition;

    fn decisions() -> Vec<EntryDecision> {
        vec![
            EntryDecision::from_rule(Disposition::Reject, "reject", "missing required fields: from"),
            EntryDecision::accept_default("no rule matched the record"),
        ]
    }

    #[test]
    fn text_labels() {
        assert_eq!(render(&decisions(), Format::Text, false).unwrap(), "Reject\nAccept");
    }

    #[test]
    fn text_explained() {
        assert_eq!(
            render(&decisions(), Format::Text, true).unwrap(),
            "Reject\treject\tmissing required fields: from\nAccept\t-\tno rule matched the record"
        );
    }

    #[test]
    fn json_labels() {
        assert_eq!(
            render(&decisions(), Format::Json, false).unwrap(),
            r#"["Reject","Accept"]"#
        );
    }

    #[test]
    fn json_explained() {
        let out = render(&decisions(), Format::Json, true).unwrap();
        let parsed: Vec<EntryDecision> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, decisions());
    }

    #[test]
    fn empty_batch() {
        assert_eq!(render(&[], Format::Text, false).unwrap(), "");
        assert_eq!(render(&[], Format::Json, false).unwrap(), "[]");
    }
}
