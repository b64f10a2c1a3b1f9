//! Statement-level schema qualification

use tracing::trace;

use super::rules::QualifyRule;

/// Prefix bare table references in `statement` with `schema`.
///
/// Runs every [`QualifyRule`] in order. Text that matches no rule passes
/// through untouched, so malformed SQL is returned as-is. The result carries
/// no trailing `;` or newline.
pub fn qualify(statement: &str, schema: &str) -> String {
    QualifyRule::ALL
        .iter()
        .fold(statement.to_string(), |text, rule| {
            let rewritten = rule.apply(&text, schema);
            if rewritten != text {
                trace!(rule = rule.name(), schema, "rule rewrote statement");
            }
            rewritten
        })
}
