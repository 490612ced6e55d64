//! Label-driven value lookup.

use tracing::trace;

use super::ExtractionMatch;
use super::patterns::NUMERIC_RUN;

/// Find the value for the first label (in priority order) that appears on a
/// line with a number, returning the last numeric run of that line.
///
/// Label priority wins over line order: a later label is only tried once an
/// earlier label has been searched across every line.
pub fn find_labelled<S, L>(lines: &[S], labels: &[L]) -> Option<ExtractionMatch<String>>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    for label in labels {
        let needle = label.as_ref().to_lowercase();

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if !line.to_lowercase().contains(&needle) {
                continue;
            }

            if let Some(last) = NUMERIC_RUN.find_iter(line).last() {
                trace!("Label {:?} matched line {}: {:?}", label.as_ref(), index, line);
                return Some(
                    ExtractionMatch::new(last.as_str().to_string(), line)
                        .with_line(index)
                        .with_label(label.as_ref()),
                );
            }
        }
    }

    None
}

/// Label lookup returning the raw numeric run, or `""` when nothing matches.
pub fn find_by_label<S, L>(lines: &[S], labels: &[L]) -> String
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    find_labelled(lines, labels)
        .map(|m| m.value)
        .unwrap_or_default()
}
