//! Secondary heuristics used when label lookups come back empty.

use tracing::{debug, trace};

use super::ExtractionMatch;
use super::labels::find_by_label;
use super::numbers::{DecimalSeparator, infer_separator, normalize, normalize_value};
use super::patterns::{AMOUNT_CANDIDATE, AMOUNT_SHAPE, DATE_SHAPE, IDENTIFIER, QUANTITY_TOKEN};

/// Every amount-shaped token (two-decimal tail) in the document, in order.
pub fn amount_candidates<S: AsRef<str>>(lines: &[S]) -> Vec<ExtractionMatch<String>> {
    let mut candidates = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        for m in AMOUNT_CANDIDATE.find_iter(line) {
            let token = m.as_str().trim();
            if AMOUNT_SHAPE.is_match(token) {
                candidates.push(ExtractionMatch::new(token.to_string(), line).with_line(index));
            }
        }
    }

    candidates
}

/// Pick the largest amount-shaped token in the document.
///
/// The settlement amount is usually the largest currency figure on a
/// confirmation. Each candidate infers its own decimal separator. Ties keep
/// the earliest token. Returns the raw token, or `""`.
pub fn amount_fallback<S: AsRef<str>>(lines: &[S]) -> String {
    let mut best: Option<(f64, String)> = None;

    for candidate in amount_candidates(lines) {
        let separator = infer_separator(&candidate.value);
        let value = normalize_value(&candidate.value, separator)
            .value()
            .unwrap_or(0.0);
        trace!("Amount candidate {:?} -> {}", candidate.value, value);

        match &best {
            Some((best_value, _)) if value <= *best_value => {}
            _ => best = Some((value, candidate.value)),
        }
    }

    match best {
        Some((value, raw)) => {
            debug!("Amount fallback selected {:?} ({})", raw, value);
            raw
        }
        None => String::new(),
    }
}

/// Quantity lookup: labels first, then the first number-shaped token on a
/// line that does not carry a date.
pub fn quantity_fallback<S, L>(lines: &[S], labels: &[L]) -> String
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    let labelled = find_by_label(lines, labels);
    if !labelled.is_empty() {
        return labelled;
    }

    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !DATE_SHAPE.is_match(line))
        .find_map(|line| QUANTITY_TOKEN.find(line))
        .map(|m| {
            debug!("Quantity fallback picked positional token {:?}", m.as_str());
            m.as_str().to_string()
        })
        .unwrap_or_default()
}

/// Quantity and price recovered from an instrument identifier line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstructed {
    pub quantity: String,
    pub price: String,
}

/// Rebuild quantity and price from the first line carrying an identifier.
///
/// Such lines are laid out as `<ISIN> <name...> <quantity> <price> <x> <y>`,
/// so quantity is the 4th token from the end and price the 3rd. Returns
/// `None` when there is no identifier line or it is too short.
pub fn reconstruct_from_identifier<S: AsRef<str>>(
    lines: &[S],
    separator: DecimalSeparator,
) -> Option<Reconstructed> {
    let line = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| IDENTIFIER.is_match(line))?;

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        debug!("Identifier line too short to reconstruct: {:?}", line);
        return None;
    }

    let n = tokens.len();
    let reconstructed = Reconstructed {
        quantity: normalize(tokens[n - 4], separator),
        price: normalize(tokens[n - 3], separator),
    };
    debug!("Reconstructed from identifier line: {:?}", reconstructed);
    Some(reconstructed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUANTITY_LABELS: [&str; 3] = ["Antall kjøpt", "Antall solgt", "Antall"];

    #[test]
    fn test_amount_fallback_picks_largest() {
        let lines = ["random 12.34", "total 1.234,56", "other 99,00"];
        assert_eq!(amount_fallback(&lines), "1.234,56");
    }

    #[test]
    fn test_amount_fallback_ignores_dates_and_plain_numbers() {
        let lines = ["Handelsdato 01.03.2024", "Antall 100", "Beløp 250,00"];
        assert_eq!(amount_fallback(&lines), "250,00");
    }

    #[test]
    fn test_amount_fallback_ties_keep_first() {
        let lines = ["a 1.000,00", "b 1,000.00"];
        assert_eq!(amount_fallback(&lines), "1.000,00");
    }

    #[test]
    fn test_amount_fallback_empty() {
        assert_eq!(amount_fallback(&["no amounts", "12"]), "");
    }

    #[test]
    fn test_quantity_prefers_labels() {
        let lines = ["Ordre 55", "Antall solgt 1 200", "Antall kjøpt 300"];
        assert_eq!(quantity_fallback(&lines, &QUANTITY_LABELS), "300");
    }

    #[test]
    fn test_quantity_positional_skips_date_lines() {
        let lines = ["Handelsdato 01.03.2024 ref 77", "Verdipapir EQNR 1 500 stk"];
        assert_eq!(quantity_fallback(&lines, &QUANTITY_LABELS), "1 500");
    }

    #[test]
    fn test_quantity_fallback_empty() {
        let lines = ["Handelsdato 01.03.2024", "ingen tall"];
        assert_eq!(quantity_fallback(&lines, &QUANTITY_LABELS), "");
    }

    #[test]
    fn test_reconstruct_from_identifier() {
        let lines = [
            "Kjøp av aksjer",
            "NO0010096985 EQNR 150 250,00 37.500,00 NOK",
        ];
        let found = reconstruct_from_identifier(&lines, DecimalSeparator::Comma).unwrap();
        assert_eq!(found.quantity, "150.0");
        assert_eq!(found.price, "250.0");
    }

    #[test]
    fn test_reconstruct_short_line() {
        let lines = ["NO0010096985 EQNR 150"];
        assert_eq!(reconstruct_from_identifier(&lines, DecimalSeparator::Comma), None);
        assert_eq!(reconstruct_from_identifier(&["no id"], DecimalSeparator::Comma), None);
    }
}
