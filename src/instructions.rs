/// Split a block of instruction text into steps, one per sentence.
///
/// Sentences are separated by `.`; each piece is trimmed and empty pieces are
/// dropped. Abbreviations and decimal numbers are split like any other period.
pub fn format_instructions(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}
