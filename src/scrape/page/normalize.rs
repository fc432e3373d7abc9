use html_escape::decode_html_entities;

pub(crate) fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities (&amp;amp;)
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join step texts into one block that splits back into the same steps on `.`.
///
/// Steps ending in `!` or `?` still get a `.`, since only `.` separates steps.
pub(crate) fn join_steps(steps: impl IntoIterator<Item = String>) -> String {
    steps
        .into_iter()
        .map(|step| clean_text(&step))
        .filter(|step| !step.is_empty())
        .map(|step| {
            if step.ends_with('.') {
                step
            } else {
                format!("{step}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a recipe duration into whole minutes.
///
/// Accepts ISO 8601 durations (`PT1H30M`, `P1DT2H`, `PT5400.0S`, ranges like
/// `PT15-20M` use the upper bound), bare numbers of minutes, and plain text
/// such as `1 hour 30 mins`.
pub(crate) fn parse_minutes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(minutes) = raw.parse::<f64>() {
        return to_minutes(minutes);
    }
    if raw.starts_with(['P', 'p']) {
        if let Some(minutes) = parse_iso_duration(&raw[1..]) {
            return Some(minutes);
        }
    }
    parse_text_duration(raw)
}

/// Prep plus cook time, or `None` when neither is known or the sum overflows.
pub(crate) fn sum_minutes(prep: Option<u32>, cook: Option<u32>) -> Option<u32> {
    match (prep, cook) {
        (None, None) => None,
        (prep, cook) => prep.unwrap_or(0).checked_add(cook.unwrap_or(0)),
    }
}

fn to_minutes(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value.round() as u32)
    } else {
        None
    }
}

fn parse_iso_duration(body: &str) -> Option<u32> {
    let mut total = 0.0;
    let mut number = String::new();
    let mut in_time = false;
    let mut matched = false;

    for c in body.chars() {
        match c.to_ascii_uppercase() {
            'T' => in_time = true,
            '0'..='9' | '.' | ',' => number.push(if c == ',' { '.' } else { c }),
            // ranges keep the upper bound
            '-' => number.clear(),
            unit => {
                let value: f64 = number.parse().ok()?;
                number.clear();
                let minutes = match unit {
                    'W' => value * 7.0 * 24.0 * 60.0,
                    'D' => value * 24.0 * 60.0,
                    'H' if in_time => value * 60.0,
                    'M' if in_time => value,
                    'S' if in_time => value / 60.0,
                    // years and months carry no meaning for cooking times
                    'Y' | 'M' => 0.0,
                    _ => return None,
                };
                total += minutes;
                matched = true;
            }
        }
    }

    if matched && number.is_empty() {
        to_minutes(total)
    } else {
        None
    }
}

fn parse_text_duration(raw: &str) -> Option<u32> {
    let lowered = raw.to_lowercase();
    let mut total = 0.0;
    let mut pending: Option<f64> = None;
    let mut matched = false;

    let tokens = lowered
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    for token in tokens {
        let digits_end = token
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(token.len());
        let (number, unit) = token.split_at(digits_end);

        if !number.is_empty() {
            pending = number.parse().ok();
        }
        if unit.is_empty() {
            continue;
        }
        let Some(value) = pending.take() else {
            continue;
        };
        if unit.starts_with('h') {
            total += value * 60.0;
            matched = true;
        } else if unit.starts_with("min") || unit == "m" {
            total += value;
            matched = true;
        } else if unit.starts_with('d') {
            total += value * 24.0 * 60.0;
            matched = true;
        }
    }

    if matched {
        to_minutes(total)
    } else {
        None
    }
}

/// Normalize a yield: a bare count becomes `"<n> servings"`, anything else is
/// kept as written.
pub(crate) fn normalize_yields(raw: &str) -> String {
    let cleaned = clean_text(raw);
    match cleaned.parse::<u32>() {
        Ok(1) => "1 serving".to_string(),
        Ok(n) => format!("{n} servings"),
        Err(_) => cleaned,
    }
}
