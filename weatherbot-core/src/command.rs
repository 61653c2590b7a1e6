//! Tokenizing and interpreting the `!weather` command line.
//!
//! `tokenize` splits a whitespace-normalized message into its command word,
//! flags and arguments; `interpret` turns those into a [`ParsedRequest`].
//! Both are total: any input yields a well-formed value.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ParsedRequest, RawCommand, Units};

/// Split a normalized message into command, flags and arguments.
///
/// The first word is the command. Every remaining word containing `--` is a
/// flag, kept with its original text; everything else is an argument.
/// Relative order is preserved within each class. Callers are expected to
/// pass flags of the shape `--<identifier>`; classification only checks for
/// the `--` substring.
pub fn tokenize(input: &str) -> RawCommand {
    let mut words = input.split(' ');
    let command = words.next().unwrap_or_default().to_string();

    let (flags, arguments) = words
        .map(str::to_string)
        .partition(|word| word.contains("--"));

    RawCommand { command, flags, arguments }
}

/// `--<digits>` with nothing else around it.
fn offset_flag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^--(\d+)$").expect("valid regex literal"))
}

fn parse_offset_flag(flag: &str) -> Option<u64> {
    let captures = offset_flag_regex().captures(flag)?;
    // Digit runs too long for u64 saturate; they fail the rendering bound
    // either way.
    Some(captures[1].parse().unwrap_or(u64::MAX))
}

/// Interpret tokenized flags and arguments as a structured request.
///
/// Flag recognition consumes at most one unit flag (`--imperial` wins over
/// `--metric`) and at most one `--<digits>` offset flag, scanning in the
/// flags' original order. Everything left over, including a losing or
/// duplicate unit flag, lands in `detail_fields` unchanged.
pub fn interpret(raw: &RawCommand) -> ParsedRequest {
    let task = raw.arguments.first().cloned();

    let location = match task.as_deref() {
        Some("forecast") => Some(raw.arguments[1..].join(" ")),
        _ => None,
    };

    let (units, unit_index) = match raw.flags.iter().position(|f| f == "--imperial") {
        Some(i) => (Units::Imperial, Some(i)),
        None => match raw.flags.iter().position(|f| f == "--metric") {
            Some(i) => (Units::Metric, Some(i)),
            None => (Units::Metric, None),
        },
    };

    let offset_match = raw
        .flags
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != unit_index)
        .find_map(|(i, flag)| parse_offset_flag(flag).map(|offset| (i, offset)));
    let offset_index = offset_match.map(|(i, _)| i);

    let detail_fields = raw
        .flags
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != unit_index && Some(*i) != offset_index)
        .map(|(_, flag)| flag.clone())
        .collect();

    ParsedRequest {
        task,
        location,
        units,
        forecast_offset: offset_match.map(|(_, offset)| offset),
        detail_fields,
    }
}
