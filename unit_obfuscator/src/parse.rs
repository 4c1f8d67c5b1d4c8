use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ObfuscationError;

static LEADING_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").unwrap());
static WHOLE_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// How a non-numeric amount prefix is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountPolicy {
    /// Lenient integer read; an unreadable amount becomes NaN and flows into the output.
    #[default]
    Propagate,
    /// Strict base-10 parse of the first token; failures are reported as errors.
    Reject,
}

impl FromStr for AmountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "propagate" => Ok(Self::Propagate),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown amount policy '{}'", other)),
        }
    }
}

impl fmt::Display for AmountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => write!(f, "propagate"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub amount: f64,
    pub unit: String,
}

/// Strips one trailing `s` or `S`. Irregular plurals are not handled.
pub fn depluralize(input: &str) -> &str {
    match input.char_indices().last() {
        Some((idx, c)) if c.eq_ignore_ascii_case(&'s') => &input[..idx],
        _ => input,
    }
}

pub fn parse_input(input: &str, policy: AmountPolicy) -> Result<ParsedInput, ObfuscationError> {
    if input.chars().count() < 2 {
        return Err(ObfuscationError::InvalidInput(input.to_string()));
    }
    let text = depluralize(input);

    match policy {
        AmountPolicy::Propagate => Ok(parse_lenient(text)),
        AmountPolicy::Reject => parse_strict(text),
    }
}

fn parse_lenient(text: &str) -> ParsedInput {
    let token = text.split(' ').next().unwrap_or_default();
    let amount = LEADING_INTEGER
        .captures(token)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(f64::NAN);

    // The unit starts after the rendered amount plus one separator, not after the token.
    let skip = format_amount(amount).chars().count() + 1;
    let unit = match text.char_indices().nth(skip) {
        Some((idx, _)) => text[idx..].to_string(),
        None => String::new(),
    };

    ParsedInput { amount, unit }
}

fn parse_strict(text: &str) -> Result<ParsedInput, ObfuscationError> {
    let (token, unit) = text
        .split_once(' ')
        .ok_or_else(|| ObfuscationError::InvalidInput(text.to_string()))?;
    if !WHOLE_INTEGER.is_match(token) {
        return Err(ObfuscationError::NonNumericAmount(token.to_string()));
    }
    // Integers beyond i64 round to the nearest f64.
    let amount = token
        .parse::<f64>()
        .map_err(|_| ObfuscationError::NonNumericAmount(token.to_string()))?;

    Ok(ParsedInput { amount, unit: unit.to_string() })
}

/// Shortest round-trip rendering; exponent form outside `[1e-6, 1e21)`.
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0".to_string();
    }

    let magnitude = amount.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return amount.to_string();
    }

    let exp = format!("{:e}", amount);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}
