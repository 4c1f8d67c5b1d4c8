use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::aliases::{AliasTable, ALIASES};
use crate::errors::ObfuscationError;
use crate::parse::{format_amount, parse_input, AmountPolicy};

/// How unit aliases locate the unit inside the numerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Matching {
    /// Replace the first textual occurrence of the unit name anywhere in the
    /// numerator text. `"kilometer"` becomes `"kilofurlong"`.
    #[default]
    Substring,
    /// Treat the numerator as a list of terms and only replace a term that
    /// equals the unit name.
    ExactTerm,
}

impl FromStr for Matching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(Self::Substring),
            "exact-term" => Ok(Self::ExactTerm),
            other => Err(format!("unknown matching mode '{}'", other)),
        }
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::ExactTerm => write!(f, "exact-term"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObfuscatorOptions {
    pub matching: Matching,
    pub amounts: AmountPolicy,
}

/// Result of one obfuscation. `Display` gives `"<amount> <numerator> per <denominator>"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obfuscation {
    pub amount: f64,
    pub numerator: String,
    pub denominator: String,
    /// Units whose alias was applied, in table order.
    pub applied: Vec<&'static str>,
}

impl Obfuscation {
    /// True when the amount is NaN or the input unit passed through unaliased.
    pub fn is_degraded(&self) -> bool {
        self.amount.is_nan() || self.applied.is_empty()
    }

    /// Renders one output line for `input` in the requested format.
    pub fn to_record(&self, input: &str, format: OutputFormat) -> Result<String, ObfuscationError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(&JsonRecord {
                input,
                output: self.to_string(),
                obfuscation: self,
            })?),
        }
    }
}

impl fmt::Display for Obfuscation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} per {}",
            format_amount(self.amount),
            self.numerator,
            self.denominator
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub lines: usize,
    pub obfuscated: usize,
    pub degraded: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    input: &'a str,
    output: String,
    #[serde(flatten)]
    obfuscation: &'a Obfuscation,
}

#[derive(Serialize)]
struct JsonRejection<'a> {
    input: &'a str,
    error: String,
}

pub struct Obfuscator {
    table: &'static AliasTable,
    options: ObfuscatorOptions,
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self::new(ObfuscatorOptions::default())
    }
}

impl Obfuscator {
    pub fn new(options: ObfuscatorOptions) -> Self {
        Self::with_table(&ALIASES, options)
    }

    pub fn with_table(table: &'static AliasTable, options: ObfuscatorOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> ObfuscatorOptions {
        self.options
    }

    pub fn obfuscate(&self, input: &str) -> Result<Obfuscation, ObfuscationError> {
        let parsed = parse_input(input, self.options.amounts)?;
        let mut amount = parsed.amount;

        // Default aliases go first so the input unit ends up last in the numerator.
        let mut terms: Vec<&str> = Vec::with_capacity(self.table.defaults().len() + 1);
        let mut bottom: Vec<&str> = Vec::with_capacity(self.table.defaults().len());
        for alias in self.table.defaults() {
            terms.push(alias.numerator);
            bottom.push(alias.denominator);
            amount *= alias.multiplier;
        }
        terms.push(&parsed.unit);

        let mut applied = Vec::new();
        let numerator = match self.options.matching {
            Matching::Substring => {
                let mut text = terms.join(" ");
                for alias in self.table.units() {
                    if text.contains(alias.unit) {
                        text = text.replacen(alias.unit, alias.replacement, 1);
                        amount *= alias.multiplier;
                        applied.push(alias.unit);
                        debug!(unit = alias.unit, replacement = alias.replacement, "applied unit alias");
                    }
                }
                text
            }
            Matching::ExactTerm => {
                for alias in self.table.units() {
                    if let Some(term) = terms.iter_mut().find(|term| **term == alias.unit) {
                        *term = alias.replacement;
                        amount *= alias.multiplier;
                        applied.push(alias.unit);
                        debug!(unit = alias.unit, replacement = alias.replacement, "applied unit alias");
                    }
                }
                terms.join(" ")
            }
        };

        Ok(Obfuscation {
            amount,
            numerator,
            denominator: bottom.join(" "),
            applied,
        })
    }

    /// Obfuscates every line of `reader` into `writer`. Lines that cannot be
    /// obfuscated are logged and written back unchanged.
    pub async fn obfuscate_stream<R, W>(
        &self,
        reader: R,
        mut writer: W,
        format: OutputFormat,
    ) -> Result<StreamSummary, ObfuscationError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = StreamSummary::default();
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            summary.lines += 1;
            if line.trim().is_empty() {
                if format == OutputFormat::Text {
                    writer.write_all(line.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                }
                continue;
            }

            let rendered = match self.obfuscate(&line) {
                Ok(obfuscation) => {
                    summary.obfuscated += 1;
                    if obfuscation.is_degraded() {
                        summary.degraded += 1;
                    }
                    obfuscation.to_record(&line, format)?
                }
                Err(err) => {
                    warn!(line = %line, error = %err, "leaving line unchanged");
                    summary.rejected += 1;
                    match format {
                        OutputFormat::Text => line.clone(),
                        OutputFormat::Json => serde_json::to_string(&JsonRejection {
                            input: &line,
                            error: err.to_string(),
                        })?,
                    }
                }
            };
            writer.write_all(rendered.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
        Ok(summary)
    }
}

/// Obfuscates `input` with the default options.
pub fn obfuscate(input: &str) -> Result<String, ObfuscationError> {
    Obfuscator::default().obfuscate(input).map(|o| o.to_string())
}
