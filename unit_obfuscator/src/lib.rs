pub mod aliases;
pub mod config;
pub mod errors;
pub mod logger;
pub mod metrics;
pub mod obfuscator;
pub mod parse;

pub use aliases::{AliasTable, DefaultAlias, UnitAlias, ALIASES};
pub use errors::ObfuscationError;
pub use obfuscator::{obfuscate, Matching, Obfuscation, Obfuscator, ObfuscatorOptions, OutputFormat, StreamSummary};
pub use parse::{AmountPolicy, ParsedInput};
