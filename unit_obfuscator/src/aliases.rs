//! Static table of historical unit aliases.
//!
//! Multipliers follow the rule `1 unit = multiplier replacement`, so applying
//! an alias multiplies the running amount by its multiplier.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Alias applied to every obfuscation, regardless of the input unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultAlias {
    /// Term appended to the numerator.
    pub numerator: &'static str,
    /// Reference unit appended to the denominator.
    pub denominator: &'static str,
    pub multiplier: f64,
}

/// Alias replacing one standard unit with an uncommon one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAlias {
    pub unit: &'static str,
    pub replacement: &'static str,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasTable {
    defaults: Vec<DefaultAlias>,
    units: Vec<UnitAlias>,
}

/// Process-wide alias table, built once on first use.
pub static ALIASES: Lazy<AliasTable> = Lazy::new(AliasTable::standard);

impl AliasTable {
    pub fn standard() -> Self {
        let defaults = vec![
            // UK wine cask capacities
            DefaultAlias {
                numerator: "square hogshead",
                denominator: "US butt rundlet",
                multiplier: 1.0 / (3.5 * 0.5),
            },
            // One firkin is the mass of an ale firkin of water; a siliqua is 1/144 of a Roman ounce
            DefaultAlias {
                numerator: "firkin",
                denominator: "siliqua",
                multiplier: 40823.3133 / (1.0 / 0.19),
            },
        ];

        let units = vec![
            // Volume: UK and US wine cask
            UnitAlias { unit: "liter", replacement: "puncheon", multiplier: 0.003145 },
            // Distance: length of the furrow in one acre of ploughed field
            UnitAlias { unit: "meter", replacement: "furlong", multiplier: 0.004971 },
            // Mass: Ottoman general usage
            UnitAlias { unit: "gram", replacement: "scrupulum", multiplier: 1.14 },
        ];

        Self { defaults, units }
    }

    pub fn defaults(&self) -> &[DefaultAlias] {
        &self.defaults
    }

    /// Unit aliases in table order.
    pub fn units(&self) -> &[UnitAlias] {
        &self.units
    }

    pub fn lookup(&self, unit: &str) -> Option<&UnitAlias> {
        self.units.iter().find(|alias| alias.unit == unit)
    }

    /// Product of every default multiplier, folded in table order.
    pub fn default_multiplier(&self) -> f64 {
        self.defaults.iter().fold(1.0, |acc, alias| acc * alias.multiplier)
    }
}
