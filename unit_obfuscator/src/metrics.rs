use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::obfuscator::StreamSummary;

pub struct Metrics {
    pub obfuscations: IntCounter,
    pub degraded: IntCounter,
    pub rejected: IntCounter,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let obfuscations = IntCounter::new("unit_obfuscations_total", "Number of obfuscated inputs")?;
        let degraded = IntCounter::new(
            "unit_obfuscations_degraded_total",
            "Obfuscations with a NaN amount or an unaliased unit",
        )?;
        let rejected = IntCounter::new("unit_obfuscations_rejected_total", "Inputs that could not be obfuscated")?;
        registry.register(Box::new(obfuscations.clone()))?;
        registry.register(Box::new(degraded.clone()))?;
        registry.register(Box::new(rejected.clone()))?;
        Ok(Self { obfuscations, degraded, rejected })
    }

    pub fn record(&self, summary: &StreamSummary) {
        self.obfuscations.inc_by(summary.obfuscated as u64);
        self.degraded.inc_by(summary.degraded as u64);
        self.rejected.inc_by(summary.rejected as u64);
    }
}

/// Text exposition of everything in `registry`.
pub fn render(registry: &Registry) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
