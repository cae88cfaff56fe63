//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::core::{Ruleset, Variant};
use crate::input::handler::DEFAULT_TAP_INTERVAL_MS;

/// Upper bound for the tap gate; anything longer makes the game unplayable.
pub const MAX_TAP_INTERVAL_MS: u32 = 1_000;

#[derive(Debug, Parser)]
#[command(
    name = "stack-slide",
    version,
    about = "Stack sliding blocks into a tower, in your terminal"
)]
pub struct Cli {
    /// Rule preset: stack-slide, classic, precision or zen.
    #[arg(long, env = "STACK_SLIDE_RULES", default_value = "stack-slide")]
    pub rules: String,

    /// RNG seed. Defaults to one derived from the clock.
    #[arg(long, env = "STACK_SLIDE_SEED")]
    pub seed: Option<u32>,

    /// Do not ring the terminal bell on audio cues.
    #[arg(long, env = "STACK_SLIDE_MUTE", value_parser = BoolishValueParser::new())]
    pub mute: bool,

    /// Append logs to this file (logging is off without it).
    #[arg(long, env = "STACK_SLIDE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Taps closer together than this are treated as key auto-repeat.
    #[arg(long, default_value_t = DEFAULT_TAP_INTERVAL_MS)]
    pub tap_interval_ms: u32,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub variant: Variant,
    pub rules: Ruleset,
    pub seed: u32,
    pub mute: bool,
    pub log_file: Option<PathBuf>,
    pub tap_interval_ms: u32,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let variant = Variant::from_str(&self.rules).ok_or_else(|| {
            anyhow!(
                "unknown rules {:?}; expected one of: {}",
                self.rules,
                variant_names()
            )
        })?;
        let rules = variant.ruleset();
        rules
            .validate()
            .with_context(|| format!("invalid `{}` rules", variant.as_str()))?;

        if self.tap_interval_ms > MAX_TAP_INTERVAL_MS {
            bail!(
                "tap interval {}ms exceeds the {}ms maximum",
                self.tap_interval_ms,
                MAX_TAP_INTERVAL_MS
            );
        }

        Ok(Config {
            variant,
            rules,
            seed: self.seed.unwrap_or_else(clock_seed),
            mute: self.mute,
            log_file: self.log_file,
            tap_interval_ms: self.tap_interval_ms,
        })
    }
}

fn variant_names() -> String {
    Variant::ALL
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Seed from the wall clock; only used when no seed was given.
fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stack-slide").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn variant_names_lists_every_preset() {
        let names = variant_names();
        for v in Variant::ALL {
            assert!(names.contains(v.as_str()));
        }
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = parse(&["--seed", "42"]).into_config().unwrap();
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn rules_name_is_case_insensitive() {
        let config = parse(&["--rules", "PRECISION"]).into_config().unwrap();
        assert_eq!(config.variant, Variant::Precision);
        assert_eq!(config.rules, Variant::Precision.ruleset());
    }
}
