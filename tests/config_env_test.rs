//! Environment fallbacks, kept in their own binary so the variables do not
//! leak into other tests.

use clap::Parser;

use stack_slide::config::Cli;
use stack_slide::core::Variant;

#[test]
fn environment_fills_in_missing_flags() {
    std::env::set_var("STACK_SLIDE_RULES", "Precision");
    std::env::set_var("STACK_SLIDE_SEED", "77");
    std::env::set_var("STACK_SLIDE_MUTE", "yes");

    let config = Cli::try_parse_from(["stack-slide"])
        .unwrap()
        .into_config()
        .unwrap();
    assert_eq!(config.variant, Variant::Precision);
    assert_eq!(config.seed, 77);
    assert!(config.mute);

    // Flags win over the environment.
    let config = Cli::try_parse_from(["stack-slide", "--rules", "classic", "--seed", "1"])
        .unwrap()
        .into_config()
        .unwrap();
    assert_eq!(config.variant, Variant::Classic);
    assert_eq!(config.seed, 1);
}
