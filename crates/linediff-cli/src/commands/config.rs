//! Config command
//!
//! Usage: linediff config [--output <FILE>]

use clap::Args;
use linediff_core::{DiffConfig, ExError, ExErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = toml::to_string_pretty(&DiffConfig::default()).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("print_config")
            .with_message(e.to_string())
    })?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, text)?;
        println!("✓ Wrote default configuration to {}", output_path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

/// Load a TOML configuration file; missing fields take their defaults.
pub fn load(path: &Path) -> Result<DiffConfig, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_config")
            .with_message(format!("{}: {}", path.display(), e))
    })?;

    toml::from_str(&text).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("load_config")
            .with_message(format!("{}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_survives_toml() {
        let text = toml::to_string_pretty(&DiffConfig::default()).unwrap();
        let parsed: DiffConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, DiffConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: DiffConfig = toml::from_str("context_radius = 1\n").unwrap();
        assert_eq!(parsed, DiffConfig::default().with_context_radius(1));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<DiffConfig>("radius = 1\n").is_err());
    }
}
