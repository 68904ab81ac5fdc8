//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    println!("{}", render_dump(config, path)?);
    Ok(())
}

/// Formats `config` as TOML under a header naming the file it came from.
pub fn render_dump(config: &ClientConfig, path: &Path) -> ClientResult<String> {
    let toml_str = config.to_toml()?;
    Ok(format!("# config.toml ({})\n{}", path.display(), toml_str))
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate()?;
    let range = config.allowed_range()?;
    println!(
        "Configuration is valid: timestamps from {} to {}, at most {} occurrences per expansion.",
        range.min.to_rfc3339(),
        range.max.to_rfc3339(),
        config.expansion.max_occurrences
    );
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_header_names_file_in_use() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("team.toml");
        let out = render_dump(&ClientConfig::default(), &custom).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(header, format!("# config.toml ({})", custom.display()));
        assert!(out.contains("max_occurrences = 10000"));
    }
}
