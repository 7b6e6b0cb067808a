use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Snapshot encodings the CLI reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    /// Piped text has no extension; a JSON document opens with a brace.
    fn sniff(contents: &str) -> Self {
        if contents.starts_with('{') {
            Format::Json
        } else {
            Format::Yaml
        }
    }
}

/// Read a snapshot file, choosing YAML or JSON by extension.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let source = format!("'{}'", canonical.display());
    parse_contents(&source, Format::from_path(&canonical), &contents)
}

/// Read a piped snapshot from stdin, as JSON or YAML.
/// Returns None if stdin is a TTY (interactive) or the pipe is empty.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(
    buffer: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_contents("stdin", Format::sniff(trimmed), trimmed).map(Some)
}

fn parse_contents<T: DeserializeOwned>(
    source: &str,
    format: Format,
    contents: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        Format::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse {} as YAML: {}", source, e))?,
        Format::Json => serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse {} as JSON: {}", source, e))?,
    };
    Ok(value)
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashflow_core::FinancialData;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_reads_json_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"currentAssets": {"prev": {"cash": 1000}, "current": {"cash": "1200.50"}}}"#,
        )
        .unwrap();

        let data: FinancialData = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(data.current_assets.prev.cash, Some(dec!(1000)));
        assert_eq!(data.current_assets.current.cash, Some(dec!(1200.50)));
        assert_eq!(data.current_assets.prev.receivables, None);
    }

    #[test]
    fn test_reads_yaml_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.yaml");
        fs::write(
            &path,
            "incomeStatement:\n  netIncome: 280\n  pretaxIncome: 400\n\
             appropriation:\n  dividends: 40\n",
        )
        .unwrap();

        let data: FinancialData = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(data.income_statement.net_income, Some(dec!(280)));
        assert_eq!(data.income_statement.pretax_income, Some(dec!(400)));
        assert_eq!(data.appropriation.dividends, Some(dec!(40)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = read_input::<FinancialData>(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_input::<FinancialData>(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_piped_json_and_yaml_snapshots() {
        let piped = "  {\"equity\": {\"prev\": {\"capitalStock\": 500}}}\n";
        let data: FinancialData = parse_piped(piped).unwrap().unwrap();
        assert_eq!(data.equity.prev.capital_stock, Some(dec!(500)));

        let piped = "appropriation:\n  executiveBonuses: \"12.5\"\n";
        let data: FinancialData = parse_piped(piped).unwrap().unwrap();
        assert_eq!(data.appropriation.executive_bonuses, Some(dec!(12.5)));
    }

    #[test]
    fn test_empty_pipe_is_none() {
        assert!(parse_piped::<FinancialData>(" \n\t").unwrap().is_none());
    }

    #[test]
    fn test_piped_oversized_amount_is_rejected() {
        let err = parse_piped::<FinancialData>(
            "{\"currentAssets\": {\"prev\": {\"cash\": \"79228162514264337593543950335\"}}}",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin as JSON"), "{err}");
    }
}
