use crate::domain::model::{ScanCatalog, ScanKind};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, ShieldError};
use crate::utils::validation::validate_non_empty_string;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Rule catalogue compiled into the binary.
const BUNDLED_RULES: &str = include_str!("../../data/scan_rules.toml");

/// Parse a TOML catalogue, after `${VAR}` environment substitution, and
/// validate it.
pub fn parse_catalog(content: &str) -> Result<ScanCatalog> {
    let processed = substitute_env_vars(content);

    let catalog: ScanCatalog =
        toml::from_str(&processed).map_err(|e| ShieldError::CatalogParseError {
            message: format!("TOML parsing error: {}", e),
        })?;

    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Replace `${VAR_NAME}` placeholders with environment values; unknown
/// variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

/// Every scan type must have at least one rule, and every rule at least one
/// non-empty pattern. A catalogue failing this never reaches the matcher.
pub fn validate_catalog(catalog: &ScanCatalog) -> Result<()> {
    for kind in [ScanKind::Call, ScanKind::Sms, ScanKind::Link, ScanKind::Qr] {
        let set = catalog.rule_set(kind);
        if set.rules.is_empty() {
            return Err(ShieldError::EmptyCatalog {
                kind: kind.as_str().to_string(),
            });
        }

        for (i, rule) in set.rules.iter().enumerate() {
            let field = format!("{}.rules[{}]", kind, i);
            if rule.patterns.is_empty() {
                return Err(ShieldError::InvalidConfigValueError {
                    field: format!("{}.patterns", field),
                    value: String::new(),
                    reason: "Rule must have at least one pattern".to_string(),
                });
            }
            for pattern in &rule.patterns {
                validate_non_empty_string(&format!("{}.patterns", field), pattern)?;
            }
            validate_non_empty_string(&format!("{}.category", field), &rule.category)?;
        }
    }
    Ok(())
}

/// Serves the catalogue shipped with the binary.
#[derive(Debug, Clone, Default)]
pub struct BundledCatalog;

#[async_trait]
impl CatalogProvider for BundledCatalog {
    async fn load(&self) -> Result<ScanCatalog> {
        parse_catalog(BUNDLED_RULES)
    }
}

/// Loads the catalogue from an operator-supplied TOML file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogProvider for FileCatalog {
    async fn load(&self) -> Result<ScanCatalog> {
        tracing::debug!("Loading rule catalogue from {}", self.path.display());
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ShieldError::CatalogUnavailable {
                origin: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        parse_catalog(&content)
    }
}

/// Wraps an already-built catalogue; the substitution point for tests.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: ScanCatalog,
}

impl StaticCatalog {
    pub fn new(catalog: ScanCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<ScanCatalog> {
        validate_catalog(&self.catalog)?;
        Ok(self.catalog.clone())
    }
}

#[async_trait]
impl CatalogProvider for Box<dyn CatalogProvider> {
    async fn load(&self) -> Result<ScanCatalog> {
        (**self).load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bundled_catalogue_parses_and_validates() {
        let catalog = BundledCatalog.load().await.unwrap();
        assert!(!catalog.call.rules.is_empty());
        assert!(!catalog.sms.rules.is_empty());
        assert!(!catalog.link.rules.is_empty());
        assert!(!catalog.qr.rules.is_empty());
    }

    #[test]
    fn catalogue_missing_a_section_fails_to_parse() {
        let content = r#"
[call.default]
category = "legitimate"
reason = "ok"
recommendation = "ok"

[[call.rules]]
patterns = ["+92"]
risk_level = "high"
category = "spoof"
reason = "r"
recommendation = "r"
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(ShieldError::CatalogParseError { .. })
        ));
    }

    #[test]
    fn empty_rule_list_is_rejected_at_load_time() {
        let content = r#"
[call.default]
category = "legitimate"
reason = "ok"
recommendation = "ok"

[[call.rules]]
patterns = ["+92"]
risk_level = "high"
category = "spoof"
reason = "r"
recommendation = "r"

[sms.default]
category = "legitimate"
reason = "ok"
recommendation = "ok"

[link.default]
category = "safe"
reason = "ok"
recommendation = "ok"

[[link.rules]]
patterns = ["bit.ly"]
risk_level = "medium"
category = "shortener"
reason = "r"
recommendation = "r"

[qr.default]
category = "safe"
reason = "ok"
recommendation = "ok"

[[qr.rules]]
patterns = ["refund"]
risk_level = "high"
category = "fake_refund"
reason = "r"
recommendation = "r"
"#;
        let err = parse_catalog(content).unwrap_err();
        assert!(matches!(err, ShieldError::EmptyCatalog { ref kind } if kind == "sms"));
    }

    #[test]
    fn env_var_substitution_fills_known_variables() {
        std::env::set_var("FRAUDSHIELD_TEST_PATTERN", "tinyurl");
        let content = "prefix ${FRAUDSHIELD_TEST_PATTERN} ${UNSET_VARIABLE_XYZ}";
        let result = substitute_env_vars(content);
        assert_eq!(result, "prefix tinyurl ${UNSET_VARIABLE_XYZ}");
        std::env::remove_var("FRAUDSHIELD_TEST_PATTERN");
    }

    #[test]
    fn blank_pattern_is_rejected() {
        let mut catalog = tokio_test::block_on(BundledCatalog.load()).unwrap();
        catalog.qr.rules[0].patterns = vec!["  ".to_string()];
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(matches!(err, ShieldError::InvalidConfigValueError { .. }));
    }
}
