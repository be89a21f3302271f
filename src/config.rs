use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_DIR_ENV: &str = "INBOX_CONFIG_DIR";
pub const DEFAULT_PARTNER: &str = "partnerA";

/// Partners offered in the header switcher: (id, display name).
pub const PARTNERS: &[(&str, &str)] = &[("partnerA", "Partner A"), ("partnerB", "Partner B")];

/// UI feature switches. The inbox core never reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub email_preview_snippet: bool,
    pub mark_as_spam_button: bool,
    pub bulk_actions_toolbar: bool,
    pub search_filter: bool,
    pub reply_functionality: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            email_preview_snippet: true,
            mark_as_spam_button: true,
            bulk_actions_toolbar: true,
            search_filter: true,
            reply_functionality: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerConfig {
    pub partner_id: String,
    pub partner_name: String,
    pub partner_type: String,
    pub theme_id: String,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerType {
    pub type_id: String,
    pub type_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerTypesRegistry {
    pub partner_types: Vec<PartnerType>,
}

impl PartnerTypesRegistry {
    pub fn is_valid(&self, partner_type: &str) -> bool {
        self.partner_types.iter().any(|t| t.type_id == partner_type)
    }

    pub fn type_ids(&self) -> Vec<&str> {
        self.partner_types.iter().map(|t| t.type_id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub xl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: FontSizes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub logo_color: String,
    pub logo_font_size: String,
    pub logo_font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub theme_id: String,
    pub theme_name: String,
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub branding: Branding,
}

/// Layout of the config directory:
/// `partner-types.json`, `partners/<id>.json`, `themes/<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$INBOX_CONFIG_DIR`, or `./config`.
    pub fn from_env() -> Self {
        let root = std::env::var_os(CONFIG_DIR_ENV).map_or_else(|| PathBuf::from("config"), PathBuf::from);
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> PathBuf {
        self.root.join("partner-types.json")
    }

    pub fn partner(&self, partner_id: &str) -> Result<PathBuf, AppError> {
        Ok(self.root.join("partners").join(format!("{}.json", checked_name(partner_id)?)))
    }

    pub fn theme(&self, theme_id: &str) -> Result<PathBuf, AppError> {
        Ok(self.root.join("themes").join(format!("{}.json", checked_name(theme_id)?)))
    }
}

fn checked_name(name: &str) -> Result<&str, AppError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(name)
    } else {
        Err(AppError::Config(format!("invalid config name {name:?}")))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn load_registry(paths: &ConfigPaths) -> Result<PartnerTypesRegistry, AppError> {
    read_json(&paths.registry()).await
}

/// Reads a partner config. An unregistered partner type is logged, not rejected.
pub async fn load_partner_config(
    paths: &ConfigPaths,
    partner_id: &str,
) -> Result<PartnerConfig, AppError> {
    let partner_path = paths.partner(partner_id)?;
    let (config, registry) = futures::try_join!(
        read_json::<PartnerConfig>(&partner_path),
        load_registry(paths)
    )?;

    if !registry.is_valid(&config.partner_type) {
        warn!(
            "Invalid partner type \"{}\" for partner \"{}\". Valid types: {}",
            config.partner_type,
            partner_id,
            registry.type_ids().join(", ")
        );
    }
    Ok(config)
}

pub async fn load_theme(paths: &ConfigPaths, theme_id: &str) -> Result<ThemeConfig, AppError> {
    read_json(&paths.theme(theme_id)?).await
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (tempfile::TempDir, ConfigPaths) {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_tree(dir.path());
        let paths = ConfigPaths::new(dir.path());
        (dir, paths)
    }

    #[test]
    fn test_feature_flags_default_to_enabled() {
        let flags = FeatureFlags::default();
        assert!(flags.email_preview_snippet);
        assert!(flags.mark_as_spam_button);
        assert!(flags.bulk_actions_toolbar);
        assert!(flags.search_filter);
        assert!(flags.reply_functionality);
    }

    #[test]
    fn test_registry_lookup() {
        let registry: PartnerTypesRegistry = serde_json::from_str(fixtures::REGISTRY).unwrap();
        assert!(registry.is_valid("consumer"));
        assert!(!registry.is_valid("startup"));
        assert_eq!(registry.type_ids(), vec!["enterprise", "consumer"]);
    }

    #[test]
    fn test_config_paths_reject_traversal() {
        let paths = ConfigPaths::new("/etc/inbox");
        assert_eq!(
            paths.partner("partnerA").unwrap(),
            PathBuf::from("/etc/inbox/partners/partnerA.json")
        );
        assert!(paths.partner("../secrets").is_err());
        assert!(paths.theme("").is_err());
    }

    #[tokio::test]
    async fn test_load_partner_config() {
        let (_dir, paths) = tree();
        let config = load_partner_config(&paths, "partnerA").await.unwrap();
        assert_eq!(config.partner_name, "Partner partnerA");
        assert_eq!(config.theme_id, "blue");
        assert!(!config.features.reply_functionality);
    }

    #[tokio::test]
    async fn test_unregistered_partner_type_still_loads() {
        let (_dir, paths) = tree();
        let config = load_partner_config(&paths, "partnerB").await.unwrap();
        assert_eq!(config.partner_type, "startup");
        assert!(!config.features.mark_as_spam_button);
    }

    #[tokio::test]
    async fn test_missing_partner_is_config_error() {
        let (_dir, paths) = tree();
        let err = load_partner_config(&paths, "partnerZ").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_malformed_theme_is_parse_error() {
        let (dir, paths) = tree();
        std::fs::write(dir.path().join("themes/broken.json"), "{ not json").unwrap();
        let err = load_theme(&paths, "broken").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_theme() {
        let (_dir, paths) = tree();
        let theme = load_theme(&paths, "green").await.unwrap();
        assert_eq!(theme.colors.primary, "#28a745");
        assert_eq!(theme.typography.font_size.medium, "14px");
    }

    #[test]
    fn test_shipped_config_parses() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let registry: PartnerTypesRegistry =
            serde_json::from_slice(&std::fs::read(root.join("partner-types.json")).unwrap())
                .unwrap();
        for (id, _) in PARTNERS {
            let raw = std::fs::read(root.join("partners").join(format!("{id}.json"))).unwrap();
            let config: PartnerConfig = serde_json::from_slice(&raw).unwrap();
            assert_eq!(config.partner_id, *id);
            assert!(registry.is_valid(&config.partner_type));
            let raw = std::fs::read(root.join("themes").join(format!("{}.json", config.theme_id)))
                .unwrap();
            let _: ThemeConfig = serde_json::from_slice(&raw).unwrap();
        }
    }
}
