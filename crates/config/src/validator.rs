use crate::*;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Venue name is required")]
    MissingVenueName,

    #[error("No supported assets defined")]
    NoSupportedAssets,

    #[error("At least one supported asset must be enabled")]
    NoEnabledAssets,

    #[error("Asset {symbol}: {message}")]
    InvalidAsset { symbol: String, message: String },

    #[error("Duplicate asset symbol '{0}'")]
    DuplicateAsset(String),

    #[error("default_volatility must be positive, got {0}")]
    InvalidVolatility(f64),

    #[error("snapshot_depth must be positive")]
    InvalidSnapshotDepth,
}

/// Outcome of validating a configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a venue configuration
///
/// Errors make the config unusable; warnings flag suspicious but workable
/// values.
pub fn validate_config(config: &VenueConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.venue.name.trim().is_empty() {
        report.errors.push(ValidationError::MissingVenueName);
    }

    if config.supported_assets.is_empty() {
        report.errors.push(ValidationError::NoSupportedAssets);
    } else {
        if !config.supported_assets.iter().any(|a| a.enabled) {
            report.errors.push(ValidationError::NoEnabledAssets);
        }

        let mut seen = std::collections::HashSet::new();
        for asset in &config.supported_assets {
            let symbol = asset.symbol.to_uppercase();
            if !seen.insert(symbol) {
                report
                    .errors
                    .push(ValidationError::DuplicateAsset(asset.symbol.clone()));
            }
            if asset.base_price <= 0.0 || !asset.base_price.is_finite() {
                report.errors.push(ValidationError::InvalidAsset {
                    symbol: asset.symbol.clone(),
                    message: format!("base_price must be positive, got {}", asset.base_price),
                });
            }
        }
    }

    if config.pricing.default_volatility <= 0.0 || !config.pricing.default_volatility.is_finite() {
        report
            .errors
            .push(ValidationError::InvalidVolatility(config.pricing.default_volatility));
    } else if config.pricing.default_volatility > 3.0 {
        report.warnings.push(format!(
            "default_volatility {} is unusually high",
            config.pricing.default_volatility
        ));
    }

    if config.pricing.default_risk_free_rate < 0.0 {
        report.warnings.push(format!(
            "negative default_risk_free_rate {}",
            config.pricing.default_risk_free_rate
        ));
    }

    if config.book.snapshot_depth == 0 {
        report.errors.push(ValidationError::InvalidSnapshotDepth);
    }

    report
}
