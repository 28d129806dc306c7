pub mod cli;

pub use cli::{Cli, Command};

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Full runtime configuration. Defaults reproduce the fixed company text the
/// tool shipped with, so it runs without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Single JSON file holding every quotation ever created.
    pub store_file: PathBuf,
    /// Directory receiving `cotizacion_<id>.pdf` files.
    pub output_dir: PathBuf,
    pub company: CompanyProfile,
    pub quote: QuoteOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub website: String,
    pub phones: String,
    pub email: String,
    pub sales_contact: String,
    pub bank_account: String,
    pub cci: String,
    /// Optional logo image (PNG). When absent or unreadable the company name
    /// is drawn as text instead.
    pub logo: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOptions {
    /// Currency prefix for every monetary cell, e.g. `S/`.
    pub currency_prefix: String,
    /// Text for the VÁLIDO HASTA header field; empty when unset.
    pub validity: String,
    pub delivery_terms: String,
    pub payment_terms: String,
    pub payment_note: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_file: PathBuf::from("cotizaciones.json"),
            output_dir: PathBuf::from("pdfs"),
            company: CompanyProfile::default(),
            quote: QuoteOptions::default(),
        }
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "ACESMA INOX".to_string(),
            address: "Calle Constantino Carvallo N°276 Urb. Santa Catina, La Victoria"
                .to_string(),
            city: "Lima".to_string(),
            website: "acesmainox.com".to_string(),
            phones: "952439843 | 980165809 | 985 728 821".to_string(),
            email: "contacto@acesmainox.com".to_string(),
            sales_contact: "Arturo Ledesma".to_string(),
            bank_account: "Cuenta Corriente Soles Interbank: 2003003503664".to_string(),
            cci: "CCI: 00320000300350366436".to_string(),
            logo: None,
        }
    }
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            currency_prefix: "S/".to_string(),
            validity: String::new(),
            delivery_terms: "5 días útiles".to_string(),
            payment_terms: "50% al inicio del contrato y el otro 50% contraentrega"
                .to_string(),
            payment_note: "incluye movilidad hasta el punto de entrega".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration: defaults, then the TOML file if given, then
    /// CLI path overrides on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                toml::from_str(&raw)?
            }
            None => AppConfig::default(),
        };

        if let Some(store_file) = &cli.store_file {
            config.store_file = store_file.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            config.output_dir = output_dir.clone();
        }

        Ok(config)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("store_file", &self.store_file.to_string_lossy())?;
        validate_path("output_dir", &self.output_dir.to_string_lossy())?;
        Ok(())
    }
}
