//! In-process salesperson directory.
//!
//! Answers candidate lookups the same way the backend endpoint does: no till
//! id, an unknown till, or a till with the feature turned off all yield an
//! empty list; otherwise the till's allowed salespersons, in configured order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use posline_config::PosConfig;
use posline_core::{Entity, PosConfigId, SalespersonId};
use posline_sales::ImageRef;

use crate::lookup::{Candidate, CandidateLookup, LookupError};

/// A salesperson record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salesperson {
    pub id: SalespersonId,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Base64 thumbnail (at most 128x128).
    #[serde(default)]
    pub image_128: Option<String>,
    #[serde(default)]
    pub related_employee_id: Option<i64>,
}

impl Entity for Salesperson {
    type Id = SalespersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Salesperson {
    pub fn new(id: SalespersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: None,
            image_128: None,
            related_employee_id: None,
        }
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.id.clone(),
            name: self.name.clone(),
            image_ref: self.image_128.as_deref().and_then(ImageRef::from_base64_png),
        }
    }
}

/// On-disk layout of a directory file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFile {
    #[serde(default)]
    pub salespersons: Vec<Salesperson>,
    #[serde(default)]
    pub pos_configs: Vec<PosConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    salespersons: HashMap<String, Salesperson>,
    configs: HashMap<String, PosConfig>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(file: DirectoryFile) -> Self {
        let mut directory = Self::new();
        for salesperson in file.salespersons {
            directory.upsert_salesperson(salesperson);
        }
        for config in file.pos_configs {
            directory.upsert_config(config);
        }
        directory
    }

    pub fn with_salesperson(mut self, salesperson: Salesperson) -> Self {
        self.upsert_salesperson(salesperson);
        self
    }

    pub fn with_config(mut self, config: PosConfig) -> Self {
        self.upsert_config(config);
        self
    }

    pub fn upsert_salesperson(&mut self, salesperson: Salesperson) {
        self.salespersons.insert(salesperson.id().to_string(), salesperson);
    }

    pub fn upsert_config(&mut self, config: PosConfig) {
        self.configs.insert(config.id.to_string(), config);
    }

    pub fn salesperson(&self, id: &SalespersonId) -> Option<&Salesperson> {
        self.salespersons.get(&id.to_string())
    }

    pub fn config(&self, id: &PosConfigId) -> Option<&PosConfig> {
        self.configs.get(&id.to_string())
    }

    fn candidates_for(&self, config_id: Option<&PosConfigId>) -> Vec<Candidate> {
        let Some(config_id) = config_id else {
            return Vec::new();
        };
        let Some(config) = self.config(config_id) else {
            tracing::debug!(config_id = %config_id, "candidate lookup for unknown till");
            return Vec::new();
        };

        config
            .selectable_salespersons()
            .iter()
            .filter_map(|id| self.salesperson(id))
            .map(Salesperson::to_candidate)
            .collect()
    }
}

#[async_trait::async_trait]
impl CandidateLookup for InMemoryDirectory {
    async fn candidates(
        &self,
        config_id: Option<&PosConfigId>,
    ) -> Result<Vec<Candidate>, LookupError> {
        Ok(self.candidates_for(config_id))
    }
}
