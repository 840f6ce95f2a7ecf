//! Enemy data and pool configuration loading from RON files.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::components::{EnemyUnit, Rewards, TemplateId, UnitFactory};
use super::error::{ConfigError, DataLoadError};
use super::pool::PoolGrowth;

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    #[serde(default)]
    pub points_reward: u64,
    #[serde(default)]
    pub exp_reward: u64,
}

impl EnemyDefinition {
    /// Build a fresh, deactivated pooled unit.
    pub fn to_unit(&self) -> EnemyUnit {
        EnemyUnit::new(
            self.name.clone(),
            self.max_health,
            Rewards {
                points: self.points_reward,
                exp: self.exp_reward,
            },
        )
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<TemplateId, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by template id.
    pub fn get(&self, template: &TemplateId) -> Option<&EnemyDefinition> {
        self.definitions.get(template)
    }

    pub fn insert(&mut self, template: impl Into<TemplateId>, definition: EnemyDefinition) {
        self.definitions.insert(template.into(), definition);
    }
}

impl UnitFactory<EnemyUnit> for EnemyRegistry {
    fn build(&self, template: &TemplateId) -> Result<EnemyUnit, ConfigError> {
        let definition = self
            .get(template)
            .ok_or_else(|| ConfigError::UnknownTemplate(template.clone()))?;

        // A unit that starts dead can never be defeated
        if definition.max_health.is_nan() || definition.max_health <= 0.0 {
            return Err(ConfigError::InvalidTemplate {
                template: template.clone(),
                details: format!("max_health must be positive, got {}", definition.max_health),
            });
        }

        Ok(definition.to_unit())
    }
}

/// How one entry is chosen out of several candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum SelectionPolicy {
    /// Configuration order, always the first candidate.
    First,
    /// Uniformly random.
    #[default]
    Random,
}

/// Regular enemy pool covering an inclusive level range.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PoolGroup {
    pub min_level: u32,
    pub max_level: u32,
    pub templates: Vec<TemplateId>,
}

impl PoolGroup {
    /// Levels this group spawns for, inclusive on both ends.
    pub fn levels(&self) -> RangeInclusive<u32> {
        self.min_level..=self.max_level
    }
}

/// Boss pool for one exact level.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct BossPoolGroup {
    pub level: u32,
    pub templates: Vec<TemplateId>,
}

fn default_pool_size() -> usize {
    2
}

/// Pool layout loaded once at startup.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PoolConfig {
    pub pools: Vec<PoolGroup>,
    #[serde(default)]
    pub boss_pools: Vec<BossPoolGroup>,
    #[serde(default = "default_pool_size")]
    pub pool_size_per_template: usize,
    #[serde(default)]
    pub growth: PoolGrowth,
    #[serde(default)]
    pub group_selection: SelectionPolicy,
    #[serde(default)]
    pub template_selection: SelectionPolicy,
    /// Seed for `Random` selection. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PoolConfig {
    pub fn new(pools: Vec<PoolGroup>, boss_pools: Vec<BossPoolGroup>, pool_size_per_template: usize) -> Self {
        Self {
            pools,
            boss_pools,
            pool_size_per_template,
            growth: PoolGrowth::default(),
            group_selection: SelectionPolicy::default(),
            template_selection: SelectionPolicy::default(),
            seed: None,
        }
    }
}

/// Where enemy data lives on disk.
#[derive(Resource, Clone, Debug)]
pub struct DataPaths {
    pub enemies_dir: PathBuf,
    pub pool_config: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            enemies_dir: PathBuf::from("assets/data/enemies"),
            pool_config: PathBuf::from("assets/data/pools.ron"),
        }
    }
}

/// Parse pool configuration from RON text. `origin` is only used in errors.
pub fn parse_pool_config(contents: &str, origin: &str) -> Result<PoolConfig, DataLoadError> {
    ron::from_str::<PoolConfig>(contents).map_err(|e| DataLoadError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Read and parse the pool configuration file.
pub fn load_pool_config(path: &Path) -> Result<PoolConfig, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_pool_config(&contents, &path.display().to_string())
}

/// Load all enemy definitions from the configured enemies directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>, paths: Res<DataPaths>) {
    let enemies_dir = paths.enemies_dir.as_path();

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let Some(template) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str::<EnemyDefinition>(&contents) {
                    Ok(definition) => {
                        info!("Loaded enemy definition: {} ({})", definition.name, template);
                        registry.insert(template, definition);
                    }
                    Err(e) => {
                        error!("Failed to parse enemy definition {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    error!("Failed to read enemy definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
