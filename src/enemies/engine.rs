//! Enemy pool engine - spawn selection, instance reuse and boss tracking.
//!
//! The engine owns one [`InstancePool`] per template referenced by the pool
//! configuration. Every spawn draws from those pools and every defeat hands the
//! instance back, so nothing is allocated after startup unless a pool is allowed
//! to grow.
//!
//! Boss levels are multiples of [`BOSS_INTERVAL`]. A boss is only spawned when a
//! boss group exists for the exact level and that level has not been cleared in
//! this session; otherwise the regular groups covering the level are used.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

use super::components::{ActiveUnit, TemplateId, UnitFactory, UnitHandle, UnitInstance, UnitKind};
use super::data::{BossPoolGroup, PoolConfig, PoolGroup, SelectionPolicy};
use super::error::{ConfigError, PoolError};
use super::pool::{InstancePool, PoolGrowth};

/// Every level divisible by this is a potential boss level.
pub const BOSS_INTERVAL: u32 = 5;

/// Supplies the player's current level.
pub trait ProgressionSource {
    fn current_level(&self) -> u32;
}

/// Lifecycle of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Pools have not been built yet.
    #[default]
    Uninitialized,
    /// Pools exist but nothing has been spawned.
    Idle,
    /// Exactly one unit is active.
    Active,
    /// A defeat was reported and the replacement has not been spawned yet.
    Transitioning,
}

/// Boss levels cleared in the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefeatedBossLevels(pub BTreeSet<u32>);

impl DefeatedBossLevels {
    pub fn contains(&self, level: u32) -> bool {
        self.0.contains(&level)
    }

    pub fn insert(&mut self, level: u32) -> bool {
        self.0.insert(level)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for DefeatedBossLevels {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Notification queued whenever the current unit changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitChange {
    pub previous: Option<ActiveUnit>,
    pub current: Option<ActiveUnit>,
}

/// Result of a defeat report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefeatReport {
    pub unit: ActiveUnit,
    /// True when the report added a level to [`DefeatedBossLevels`].
    pub boss_cleared: bool,
}

struct RegularGroup {
    levels: RangeInclusive<u32>,
    pools: Vec<usize>,
}

struct BossGroup {
    level: u32,
    pools: Vec<usize>,
}

/// Owns the enemy pools and the single active unit.
#[derive(Resource)]
pub struct EnemyPoolEngine<U: UnitInstance + Send + Sync + 'static> {
    state: EngineState,
    pools: Vec<InstancePool<U>>,
    pool_index: HashMap<TemplateId, usize>,
    regular: Vec<RegularGroup>,
    bosses: Vec<BossGroup>,
    growth: PoolGrowth,
    group_selection: SelectionPolicy,
    template_selection: SelectionPolicy,
    rng: StdRng,
    defeated_bosses: DefeatedBossLevels,
    current: Option<ActiveUnit>,
    changes: Vec<UnitChange>,
}

impl<U: UnitInstance + Send + Sync + 'static> Default for EnemyPoolEngine<U> {
    fn default() -> Self {
        Self {
            state: EngineState::Uninitialized,
            pools: Vec::new(),
            pool_index: HashMap::new(),
            regular: Vec::new(),
            bosses: Vec::new(),
            growth: PoolGrowth::default(),
            group_selection: SelectionPolicy::default(),
            template_selection: SelectionPolicy::default(),
            rng: StdRng::from_entropy(),
            defeated_bosses: DefeatedBossLevels::default(),
            current: None,
            changes: Vec::new(),
        }
    }
}

impl<U: UnitInstance + Send + Sync + 'static> EnemyPoolEngine<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every pool referenced by `config`.
    ///
    /// Each template gets `pool_size_per_template` deactivated instances, shared
    /// by every group that lists it. Calling this twice is an error; use
    /// [`reset_session`](Self::reset_session) to start over.
    pub fn initialize_pools<F: UnitFactory<U>>(
        &mut self,
        config: &PoolConfig,
        factory: &F,
    ) -> Result<(), PoolError> {
        if self.state != EngineState::Uninitialized {
            return Err(PoolError::AlreadyInitialized);
        }

        validate_config(config)?;

        let mut pools = Vec::new();
        let mut pool_index = HashMap::new();
        let referenced = config
            .pools
            .iter()
            .flat_map(|group| group.templates.iter())
            .chain(config.boss_pools.iter().flat_map(|group| group.templates.iter()));

        for template in referenced {
            if pool_index.contains_key(template) {
                continue;
            }
            let prototype = factory.build(template)?;
            pool_index.insert(template.clone(), pools.len());
            pools.push(InstancePool::new(
                template.clone(),
                prototype,
                config.pool_size_per_template,
            ));
        }

        let lookup = |templates: &[TemplateId]| -> Vec<usize> {
            templates.iter().map(|t| pool_index[t]).collect()
        };

        let regular = config
            .pools
            .iter()
            .map(|group| RegularGroup {
                levels: group.levels(),
                pools: lookup(&group.templates),
            })
            .collect();

        let mut bosses: Vec<BossGroup> = Vec::new();
        for group in &config.boss_pools {
            if bosses.iter().any(|b| b.level == group.level) {
                warn!(
                    "Duplicate boss pool for level {}, keeping the first one",
                    group.level
                );
                continue;
            }
            bosses.push(BossGroup {
                level: group.level,
                pools: lookup(&group.templates),
            });
        }

        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        info!(
            "Initialized {} enemy pools ({} per template, {} regular groups, {} boss groups)",
            pools.len(),
            config.pool_size_per_template,
            config.pools.len(),
            bosses.len()
        );

        self.pools = pools;
        self.pool_index = pool_index;
        self.regular = regular;
        self.bosses = bosses;
        self.growth = config.growth;
        self.group_selection = config.group_selection;
        self.template_selection = config.template_selection;
        self.state = EngineState::Idle;
        Ok(())
    }

    /// Whether `level` would spawn a boss right now.
    pub fn is_boss_eligible(&self, level: u32) -> bool {
        self.boss_group(level).is_some()
    }

    /// Select, acquire and activate the next unit for `level`.
    ///
    /// The previous unit is returned to its pool only after the new instance has
    /// been acquired, so a failed spawn leaves the current unit untouched.
    pub fn spawn_next_enemy(&mut self, level: u32) -> Result<ActiveUnit, PoolError> {
        if self.state == EngineState::Uninitialized {
            return Err(PoolError::NotInitialized);
        }

        let (kind, pool) = self.select_pool(level)?;

        let (slot, generation) = self.pools[pool].acquire(self.growth).ok_or_else(|| {
            PoolError::PoolExhausted {
                template: self.pools[pool].template().clone(),
            }
        })?;

        let previous = self.release_current();

        let handle = UnitHandle {
            pool,
            slot,
            generation,
        };
        if let Some(unit) = self.pools[pool].get_mut(slot, generation) {
            unit.activate();
        }

        let unit = ActiveUnit {
            handle,
            template: self.pools[pool].template().clone(),
            level,
            kind,
        };

        debug!(
            "Spawned {:?} '{}' for level {} (slot {}, generation {})",
            kind, unit.template, level, slot, generation
        );

        self.current = Some(unit.clone());
        self.state = EngineState::Active;
        self.changes.push(UnitChange {
            previous,
            current: Some(unit.clone()),
        });
        self.debug_check_current();

        Ok(unit)
    }

    /// The unit currently on screen, if any.
    pub fn current_enemy(&self) -> Option<&ActiveUnit> {
        self.current.as_ref()
    }

    pub fn current_unit(&self) -> Option<&U> {
        let handle = self.current.as_ref()?.handle;
        self.unit(handle)
    }

    pub fn current_unit_mut(&mut self) -> Option<&mut U> {
        let handle = self.current.as_ref()?.handle;
        self.unit_mut(handle)
    }

    /// Resolve a handle. Stale handles resolve to `None`.
    pub fn unit(&self, handle: UnitHandle) -> Option<&U> {
        self.pools
            .get(handle.pool)?
            .get(handle.slot, handle.generation)
    }

    pub fn unit_mut(&mut self, handle: UnitHandle) -> Option<&mut U> {
        self.pools
            .get_mut(handle.pool)?
            .get_mut(handle.slot, handle.generation)
    }

    /// Whether `handle` refers to the unit that is currently active.
    pub fn is_current(&self, handle: UnitHandle) -> bool {
        self.current.as_ref().is_some_and(|c| c.handle == handle)
    }

    /// Record the current unit as defeated and return it to its pool.
    ///
    /// Boss kills add `level` to the defeated set; regular kills never do. The
    /// engine is left in [`EngineState::Transitioning`] until the next spawn.
    pub fn report_defeated(&mut self, level: u32) -> Result<DefeatReport, PoolError> {
        let spawned = match (&self.state, &self.current) {
            (EngineState::Active, Some(current)) => current.level,
            _ => return Err(PoolError::NoActiveUnit),
        };
        if spawned != level {
            return Err(PoolError::LevelMismatch {
                reported: level,
                spawned,
            });
        }

        let Some(unit) = self.release_current() else {
            return Err(PoolError::NoActiveUnit);
        };

        let boss_cleared = unit.is_boss() && self.defeated_bosses.insert(level);
        if boss_cleared {
            info!("Boss '{}' cleared at level {}", unit.template, level);
        }

        self.state = EngineState::Transitioning;
        self.changes.push(UnitChange {
            previous: Some(unit.clone()),
            current: None,
        });

        Ok(DefeatReport { unit, boss_cleared })
    }

    /// Like [`report_defeated`](Self::report_defeated), but only for `unit`.
    ///
    /// A unit that has already been replaced (by a reset or an earlier report)
    /// is rejected with `StaleUnit` and nothing changes.
    pub fn report_unit_defeated(&mut self, unit: &ActiveUnit) -> Result<DefeatReport, PoolError> {
        if self.current.is_some() && !self.is_current(unit.handle) {
            return Err(PoolError::StaleUnit {
                template: unit.template.clone(),
            });
        }
        self.report_defeated(unit.level)
    }

    /// Report `unit` defeated and immediately spawn for the progression's level.
    pub fn report_defeated_and_respawn<P: ProgressionSource + ?Sized>(
        &mut self,
        unit: &ActiveUnit,
        progression: &P,
    ) -> Result<(DefeatReport, ActiveUnit), PoolError> {
        let report = self.report_unit_defeated(unit)?;
        let next = self.spawn_next_enemy(progression.current_level())?;
        Ok((report, next))
    }

    pub fn defeated_boss_levels(&self) -> &DefeatedBossLevels {
        &self.defeated_bosses
    }

    /// Replace the defeated set, e.g. when restoring a save.
    pub fn set_defeated_boss_levels(&mut self, levels: DefeatedBossLevels) {
        self.defeated_bosses = levels;
    }

    /// Full game-state reset. Pools are kept; everything else starts over.
    pub fn reset_session(&mut self) {
        if self.state == EngineState::Uninitialized {
            return;
        }
        let previous = self.release_current();
        if previous.is_some() {
            self.changes.push(UnitChange {
                previous,
                current: None,
            });
        }
        self.defeated_bosses = DefeatedBossLevels::default();
        self.state = EngineState::Idle;
        info!("Enemy pools reset");
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Drain queued current-unit notifications.
    pub fn take_changes(&mut self) -> Vec<UnitChange> {
        std::mem::take(&mut self.changes)
    }

    /// Instances created so far for `template`, including any growth.
    pub fn instance_count(&self, template: &TemplateId) -> Option<usize> {
        self.pool_for(template).map(InstancePool::len)
    }

    pub fn available_count(&self, template: &TemplateId) -> Option<usize> {
        self.pool_for(template).map(InstancePool::available)
    }

    /// Active instances across every pool. Never more than one.
    pub fn active_instance_count(&self) -> usize {
        self.pools.iter().map(InstancePool::active_units).sum()
    }

    fn pool_for(&self, template: &TemplateId) -> Option<&InstancePool<U>> {
        self.pool_index.get(template).map(|&i| &self.pools[i])
    }

    fn boss_group(&self, level: u32) -> Option<usize> {
        if level == 0 || level % BOSS_INTERVAL != 0 || self.defeated_bosses.contains(level) {
            return None;
        }
        self.bosses.iter().position(|group| group.level == level)
    }

    fn select_pool(&mut self, level: u32) -> Result<(UnitKind, usize), PoolError> {
        if let Some(index) = self.boss_group(level) {
            let group = &self.bosses[index];
            let choice = pick(&mut self.rng, self.template_selection, group.pools.len());
            return Ok((UnitKind::Boss, group.pools[choice]));
        }

        let candidates: Vec<usize> = self
            .regular
            .iter()
            .enumerate()
            .filter(|(_, group)| group.levels.contains(&level))
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            return Err(PoolError::NoEligiblePool { level });
        }

        let group = &self.regular[candidates[pick(&mut self.rng, self.group_selection, candidates.len())]];
        let choice = pick(&mut self.rng, self.template_selection, group.pools.len());
        Ok((UnitKind::Regular, group.pools[choice]))
    }

    /// Deactivate the current unit and give its slot back.
    fn release_current(&mut self) -> Option<ActiveUnit> {
        let unit = self.current.take()?;
        let released = self
            .pools
            .get_mut(unit.handle.pool)
            .is_some_and(|pool| pool.release(unit.handle.slot));
        debug_assert!(released, "current unit was not checked out of its pool");
        Some(unit)
    }

    fn debug_check_current(&self) {
        debug_assert!(
            self.current_unit().is_some_and(|unit| unit.is_active()),
            "current unit must resolve to an active instance"
        );
        debug_assert!(self.active_instance_count() <= 1, "more than one active unit");
    }
}

fn pick(rng: &mut StdRng, policy: SelectionPolicy, len: usize) -> usize {
    match policy {
        SelectionPolicy::First => 0,
        SelectionPolicy::Random if len > 1 => rng.gen_range(0..len),
        SelectionPolicy::Random => 0,
    }
}

fn validate_config(config: &PoolConfig) -> Result<(), ConfigError> {
    if config.pool_size_per_template < 1 {
        return Err(ConfigError::InvalidPoolSize(config.pool_size_per_template));
    }

    for (i, PoolGroup { min_level, max_level, templates }) in config.pools.iter().enumerate() {
        if *min_level < 1 || min_level > max_level {
            return Err(ConfigError::InvalidLevelRange {
                min: *min_level,
                max: *max_level,
            });
        }
        if templates.is_empty() {
            return Err(ConfigError::EmptyTemplateSet {
                group: format!("pool group #{i} ({min_level}..={max_level})"),
            });
        }
    }

    for BossPoolGroup { level, templates } in &config.boss_pools {
        if *level < 1 {
            return Err(ConfigError::InvalidBossLevel(*level));
        }
        if templates.is_empty() {
            return Err(ConfigError::EmptyTemplateSet {
                group: format!("boss group for level {level}"),
            });
        }
    }

    Ok(())
}
