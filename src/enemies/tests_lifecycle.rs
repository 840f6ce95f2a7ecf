use {
    crate::{
        clicker::{
            accrue_passive_income, apply_idle_damage, handle_clicks, ClickPower, IdleDamage,
            PassiveIncome, Wallet,
        },
        combat::apply_damage,
        core::{
            add_core_events, ClickEvent, CurrentUnitChanged, DamageEvent, GameState,
            LevelUpEvent, SessionReset, UnitDefeated,
        },
        enemies::{
            forward_unit_changes, respawn_on_defeat, spawn_first_enemy, BossPoolGroup, DataPaths,
            EnemyDefinition, EnemyPools, EnemyRegistry, EngineState, PoolConfig, PoolGroup,
            SelectionPolicy, UnitKind,
        },
        progression::{award_defeat_rewards, handle_session_reset, PlayerProgress},
        ClickerPlugin,
    },
    bevy::{prelude::*, state::app::StatesPlugin, time::TimePlugin},
    std::{path::Path, time::Duration},
};

#[derive(Resource, Default)]
struct Captured {
    changes: Vec<CurrentUnitChanged>,
    defeats: Vec<UnitDefeated>,
    level_ups: Vec<LevelUpEvent>,
}

fn capture_events(
    mut changes: EventReader<CurrentUnitChanged>,
    mut defeats: EventReader<UnitDefeated>,
    mut level_ups: EventReader<LevelUpEvent>,
    mut captured: ResMut<Captured>,
) {
    captured.changes.extend(changes.read().cloned());
    captured.defeats.extend(defeats.read().cloned());
    captured.level_ups.extend(level_ups.read().copied());
}

fn definition(name: &str, max_health: f32, points_reward: u64, exp_reward: u64) -> EnemyDefinition {
    EnemyDefinition {
        name: name.to_string(),
        max_health,
        points_reward,
        exp_reward,
    }
}

/// Slime (3 HP) covers levels 1..=10, the Slime King (2 HP) guards level 5.
fn scenario_pools() -> EnemyPools {
    let mut registry = EnemyRegistry::default();
    registry.insert("slime", definition("Slime", 3.0, 2, 4));
    registry.insert("slime_king", definition("Slime King", 2.0, 50, 1));

    let mut config = PoolConfig::new(
        vec![PoolGroup {
            min_level: 1,
            max_level: 10,
            templates: vec!["slime".into()],
        }],
        vec![BossPoolGroup {
            level: 5,
            templates: vec!["slime_king".into()],
        }],
        1,
    );
    config.template_selection = SelectionPolicy::First;
    config.group_selection = SelectionPolicy::First;

    let mut pools = EnemyPools::new();
    pools.initialize_pools(&config, &registry).unwrap();
    pools
}

/// App with the gameplay chain wired up but no state machine or timers.
fn gameplay_app(level: u32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins.build().disable::<TimePlugin>());
    app.insert_resource(Time::<()>::default());
    add_core_events(&mut app);

    app.insert_resource(scenario_pools())
        .insert_resource(PlayerProgress { level, exp: 0 })
        .init_resource::<Wallet>()
        .init_resource::<ClickPower>()
        .init_resource::<PassiveIncome>()
        .init_resource::<IdleDamage>()
        .init_resource::<Captured>();

    app.add_systems(
        Update,
        (
            (handle_clicks, accrue_passive_income, apply_idle_damage),
            apply_damage,
            (award_defeat_rewards, handle_session_reset).chain(),
            respawn_on_defeat,
            forward_unit_changes,
            capture_events,
        )
            .chain(),
    );
    app
}

fn spawn_opening_enemy(app: &mut App) {
    let level = app.world().resource::<PlayerProgress>().level;
    app.world_mut()
        .resource_mut::<EnemyPools>()
        .spawn_next_enemy(level)
        .unwrap();
    app.update();
}

fn click(app: &mut App, times: usize) {
    for _ in 0..times {
        app.world_mut().send_event(ClickEvent);
    }
    app.update();
}

#[test]
fn test_clicks_defeat_enemy_and_respawn() {
    let mut app = gameplay_app(1);
    spawn_opening_enemy(&mut app);

    let first = app
        .world()
        .resource::<EnemyPools>()
        .current_enemy()
        .cloned()
        .expect("opening enemy should be active");

    // Two clicks leave the slime at 1 HP
    click(&mut app, 2);
    assert!(app.world().resource::<Captured>().defeats.is_empty());
    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_unit().unwrap().health.current, 1.0);

    // Third click finishes it
    click(&mut app, 1);

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.defeats.len(), 1, "Should emit exactly one UnitDefeated");
    assert_eq!(captured.defeats[0].unit, first);

    // 3 click points + 2 reward points
    assert_eq!(app.world().resource::<Wallet>().points, 5);
    assert_eq!(app.world().resource::<PlayerProgress>().exp, 4);

    let pools = app.world().resource::<EnemyPools>();
    let next = pools.current_enemy().expect("replacement should be active");
    assert_ne!(next.handle, first.handle, "Replacement must be a fresh activation");
    assert_eq!(pools.current_unit().unwrap().health.current, 3.0);
    assert_eq!(pools.active_instance_count(), 1);
    assert_eq!(pools.instance_count(&"slime".into()), Some(1));
}

#[test]
fn test_overkill_in_one_frame_reports_single_defeat() {
    let mut app = gameplay_app(1);
    spawn_opening_enemy(&mut app);

    click(&mut app, 6);

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.defeats.len(), 1);
    assert_eq!(app.world().resource::<Wallet>().points, 6 + 2);

    // The replacement took none of the leftover clicks
    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_unit().unwrap().health.current, 3.0);
}

#[test]
fn test_boss_defeat_is_remembered() {
    let mut app = gameplay_app(5);
    spawn_opening_enemy(&mut app);

    let boss = app
        .world()
        .resource::<EnemyPools>()
        .current_enemy()
        .cloned()
        .unwrap();
    assert_eq!(boss.kind, UnitKind::Boss);

    click(&mut app, 2);

    let pools = app.world().resource::<EnemyPools>();
    assert!(pools.defeated_boss_levels().contains(5));
    let next = pools.current_enemy().unwrap();
    assert_eq!(next.level, 5);
    assert_eq!(next.kind, UnitKind::Regular, "Cleared boss must not come back");
    assert_eq!(app.world().resource::<Wallet>().points, 2 + 50);
}

#[test]
fn test_change_events_follow_every_transition() {
    let mut app = gameplay_app(1);
    spawn_opening_enemy(&mut app);
    click(&mut app, 3);

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.changes.len(), 3);

    let opening = captured.changes[0].current.clone().unwrap();
    assert_eq!(captured.changes[0].previous, None);
    assert_eq!(captured.changes[1].previous, Some(opening));
    assert_eq!(captured.changes[1].current, None);
    assert!(captured.changes[2].current.is_some());
}

#[test]
fn test_stale_damage_is_ignored() {
    let mut app = gameplay_app(1);
    spawn_opening_enemy(&mut app);

    let stale = {
        let mut pools = app.world_mut().resource_mut::<EnemyPools>();
        let stale = pools.current_enemy().unwrap().handle;
        pools.report_defeated(1).unwrap();
        pools.spawn_next_enemy(1).unwrap();
        stale
    };

    app.world_mut().send_event(DamageEvent {
        target: stale,
        amount: 100.0,
    });
    app.update();

    assert!(app.world().resource::<Captured>().defeats.is_empty());
    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_unit().unwrap().health.current, 3.0);
}

#[test]
fn test_idle_damage_and_passive_income_tick_with_time() {
    let mut app = gameplay_app(1);
    app.insert_resource(IdleDamage { per_second: 2.0 })
        .insert_resource(PassiveIncome::new(1.5));
    spawn_opening_enemy(&mut app);

    {
        let mut time = app.world_mut().resource_mut::<Time>();
        time.advance_by(Duration::from_secs(1));
    }
    app.update();

    assert!(app.world().resource::<Captured>().defeats.is_empty());
    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_unit().unwrap().health.current, 1.0);
    assert_eq!(app.world().resource::<Wallet>().points, 1);

    {
        let mut time = app.world_mut().resource_mut::<Time>();
        time.advance_by(Duration::from_secs(1));
    }
    app.update();

    assert_eq!(app.world().resource::<Captured>().defeats.len(), 1);
    // 3 passive points over two seconds + 2 reward points
    assert_eq!(app.world().resource::<Wallet>().points, 5);
}

#[test]
fn test_level_up_feeds_next_spawn_level() {
    let mut app = gameplay_app(1);
    app.world_mut()
        .resource_mut::<PlayerProgress>()
        .exp = 8;
    spawn_opening_enemy(&mut app);

    click(&mut app, 3);

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.level_ups, vec![LevelUpEvent { new_level: 2 }]);
    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_enemy().unwrap().level, 2);
}

#[test]
fn test_session_reset_wipes_boss_history() {
    let mut app = gameplay_app(5);
    spawn_opening_enemy(&mut app);
    click(&mut app, 2);
    assert!(!app
        .world()
        .resource::<EnemyPools>()
        .defeated_boss_levels()
        .is_empty());

    app.world_mut().send_event(SessionReset);
    app.update();

    assert_eq!(*app.world().resource::<PlayerProgress>(), PlayerProgress::default());
    assert_eq!(app.world().resource::<Wallet>().points, 0);
    let pools = app.world().resource::<EnemyPools>();
    assert!(pools.defeated_boss_levels().is_empty());
    let current = pools.current_enemy().unwrap();
    assert_eq!(current.level, 1);
    assert_eq!(pools.active_instance_count(), 1);
}

#[test]
fn test_kill_and_reset_in_one_frame_keeps_fresh_unit() {
    let mut app = gameplay_app(1);
    spawn_opening_enemy(&mut app);

    for _ in 0..3 {
        app.world_mut().send_event(ClickEvent);
    }
    app.world_mut().send_event(SessionReset);
    app.update();

    let captured = app.world().resource::<Captured>();
    assert_eq!(captured.defeats.len(), 1);
    // Opening spawn, release by the reset, spawn by the reset. The kill does
    // not release the unit the reset brought in.
    assert_eq!(captured.changes.len(), 3);
    let fresh = captured.changes[2].current.clone().unwrap();

    let pools = app.world().resource::<EnemyPools>();
    assert_eq!(pools.current_enemy(), Some(&fresh));
    assert_eq!(pools.current_unit().unwrap().health.current, 3.0);
    assert_eq!(pools.active_instance_count(), 1);
    assert_eq!(*app.world().resource::<PlayerProgress>(), PlayerProgress::default());
}

#[test]
fn test_first_spawn_without_eligible_pool_leaves_no_unit() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(scenario_pools())
        .insert_resource(PlayerProgress { level: 11, exp: 0 });
    app.add_systems(Update, spawn_first_enemy);

    app.update();

    assert!(app.world().resource::<EnemyPools>().current_enemy().is_none());
}

#[test]
fn test_plugin_loads_shipped_data_and_spawns() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(DataPaths {
        enemies_dir: data.join("enemies"),
        pool_config: data.join("pools.ron"),
    });
    app.add_plugins(ClickerPlugin);

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::InGame
    );
    let pools = app.world().resource::<EnemyPools>();
    let current = pools.current_enemy().expect("first enemy should be spawned");
    assert_eq!(current.level, 1);
    assert!(matches!(current.template.as_str(), "slime" | "bat"));
}

#[test]
fn test_shipped_data_respawns_past_the_last_boss() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(DataPaths {
        enemies_dir: data.join("enemies"),
        pool_config: data.join("pools.ron"),
    });
    app.add_plugins(ClickerPlugin);
    for _ in 0..3 {
        app.update();
    }

    let mut pools = app.world_mut().resource_mut::<EnemyPools>();
    for level in [15, 16, 40, 250] {
        let current = pools.current_enemy().cloned().unwrap();
        let (_, next) = pools
            .report_defeated_and_respawn(&current, &PlayerProgress { level, exp: 0 })
            .unwrap();
        assert_eq!(next.level, level);
        assert_eq!(pools.state(), EngineState::Active);
    }
}
