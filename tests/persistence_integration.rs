//! Scene transition integration tests for the persistent actor, its spawn
//! policy, state restoration, and observer rebinding.

use bevy_ecs::prelude::*;
use glam::Vec2;

use scenekeeper::components::actortimer::ActorTimers;
use scenekeeper::components::binding::BindOutcome;
use scenekeeper::components::camerafollower::CameraFollower;
use scenekeeper::components::hudcoins::HudCoinLabel;
use scenekeeper::components::inactive::Inactive;
use scenekeeper::components::mapposition::MapPosition;
use scenekeeper::components::player::{CoinPurse, PlayerCombat};
use scenekeeper::components::rigidbody::RigidBody;
use scenekeeper::components::subscription::SubscriptionOwner;
use scenekeeper::events::scene::SceneActivatedEvent;
use scenekeeper::game::{
    build_update_schedule, count_actors, demo_config, demo_scene_library, new_world, tick,
};
use scenekeeper::resources::actorslot::ActorSlot;
use scenekeeper::resources::diagnostics::{DiagnosticKind, DiagnosticLog};
use scenekeeper::resources::persistenceconfig::{PersistenceConfig, SpawnPolicy};
use scenekeeper::resources::roleregistry::{Role, RoleRegistry};
use scenekeeper::resources::scenelibrary::SceneDescription;
use scenekeeper::resources::scenestate::{ActiveScene, LoadMode, NextScene};
use scenekeeper::resources::worldtime::WorldTime;
use scenekeeper::systems::actortimer::start_attack;
use scenekeeper::systems::rebinding::push_actor;
use scenekeeper::systems::teardown::teardown_persistent_actor;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-3;

fn approx_eq(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPSILON
}

fn setup() -> (World, Schedule) {
    setup_with(demo_config())
}

fn setup_with(config: PersistenceConfig) -> (World, Schedule) {
    let world = new_world(config, demo_scene_library());
    (world, build_update_schedule())
}

fn load(world: &mut World, update: &mut Schedule, scene: &str) {
    world.resource_mut::<NextScene>().set(scene);
    tick(world, update, DT);
}

fn load_additive(world: &mut World, update: &mut Schedule, scene: &str) {
    world
        .resource_mut::<NextScene>()
        .set_with_mode(scene, LoadMode::Additive);
    tick(world, update, DT);
}

fn run_frames(world: &mut World, update: &mut Schedule, frames: u32) {
    for _ in 0..frames {
        tick(world, update, DT);
    }
}

fn actor(world: &World) -> Entity {
    world
        .resource::<ActorSlot>()
        .current()
        .expect("no persistent actor registered")
}

fn position(world: &World, entity: Entity) -> Vec2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

fn registered(world: &World, role: Role) -> Entity {
    world
        .resource::<RoleRegistry>()
        .get(role)
        .expect("role not registered")
}

fn subscriptions(world: &mut World) -> usize {
    world.query::<&SubscriptionOwner>().iter(world).count()
}

#[test]
fn at_most_one_actor_across_scene_loads() {
    let (mut world, mut update) = setup();
    for scene in ["Escena1", "Escena2", "Escena1", "Escena3", "MainMenu", "Escena1"] {
        load(&mut world, &mut update, scene);
        assert_eq!(count_actors(&mut world), 1, "after loading {}", scene);
        assert_eq!(subscriptions(&mut world), 1, "after loading {}", scene);
    }
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::DuplicateDestroyed),
        4
    );
    assert_eq!(world.resource::<ActiveScene>().loads(), 6);
}

#[test]
fn configured_gravity_survives_scene_loads() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    load(&mut world, &mut update, "Escena2");
    let actor = actor(&world);
    assert_eq!(world.get::<RigidBody>(actor).unwrap().gravity_scale, 3.0);

    let log = world.resource::<DiagnosticLog>();
    let restoration = log.of_kind(DiagnosticKind::Restoration).last().unwrap();
    assert_eq!(restoration.subject, Some(actor));
    assert_eq!(restoration.message, "gravity_scale before=3 after_reset=0 after=3");
}

#[test]
fn transient_state_is_cleared_on_scene_load() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    {
        let mut query = world.query::<(&mut PlayerCombat, &mut ActorTimers, &mut RigidBody)>();
        let (mut combat, mut timers, mut body) = query.get_mut(&mut world, actor).unwrap();
        assert!(start_attack(&mut combat, &mut timers));
        combat.begin_attack();
        body.velocity = Vec2::new(4.0, -2.0);
    }
    world.get_mut::<CoinPurse>(actor).unwrap().add(7);

    load(&mut world, &mut update, "Escena2");

    assert!(world.get::<PlayerCombat>(actor).unwrap().is_idle());
    assert!(world.get::<ActorTimers>(actor).unwrap().is_empty());
    assert_eq!(world.get::<RigidBody>(actor).unwrap().velocity, Vec2::ZERO);
    // progress is not transient
    assert_eq!(world.get::<CoinPurse>(actor).unwrap().coins, 7);
}

#[test]
fn actor_spawns_at_tagged_marker_then_named_marker() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    assert!(approx_eq(position(&world, actor), Vec2::new(3.0, 4.0)));

    load(&mut world, &mut update, "Escena2");
    assert!(approx_eq(position(&world, actor), Vec2::new(-6.0, 2.0)));
}

#[test]
fn scene_outside_allow_list_deactivates_actor() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    load(&mut world, &mut update, "Escena3");
    let actor = actor(&world);
    assert!(world.get::<Inactive>(actor).is_some());
    assert!(approx_eq(position(&world, actor), Vec2::new(3.0, 4.0)));
}

#[test]
fn persist_in_all_scenes_uses_scene_default_position() {
    let mut config = demo_config();
    config.policy = SpawnPolicy::default()
        .persist_everywhere(true)
        .with_default_position("Escena3", Vec2::new(1.0, 1.0));
    let (mut world, mut update) = setup_with(config);
    load(&mut world, &mut update, "Escena3");
    let actor = actor(&world);
    assert!(world.get::<Inactive>(actor).is_none());
    assert!(approx_eq(position(&world, actor), Vec2::new(1.0, 1.0)));

    load(&mut world, &mut update, "MainMenu");
    assert!(world.get::<Inactive>(actor).is_some());
}

#[test]
fn menu_deactivates_and_next_scene_reactivates() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);

    load(&mut world, &mut update, "MainMenu");
    assert!(world.get::<Inactive>(actor).is_some());
    let menu_camera = registered(&world, Role::CameraFollower);
    assert!(
        !world
            .get::<CameraFollower>(menu_camera)
            .unwrap()
            .binding
            .is_bound()
    );

    load(&mut world, &mut update, "Escena2");
    assert!(world.get::<Inactive>(actor).is_none());
    assert!(approx_eq(position(&world, actor), Vec2::new(-6.0, 2.0)));
    let camera = registered(&world, Role::CameraFollower);
    assert_eq!(
        world.get::<CameraFollower>(camera).unwrap().binding.target(),
        Some(actor)
    );
}

#[test]
fn observers_are_pushed_the_actor_on_activation() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    let camera = registered(&world, Role::CameraFollower);
    let hud = registered(&world, Role::HudCoinLabel);

    assert_eq!(
        world.get::<CameraFollower>(camera).unwrap().binding.target(),
        Some(actor)
    );
    assert_eq!(
        world.get::<HudCoinLabel>(hud).unwrap().binding.target(),
        Some(actor)
    );
    assert_eq!(world.get::<HudCoinLabel>(hud).unwrap().text, "Coins: 0");
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::RebindMissing),
        0
    );
}

#[test]
fn scene_without_observers_reports_missing_roles() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    load(&mut world, &mut update, "Escena3");
    // Escena3 hides the actor: nothing is pushed and nothing is reported.
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::RebindMissing),
        0
    );

    let mut config = demo_config();
    config.policy = config.policy.allow("Escena3");
    let (mut world, mut update) = setup_with(config);
    load(&mut world, &mut update, "Escena3");
    let actor = actor(&world);
    let log = world.resource::<DiagnosticLog>();
    let missing: Vec<_> = log.of_kind(DiagnosticKind::RebindMissing).collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].subject, Some(actor));
    assert!(missing[0].message.contains("HudCoinLabel"));
}

#[test]
fn repeated_push_is_idempotent() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    let camera = registered(&world, Role::CameraFollower);

    world.trigger(SceneActivatedEvent {
        scene: "Escena1".to_string(),
    });
    world.flush();
    world.trigger(SceneActivatedEvent {
        scene: "Escena1".to_string(),
    });
    world.flush();

    assert_eq!(
        world.get::<CameraFollower>(camera).unwrap().binding.target(),
        Some(actor)
    );
    let log = world.resource::<DiagnosticLog>();
    let last_push = log.of_kind(DiagnosticKind::Rebind).last().unwrap();
    assert!(last_push.message.ends_with("Unchanged"));

    let mut binding = world.get::<CameraFollower>(camera).unwrap().binding.clone();
    let mut log = DiagnosticLog::new();
    assert_eq!(
        push_actor(camera, &mut binding, actor, &mut log),
        BindOutcome::Unchanged
    );
}

#[test]
fn unbound_observer_binds_within_one_update() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);

    // Not registered, so never pushed to.
    let camera = world
        .spawn((MapPosition::new(0.0, 0.0), CameraFollower::default()))
        .id();
    assert!(
        !world
            .get::<CameraFollower>(camera)
            .unwrap()
            .binding
            .is_bound()
    );

    tick(&mut world, &mut update, DT);

    assert_eq!(
        world.get::<CameraFollower>(camera).unwrap().binding.target(),
        Some(actor)
    );
    let discovered = world
        .resource::<DiagnosticLog>()
        .about(camera)
        .any(|d| d.kind == DiagnosticKind::Rebind && d.message.contains("Registry"));
    assert!(discovered);
}

#[test]
fn camera_eases_toward_actor() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    let camera = registered(&world, Role::CameraFollower);

    run_frames(&mut world, &mut update, 2);
    let early = position(&world, camera);
    assert!(early.length() > 0.0);
    assert!(early.length() < 5.0);

    run_frames(&mut world, &mut update, 300);
    assert!(approx_eq(position(&world, camera), position(&world, actor)));
}

#[test]
fn hud_tracks_coin_purse() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    world.get_mut::<CoinPurse>(actor).unwrap().add(5);
    tick(&mut world, &mut update, DT);

    let hud = registered(&world, Role::HudCoinLabel);
    assert_eq!(world.get::<HudCoinLabel>(hud).unwrap().text, "Coins: 5");

    load(&mut world, &mut update, "Escena2");
    let hud = registered(&world, Role::HudCoinLabel);
    assert_eq!(world.get::<HudCoinLabel>(hud).unwrap().text, "Coins: 5");
}

#[test]
fn discovery_failure_warning_is_rate_limited() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "MainMenu");
    let camera = registered(&world, Role::CameraFollower);

    run_frames(&mut world, &mut update, 59);
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::DiscoveryFailed),
        1
    );

    run_frames(&mut world, &mut update, 90);
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::DiscoveryFailed),
        2
    );
    let follower = world.get::<CameraFollower>(camera).unwrap();
    assert!(!follower.binding.is_bound());
    assert_eq!(follower.binding.failed_searches(), 150);
    // stays where it is
    assert_eq!(position(&world, camera), Vec2::ZERO);
}

#[test]
fn discovery_warnings_continue_while_paused() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "MainMenu");
    world.resource_mut::<WorldTime>().time_scale = 0.0;

    run_frames(&mut world, &mut update, 149);
    assert_eq!(world.resource::<WorldTime>().elapsed, 0.0);
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::DiscoveryFailed),
        2
    );
}

#[test]
fn player_tagged_prop_is_not_taken_for_the_actor() {
    let library = demo_scene_library().with(
        SceneDescription::new("Town")
            .with_marker(Some("Statue"), Some("Player"), 50.0, 50.0)
            .with_camera(),
    );
    let mut world = new_world(demo_config(), library);
    let mut update = build_update_schedule();
    load(&mut world, &mut update, "Town");
    run_frames(&mut world, &mut update, 5);

    assert_eq!(count_actors(&mut world), 0);
    let camera = registered(&world, Role::CameraFollower);
    let follower = world.get::<CameraFollower>(camera).unwrap();
    assert!(!follower.binding.is_bound());
    assert_eq!(position(&world, camera), Vec2::ZERO);
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::DiscoveryFailed),
        1
    );
}

#[test]
fn teardown_leaves_no_trace_in_later_loads() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let old = actor(&world);

    assert!(teardown_persistent_actor(&mut world));
    assert_eq!(count_actors(&mut world), 0);
    assert_eq!(subscriptions(&mut world), 0);
    world.resource_mut::<DiagnosticLog>().clear();

    run_frames(&mut world, &mut update, 3);
    let camera = registered(&world, Role::CameraFollower);
    assert!(
        !world
            .get::<CameraFollower>(camera)
            .unwrap()
            .binding
            .is_bound()
    );

    load(&mut world, &mut update, "Escena2");
    load(&mut world, &mut update, "MainMenu");
    load(&mut world, &mut update, "Escena1");
    run_frames(&mut world, &mut update, 3);

    let fresh = actor(&world);
    assert_ne!(fresh, old);
    assert_eq!(count_actors(&mut world), 1);
    assert_eq!(subscriptions(&mut world), 1);
    assert_eq!(world.resource::<DiagnosticLog>().about(old).count(), 0);
    assert_eq!(
        world
            .resource::<DiagnosticLog>()
            .count(DiagnosticKind::SubscriptionLeak),
        0
    );
}

#[test]
fn actor_destroyed_without_teardown_is_replaced() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let old = actor(&world);
    world.despawn(old);

    load(&mut world, &mut update, "Escena2");

    let fresh = actor(&world);
    assert_ne!(fresh, old);
    assert_eq!(count_actors(&mut world), 1);
    assert_eq!(subscriptions(&mut world), 1);
    let camera = registered(&world, Role::CameraFollower);
    assert_eq!(
        world.get::<CameraFollower>(camera).unwrap().binding.target(),
        Some(fresh)
    );
}

#[test]
fn additive_load_keeps_previous_objects() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let first_camera = registered(&world, Role::CameraFollower);

    load_additive(&mut world, &mut update, "Escena2");

    let actor = actor(&world);
    let second_camera = registered(&world, Role::CameraFollower);
    assert_ne!(first_camera, second_camera);
    assert_eq!(count_actors(&mut world), 1);
    // only markers of the scene just loaded are candidates
    assert!(approx_eq(position(&world, actor), Vec2::new(-6.0, 2.0)));
    for camera in [first_camera, second_camera] {
        assert_eq!(
            world.get::<CameraFollower>(camera).unwrap().binding.target(),
            Some(actor)
        );
    }
}

#[test]
fn unknown_scene_request_is_ignored() {
    let (mut world, mut update) = setup();
    load(&mut world, &mut update, "Escena1");
    let actor = actor(&world);
    load(&mut world, &mut update, "Atlantis");

    assert_eq!(world.resource::<ActiveScene>().name(), Some("Escena1"));
    assert!(world.get::<Inactive>(actor).is_none());
    let last = world
        .resource::<DiagnosticLog>()
        .of_kind(DiagnosticKind::SceneLoad)
        .last()
        .cloned()
        .unwrap();
    assert!(last.message.contains("Atlantis"));
}
