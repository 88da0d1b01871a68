//! Prefab spawner demo.
//!
//! A turret entity carries a `Launcher` script that instantiates a projectile
//! prefab at a fixed interval, each one aimed a little further around the
//! turret. Every projectile carries a `Projectile` script that flies along its
//! forward vector and destroys its own entity when its lifetime runs out.
//! After the run, a raycast reports the nearest live projectile.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use script_core::{
    Component, Entity, EntityId, NativeKind, Prefab, ScriptComponent, ScriptError, ScriptHost,
    Transform, log, physics, time,
};
use script_host::{ComponentData, HostConfig, PrefabDef, SceneHost, ScriptRuntime};
use script_math::{Ray, TransformSeed, Vec3};

/// Frames the demo runs for.
const FRAMES: u32 = 180;

/// Fires `prefab` every `interval` seconds.
struct Launcher {
    owner: EntityId,
    prefab: Prefab,
    interval: f32,
    cooldown: f32,
    fired: u32,
}

impl Component for Launcher {
    fn owner_id(&self) -> EntityId {
        self.owner
    }
}

impl ScriptComponent for Launcher {
    fn type_name() -> &'static str {
        "Launcher"
    }

    fn on_start(&mut self, host: &dyn ScriptHost) -> Result<(), ScriptError> {
        let name = Entity::from_id(self.owner).name(host)?;
        log::info(host, &format!("{} armed", name.as_deref().unwrap_or("launcher")));
        Ok(())
    }

    fn on_update(&mut self, host: &dyn ScriptHost) -> Result<(), ScriptError> {
        self.cooldown -= time::delta_time(host);
        if self.cooldown > 0.0 {
            return Ok(());
        }
        self.cooldown += self.interval;

        let origin = self.get_component::<Transform>(host)?.position(host)?;
        let yaw = self.fired as f32 * std::f32::consts::FRAC_PI_4;
        let shot = self
            .prefab
            .instantiate_with_rotation(host, origin, Vec3::new(0.0, yaw, 0.0))?;
        self.fired += 1;
        info!(projectile = %shot.id(), yaw, "fired");
        Ok(())
    }
}

/// Flies forward until its lifetime runs out.
struct Projectile {
    owner: EntityId,
    speed: f32,
    lifetime: f32,
}

impl Component for Projectile {
    fn owner_id(&self) -> EntityId {
        self.owner
    }
}

impl ScriptComponent for Projectile {
    fn type_name() -> &'static str {
        "Projectile"
    }

    fn on_update(&mut self, host: &dyn ScriptHost) -> Result<(), ScriptError> {
        let dt = time::delta_time(host);
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            let mut owner = Entity::from_id(self.owner);
            return owner.destroy(host);
        }

        let transform = self.get_component::<Transform>(host)?;
        let step = transform.forward(host)? * self.speed * dt;
        transform.set_position(host, transform.position(host)? + step)
    }

    fn on_destroy(&mut self, _host: &dyn ScriptHost) -> Result<(), ScriptError> {
        info!(projectile = %self.owner, "projectile expired");
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("prefab_spawner=info".parse()?)
                .add_directive("script=info".parse()?),
        )
        .init();

    let host = SceneHost::new(HostConfig::from_env("prefab_spawner"));

    let projectile = host.register_prefab(
        PrefabDef::new("projectile")
            .with_kind(NativeKind::SphereCollider)
            .with_kind(NativeKind::SpriteRenderer),
    );
    host.set_prefab_script(projectile, |owner| Projectile {
        owner,
        speed: 4.0,
        lifetime: 1.5,
    })?;

    let turret = host.spawn(
        Some("Turret"),
        [ComponentData::Transform(TransformSeed::from_position(Vec3::new(0.0, 0.0, -2.0)))],
    )?;
    host.attach_script(Launcher {
        owner: turret,
        prefab: projectile,
        interval: 0.5,
        cooldown: 0.0,
        fired: 0,
    })?;

    let mut runtime = ScriptRuntime::new(host);
    runtime.start();

    let mut failures = 0;
    for _ in 0..FRAMES {
        failures += runtime.update().failures;
    }

    let host = runtime.host();
    info!(
        frames = host.frame(),
        entities = host.entity_count(),
        scripts = host.script_count(),
        failures,
        "simulation finished"
    );

    let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, 50.0);
    match physics::raycast(host, &ray)? {
        Some(hit) => info!(distance = hit.distance, position = ?hit.position, "nearest projectile ahead"),
        None => info!("no projectile ahead"),
    }

    let stats = runtime.end();
    info!(destroyed = stats.destroyed, "demo complete");
    Ok(())
}
