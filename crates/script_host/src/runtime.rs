//! Script lifecycle driver.
//!
//! [`ScriptRuntime`] owns a [`SceneHost`] and runs the hooks of its script
//! instances frame by frame:
//!
//! 1. `start`: create, then start, every pending instance.
//! 2. `update`: start whatever became pending since the last frame, update
//!    every started instance, destroy everything retired, close the frame.
//! 3. `end`: destroy every remaining instance.
//!
//! A failing hook is logged and counted; it never aborts the frame.

use tracing::{debug, info, warn};

use script_core::{ScriptComponent, ScriptError, ScriptHost, ScriptInstance};

use crate::scene::SceneHost;

/// Hook invocations during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame the pass belonged to.
    pub frame: u64,
    pub created: usize,
    pub started: usize,
    pub updated: usize,
    pub destroyed: usize,
    /// Hooks that returned an error or could not borrow their instance.
    pub failures: usize,
}

#[derive(Debug, Clone, Copy)]
enum Hook {
    Create,
    Start,
    Update,
    Destroy,
}

impl Hook {
    fn name(self) -> &'static str {
        match self {
            Hook::Create => "on_create",
            Hook::Start => "on_start",
            Hook::Update => "on_update",
            Hook::Destroy => "on_destroy",
        }
    }

    fn call(
        self,
        script: &mut dyn ScriptComponent,
        host: &dyn ScriptHost,
    ) -> Result<(), ScriptError> {
        match self {
            Hook::Create => script.on_create(host),
            Hook::Start => script.on_start(host),
            Hook::Update => script.on_update(host),
            Hook::Destroy => script.on_destroy(host),
        }
    }
}

/// Drives script hooks against a [`SceneHost`].
#[derive(Debug)]
pub struct ScriptRuntime {
    host: SceneHost,
    started: bool,
}

impl ScriptRuntime {
    #[must_use]
    pub fn new(host: SceneHost) -> Self {
        Self {
            host,
            started: false,
        }
    }

    /// The host scripts run against.
    #[must_use]
    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    /// Consume the runtime and return its host.
    #[must_use]
    pub fn into_host(self) -> SceneHost {
        self.host
    }

    /// Create and start every instance registered so far.
    pub fn start(&mut self) -> FrameStats {
        let mut stats = self.stats();
        self.start_pending(&mut stats);
        self.started = true;
        info!(
            scene = self.host.config().scene_name,
            scripts = stats.started,
            "script runtime started"
        );
        stats
    }

    /// Run one frame.
    ///
    /// Starts the runtime first if [`ScriptRuntime::start`] was never called.
    pub fn update(&mut self) -> FrameStats {
        if !self.started {
            self.started = true;
            info!(scene = self.host.config().scene_name, "script runtime started");
        }

        let mut stats = self.stats();
        self.start_pending(&mut stats);

        for instance in self.host.started_scripts() {
            // A hook earlier in this frame may have destroyed the owner.
            if self.host.is_script_live(&instance)
                && self.run_hook(Hook::Update, &instance, &mut stats)
            {
                stats.updated += 1;
            }
        }

        for instance in self.host.take_retired_scripts() {
            if self.run_hook(Hook::Destroy, &instance, &mut stats) {
                stats.destroyed += 1;
            }
        }

        self.host.advance_frame();
        debug!(
            frame = stats.frame,
            updated = stats.updated,
            destroyed = stats.destroyed,
            failures = stats.failures,
            "frame complete"
        );
        stats
    }

    /// Destroy every remaining instance and empty the registry.
    pub fn end(&mut self) -> FrameStats {
        let mut stats = self.stats();
        for instance in self.host.drain_scripts() {
            if self.run_hook(Hook::Destroy, &instance, &mut stats) {
                stats.destroyed += 1;
            }
        }
        self.started = false;
        info!(
            scene = self.host.config().scene_name,
            frames = self.host.frame(),
            destroyed = stats.destroyed,
            "script runtime ended"
        );
        stats
    }

    fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.host.frame(),
            ..FrameStats::default()
        }
    }

    fn start_pending(&self, stats: &mut FrameStats) {
        // Instances registered by these hooks wait for the next pass.
        let pending = self.host.take_pending_scripts();
        for instance in &pending {
            if self.run_hook(Hook::Create, instance, stats) {
                stats.created += 1;
            }
        }
        for instance in &pending {
            if self.host.is_script_live(instance) && self.run_hook(Hook::Start, instance, stats) {
                stats.started += 1;
            }
        }
    }

    /// Returns `true` if the hook ran and succeeded.
    fn run_hook(&self, hook: Hook, instance: &ScriptInstance, stats: &mut FrameStats) -> bool {
        let Ok(mut script) = instance.behaviour().try_borrow_mut() else {
            warn!(
                entity = %instance.owner_id(),
                kind = %instance.kind(),
                hook = hook.name(),
                "script instance already borrowed, skipping hook"
            );
            stats.failures += 1;
            return false;
        };

        match hook.call(&mut *script, &self.host) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    entity = %instance.owner_id(),
                    kind = %instance.kind(),
                    hook = hook.name(),
                    error = %err,
                    "script hook failed"
                );
                stats.failures += 1;
                false
            }
        }
    }
}
