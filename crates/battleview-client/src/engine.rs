//! Client engine — owns all mutable client state, processes queued user
//! commands at tick boundaries, and produces a `FrameSnapshot` per tick.
//!
//! Single-threaded and cooperative: the embedding shell calls `tick` at
//! its frame rate. Backend calls happen inside command handling and are
//! serialized by construction — at most one refresh per tick, further
//! requests coalesce. All backend failures become alerts; the last good
//! state stays on screen.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use battleview_core::commands::UserCommand;
use battleview_core::constants::TASK_PAGE_SIZE;
use battleview_core::enums::{AlertLevel, AnimationPhase, TaskStatus};
use battleview_core::events::{Alert, RenderOp};
use battleview_core::model::{FirepowerUnit, Snapshot, Target, Task};
use battleview_core::types::GeoPoint;

use battleview_anim::Sequencer;
use battleview_view::paging::{task_order, Pager};
use battleview_view::reconcile::reconcile;
use battleview_view::store::{Selection, ViewStore};
use battleview_view::viewport::ViewportController;

use crate::api::{self, Backend};
use crate::error::BackendError;
use crate::validate::validate_fire;

/// Configuration for the client engine.
pub struct EngineConfig {
    pub username: String,
    pub password: String,
    /// Tasks shown per page in the task list.
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: "admin".into(),
            page_size: TASK_PAGE_SIZE,
        }
    }
}

/// Summary stats projected from the reconciled state, recomputed per
/// tick for the header cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub total_targets: usize,
    pub destroyed_targets: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    /// Rounds consumed by completed tasks.
    pub ammo_expended: u32,
}

/// Complete frame state handed to the rendering surface after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub targets: Vec<Target>,
    pub firepowers: Vec<FirepowerUnit>,
    /// Tasks in store order (ingestion order).
    pub tasks: Vec<Task>,
    /// The visible task page, in display order (newest first).
    pub task_window: Vec<Task>,
    pub task_page: usize,
    pub task_total_pages: usize,
    pub selection: Selection,
    pub animation_phase: AnimationPhase,
    pub stats: BattleStats,
    pub alerts: Vec<Alert>,
    pub render_ops: Vec<RenderOp>,
}

/// The client engine. Owns the store, sequencer, pager and viewport.
pub struct ClientEngine<B: Backend> {
    backend: B,
    config: EngineConfig,
    store: ViewStore,
    sequencer: Sequencer,
    task_pager: Pager,
    viewport: ViewportController,
    command_queue: VecDeque<UserCommand>,
    alerts: Vec<Alert>,
    render_ops: Vec<RenderOp>,
    token: Option<String>,
    tick: u64,
    refreshed_this_tick: bool,
}

impl<B: Backend> ClientEngine<B> {
    pub fn new(backend: B, config: EngineConfig) -> Self {
        let page_size = config.page_size.max(1);
        Self {
            backend,
            config,
            store: ViewStore::new(),
            sequencer: Sequencer::new(),
            task_pager: Pager::new(page_size),
            viewport: ViewportController::new(),
            command_queue: VecDeque::new(),
            alerts: Vec::new(),
            render_ops: Vec::new(),
            token: None,
            tick: 0,
            refreshed_this_tick: false,
        }
    }

    /// Queue a user command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: UserCommand) {
        self.command_queue.push_back(command);
    }

    /// Read-only access to the view store.
    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Get a read-only reference to the backend (for tests).
    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a mutable reference to the backend (for tests).
    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Advance the client by one frame and return the resulting state.
    pub fn tick(&mut self, now_ms: f64) -> FrameSnapshot {
        self.tick += 1;
        self.refreshed_this_tick = false;

        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now_ms);
        }

        // Advance the engagement animation and settle its damage.
        let animation = self.sequencer.tick(now_ms);
        self.render_ops.extend(animation.render_ops);
        if let Some(event) = animation.damage {
            if self.store.apply_damage(&event.target_id, event.damage).is_none() {
                log::warn!(
                    "settled animation names vanished target {}, damage dropped",
                    event.target_id
                );
            }
        }

        // Re-clamp the task page before anything renders it.
        self.task_pager.sync_len(self.store.tasks().len());

        // One-shot auto-fit on first data arrival.
        let points = self.renderable_points();
        if let Some(op) = self.viewport.maybe_fit(points) {
            self.render_ops.push(op);
        }

        self.build_frame()
    }

    // --- Command handling ---

    fn handle_command(&mut self, command: UserCommand, now_ms: f64) {
        match command {
            UserCommand::Refresh => {
                // Coalesce: at most one snapshot round trip per tick.
                if !self.refreshed_this_tick {
                    self.refreshed_this_tick = true;
                    self.refresh();
                }
            }
            UserCommand::SelectTarget { target_id } => {
                match self.store.target(&target_id) {
                    // Destroyed targets stay visible but are not
                    // selectable for new engagements.
                    Some(target) if !target.is_destroyed() => {
                        self.store.select_target(Some(target_id));
                    }
                    _ => {}
                }
            }
            UserCommand::SelectTask { task_id } => {
                if self.store.task(&task_id).is_some() {
                    self.jump_to_task(&task_id);
                    self.store.select_task(Some(task_id));
                }
            }
            UserCommand::SelectFirepower { firepower_id } => {
                if self.store.firepower(&firepower_id).is_some() {
                    self.store.select_firepower(Some(firepower_id));
                }
            }
            UserCommand::TaskPage { page } => {
                self.task_pager.sync_len(self.store.tasks().len());
                self.task_pager.set_page(page);
            }
            UserCommand::PublishTasks => {
                if let Err(err) = self.publish_tasks() {
                    self.backend_failure("publishing tasks failed", err);
                }
            }
            UserCommand::AutoRun => {
                if let Err(err) = self.auto_run() {
                    self.backend_failure("auto-run failed", err);
                }
            }
            UserCommand::Fire {
                firepower_id,
                weapon_id,
                target_id,
                ammo_count,
                damage,
            } => {
                self.fire(&firepower_id, &weapon_id, &target_id, ammo_count, damage, now_ms);
            }
            UserCommand::AcceptTask { task_id } => {
                if let Err(err) = self.task_transition(&task_id, /*complete=*/ false) {
                    self.backend_failure("accepting task failed", err);
                }
            }
            UserCommand::CompleteTask { task_id } => {
                if let Err(err) = self.task_transition(&task_id, /*complete=*/ true) {
                    self.backend_failure("completing task failed", err);
                }
            }
            UserCommand::SetZoomFactor { factor } => {
                if let Some(op) = self.viewport.set_zoom_factor(factor) {
                    self.render_ops.push(op);
                }
            }
        }
    }

    // --- Backend paths ---

    fn token(&mut self) -> Result<String, BackendError> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        let token = self
            .backend
            .login(&self.config.username, &self.config.password)?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Full snapshot refresh. On failure the previous collections and
    /// selection remain untouched and an alert is surfaced.
    fn refresh(&mut self) {
        let result = self
            .token()
            .and_then(|token| api::fetch_snapshot(&mut self.backend, &token));
        match result {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(err) => self.backend_failure("snapshot refresh failed", err),
        }
    }

    /// Reconcile a snapshot into the store, shielding the health of a
    /// target with an in-flight animation.
    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let animating: Vec<String> = self
            .sequencer
            .animating_target()
            .map(str::to_owned)
            .into_iter()
            .collect();
        reconcile(&mut self.store, snapshot, &animating);
        self.task_pager.sync_len(self.store.tasks().len());
    }

    fn publish_tasks(&mut self) -> Result<(), BackendError> {
        let token = self.token()?;
        let body = self.backend.publish_decision(&token)?;
        let tasks = api::decode_tasks(&body);
        let first = tasks.first().map(|t| t.task_id.clone());

        // The decision endpoint replaces the task list wholesale; the
        // other collections ride along unchanged through reconcile.
        self.apply_snapshot(Snapshot {
            targets: self.store.targets().to_vec(),
            firepowers: self.store.firepowers().to_vec(),
            tasks,
        });
        self.store.select_task(first.clone());
        if let Some(task_id) = first {
            self.jump_to_task(&task_id);
        }
        Ok(())
    }

    fn auto_run(&mut self) -> Result<(), BackendError> {
        let token = self.token()?;
        self.backend.auto_run(&token)?;

        let snapshot = api::fetch_snapshot(&mut self.backend, &token)?;
        self.apply_snapshot(snapshot);

        // With no prior selection, auto-run lands on the newest state's
        // first task so the control panel is never empty.
        if self.store.selection().task_id.is_none() {
            let first = self.store.tasks().first().map(|t| t.task_id.clone());
            self.store.select_task(first);
        }
        Ok(())
    }

    /// Fire action: validate locally, get backend acknowledgment via
    /// the decision endpoint, then start the engagement animation. The
    /// animation is locally timed from here on; only its start depended
    /// on the backend.
    fn fire(
        &mut self,
        firepower_id: &str,
        weapon_id: &str,
        target_id: &str,
        ammo_count: u32,
        damage: u32,
        now_ms: f64,
    ) {
        if let Err(rejection) =
            validate_fire(&self.store, firepower_id, weapon_id, target_id, ammo_count)
        {
            self.alert(AlertLevel::Warning, rejection.to_string());
            return;
        }
        let (Some(from), Some(to)) = (
            self.store.firepower(firepower_id).map(|fp| fp.position),
            self.store.target(target_id).map(|t| t.position),
        ) else {
            // Validation already resolved both ids.
            return;
        };

        if let Err(err) = self.publish_tasks() {
            self.backend_failure("fire not acknowledged", err);
            return;
        }
        self.sequencer
            .fire(firepower_id, target_id, from, to, damage, now_ms);
    }

    /// Accept or complete a single task; the returned record replaces
    /// the matching task in place, by id.
    fn task_transition(&mut self, task_id: &str, complete: bool) -> Result<(), BackendError> {
        let token = self.token()?;
        let body = if complete {
            self.backend.complete_task(&token, task_id)?
        } else {
            self.backend.accept_task(&token, task_id)?
        };
        let Some(updated) = api::decode_task(&body) else {
            log::warn!("task transition reply had no decodable task: {body}");
            return Ok(());
        };

        let tasks: Vec<Task> = self
            .store
            .tasks()
            .iter()
            .map(|t| {
                if t.task_id == updated.task_id {
                    updated.clone()
                } else {
                    t.clone()
                }
            })
            .collect();
        self.apply_snapshot(Snapshot {
            targets: self.store.targets().to_vec(),
            firepowers: self.store.firepowers().to_vec(),
            tasks,
        });
        Ok(())
    }

    fn backend_failure(&mut self, context: &str, err: BackendError) {
        if matches!(err, BackendError::Auth(_)) {
            // Force a fresh login on the next call.
            self.token = None;
        }
        log::warn!("{context}: {err}");
        self.alert(AlertLevel::Critical, format!("{context}: {err}"));
    }

    fn alert(&mut self, level: AlertLevel, message: String) {
        self.alerts.push(Alert {
            level,
            message,
            tick: self.tick,
        });
    }

    // --- Frame assembly ---

    fn jump_to_task(&mut self, task_id: &str) {
        let order = task_order(self.store.tasks());
        self.task_pager.sync_len(order.len());
        if let Some(index) = order
            .iter()
            .position(|&i| self.store.tasks()[i].task_id == task_id)
        {
            self.task_pager.jump_to_containing(index);
        }
    }

    fn renderable_points(&self) -> Vec<GeoPoint> {
        self.store
            .firepowers()
            .iter()
            .map(|fp| fp.position)
            .chain(self.store.targets().iter().map(|t| t.position))
            .collect()
    }

    fn battle_stats(&self) -> BattleStats {
        let tasks = self.store.tasks();
        BattleStats {
            total_targets: self.store.targets().len(),
            destroyed_targets: self
                .store
                .targets()
                .iter()
                .filter(|t| t.is_destroyed())
                .count(),
            active_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Accepted)
                .count(),
            completed_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            ammo_expended: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .map(|t| t.ammo_count)
                .sum(),
        }
    }

    fn build_frame(&mut self) -> FrameSnapshot {
        let order = task_order(self.store.tasks());
        let task_window: Vec<Task> = order[self.task_pager.window()]
            .iter()
            .map(|&i| self.store.tasks()[i].clone())
            .collect();

        FrameSnapshot {
            tick: self.tick,
            targets: self.store.targets().to_vec(),
            firepowers: self.store.firepowers().to_vec(),
            tasks: self.store.tasks().to_vec(),
            task_window,
            task_page: self.task_pager.page(),
            task_total_pages: self.task_pager.total_pages(),
            selection: self.store.selection().clone(),
            animation_phase: self.sequencer.phase(),
            stats: self.battle_stats(),
            alerts: std::mem::take(&mut self.alerts),
            render_ops: std::mem::take(&mut self.render_ops),
        }
    }
}
