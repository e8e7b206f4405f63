//! Build units and their lazily configured state.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tracing::{debug, info, warn};

use super::types::{BuildError, BuildId, BuildState};

/// One build participating in a composite.
pub trait BuildUnit {
  fn id(&self) -> &BuildId;

  /// True when the build was only pulled in as a dependency substitution target.
  fn is_implicit(&self) -> bool;

  /// Run `visit` against the configured state of this build.
  ///
  /// Configures the build first if nobody has asked for its state yet. This may
  /// run arbitrary configuration, including nested plugin resolution, so callers
  /// must not hold locks across it.
  fn with_state<T>(&self, visit: impl FnOnce(&BuildState) -> T) -> Result<T, BuildError>;
}

/// Produces the state of a build when it is first consulted.
pub type BuildLoader = Box<dyn Fn(&BuildId) -> Result<BuildState, BuildError> + Send + Sync>;

enum Slot {
  Unconfigured,
  Configuring(ThreadId),
  Configured(Arc<BuildState>),
}

/// A build explicitly or implicitly included in the composite.
///
/// The state is configured at most once. A second request from the thread that
/// is currently configuring the build is a cycle; requests from other threads
/// block until configuration finishes. A failed configuration leaves the build
/// unconfigured so the error is reported to every caller that retries.
pub struct IncludedBuild {
  id: BuildId,
  implicit: bool,
  loader: BuildLoader,
  slot: Mutex<Slot>,
  ready: Condvar,
}

impl IncludedBuild {
  pub fn new(
    id: BuildId,
    implicit: bool,
    loader: impl Fn(&BuildId) -> Result<BuildState, BuildError> + Send + Sync + 'static,
  ) -> Self {
    Self {
      id,
      implicit,
      loader: Box::new(loader),
      slot: Mutex::new(Slot::Unconfigured),
      ready: Condvar::new(),
    }
  }

  /// Whether the state of this build has already been materialized.
  pub fn is_configured(&self) -> bool {
    matches!(*self.lock_slot(), Slot::Configured(_))
  }

  /// The configured state, configuring the build on first use.
  pub fn state(&self) -> Result<Arc<BuildState>, BuildError> {
    let current = thread::current().id();
    let mut slot = self.lock_slot();

    loop {
      match &*slot {
        Slot::Configured(state) => return Ok(Arc::clone(state)),
        Slot::Configuring(owner) if *owner == current => {
          return Err(BuildError::ConfigurationCycle { build: self.id.clone() });
        }
        Slot::Configuring(_) => {
          debug!(build = %self.id, "waiting for build configured by another thread");
          slot = self.ready.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
        Slot::Unconfigured => break,
      }
    }

    *slot = Slot::Configuring(current);
    drop(slot);

    let guard = ResetOnUnwind { build: self };
    debug!(build = %self.id, "configuring build");
    let result = (self.loader)(&self.id);
    guard.disarm();

    let mut slot = self.lock_slot();
    let result = match result {
      Ok(state) => {
        info!(
          build = %self.id,
          projects = state.projects().len(),
          publications = state.publications().len(),
          "configured build"
        );
        let state = Arc::new(state);
        *slot = Slot::Configured(Arc::clone(&state));
        Ok(state)
      }
      Err(err) => {
        warn!(build = %self.id, error = %err, "build configuration failed");
        *slot = Slot::Unconfigured;
        Err(err)
      }
    };
    drop(slot);
    self.ready.notify_all();

    result
  }

  fn lock_slot(&self) -> MutexGuard<'_, Slot> {
    self.slot.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl BuildUnit for IncludedBuild {
  fn id(&self) -> &BuildId {
    &self.id
  }

  fn is_implicit(&self) -> bool {
    self.implicit
  }

  fn with_state<T>(&self, visit: impl FnOnce(&BuildState) -> T) -> Result<T, BuildError> {
    let state = self.state()?;
    Ok(visit(&state))
  }
}

impl fmt::Debug for IncludedBuild {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("IncludedBuild")
      .field("id", &self.id)
      .field("implicit", &self.implicit)
      .field("configured", &self.is_configured())
      .finish()
  }
}

/// Puts the build back to unconfigured if the loader panics, so waiters wake up.
struct ResetOnUnwind<'a> {
  build: &'a IncludedBuild,
}

impl ResetOnUnwind<'_> {
  fn disarm(self) {
    std::mem::forget(self);
  }
}

impl Drop for ResetOnUnwind<'_> {
  fn drop(&mut self) {
    *self.build.lock_slot() = Slot::Unconfigured;
    self.build.ready.notify_all();
  }
}
