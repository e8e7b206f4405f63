//! Memoized resolution results, one cache per resolver instance.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tracing::trace;

use super::binding::PluginResolution;
use super::types::ResolveError;
use crate::plugin::PluginId;

/// The remembered answer for one plugin id.
#[derive(Debug, Clone)]
pub enum CachedResolution {
  Found(Arc<PluginResolution>),
  NotFound,
}

enum Entry {
  Pending(ThreadId),
  Ready(CachedResolution),
}

/// Maps plugin ids to their resolution, computing each at most once.
///
/// The lock is never held while a result is computed. Another thread asking
/// for an id that is being computed waits for that result; the computing
/// thread asking again is reported as [`ResolveError::Cycle`]. Failed
/// computations are forgotten so they are retried by the next caller.
#[derive(Default)]
pub struct ResolutionCache {
  entries: Mutex<HashMap<PluginId, Entry>>,
  ready: Condvar,
}

impl ResolutionCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// The cached answer for `id`, if one has been computed.
  pub fn get(&self, id: &PluginId) -> Option<CachedResolution> {
    match self.lock().get(id) {
      Some(Entry::Ready(resolution)) => Some(resolution.clone()),
      _ => None,
    }
  }

  /// Number of ids with a computed answer.
  pub fn len(&self) -> usize {
    self
      .lock()
      .values()
      .filter(|entry| matches!(entry, Entry::Ready(_)))
      .count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Return the cached answer for `id`, running `compute` if there is none yet.
  pub fn get_or_compute(
    &self,
    id: &PluginId,
    compute: impl FnOnce() -> Result<CachedResolution, ResolveError>,
  ) -> Result<CachedResolution, ResolveError> {
    let current = thread::current().id();
    let mut entries = self.lock();

    loop {
      match entries.get(id) {
        Some(Entry::Ready(resolution)) => {
          trace!(plugin = %id, "resolution cache hit");
          return Ok(resolution.clone());
        }
        Some(Entry::Pending(owner)) if *owner == current => {
          return Err(ResolveError::Cycle { plugin_id: id.clone() });
        }
        Some(Entry::Pending(_)) => {
          entries = self.ready.wait(entries).unwrap_or_else(PoisonError::into_inner);
        }
        None => break,
      }
    }

    entries.insert(id.clone(), Entry::Pending(current));
    drop(entries);

    let guard = ForgetOnUnwind { cache: self, id };
    let result = compute();
    guard.disarm();

    let mut entries = self.lock();
    match &result {
      Ok(resolution) => {
        entries.insert(id.clone(), Entry::Ready(resolution.clone()));
      }
      Err(_) => {
        entries.remove(id);
      }
    }
    drop(entries);
    self.ready.notify_all();

    result
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<PluginId, Entry>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

struct ForgetOnUnwind<'a> {
  cache: &'a ResolutionCache,
  id: &'a PluginId,
}

impl ForgetOnUnwind<'_> {
  fn disarm(self) {
    std::mem::forget(self);
  }
}

impl Drop for ForgetOnUnwind<'_> {
  fn drop(&mut self) {
    self.cache.lock().remove(self.id);
    self.cache.ready.notify_all();
  }
}
