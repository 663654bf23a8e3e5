/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Concurrent routing-key to destination map.

use crate::error::CloneError;
use crate::observability::events;
use crate::sink::{ConfigurableSink, Sink};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, OnceLock};
use tracing::debug;

const COMPONENT: &str = "destination_cache";

/// How concurrent first lookups of the same key are resolved.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// At most one destination is ever built per key; concurrent first lookups of that
    /// key wait for it to be built.
    #[default]
    SingleFlight,
    /// Every racing first lookup builds its own candidate and the first insert wins.
    /// Losing candidates are closed before they are dropped.
    FirstWriterWins,
}

impl Display for CachePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CachePolicy::SingleFlight => write!(f, "single_flight"),
            CachePolicy::FirstWriterWins => write!(f, "first_writer_wins"),
        }
    }
}

/// Per-key cell. Destinations are built outside the map's shard locks, so a slow
/// build only holds up lookups of its own key.
#[derive(Default)]
struct Slot {
    destination: OnceLock<Arc<dyn ConfigurableSink>>,
    building: Mutex<()>,
}

/// Grow-only map from routing key to the destination bound to it.
///
/// Once a key is bound its destination never changes and is never removed.
pub struct DestinationCache {
    policy: CachePolicy,
    slots: DashMap<String, Arc<Slot>>,
}

impl DestinationCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            slots: DashMap::new(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    fn slot(&self, key: &str) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(key.to_string()).or_default().value())
    }

    /// Returns the destination bound to `key`, building and binding one with `build`
    /// when the key is new.
    ///
    /// A failed build leaves the key unbound, so a later lookup tries again.
    pub fn resolve<F>(&self, key: &str, build: F) -> Result<Arc<dyn ConfigurableSink>, CloneError>
    where
        F: FnOnce() -> Result<Arc<dyn ConfigurableSink>, CloneError>,
    {
        let slot = self.slot(key);
        if let Some(existing) = slot.destination.get() {
            return Ok(Arc::clone(existing));
        }

        match self.policy {
            CachePolicy::SingleFlight => self.resolve_single_flight(key, &slot, build),
            CachePolicy::FirstWriterWins => self.resolve_first_writer_wins(key, &slot, build),
        }
    }

    fn resolve_single_flight<F>(
        &self,
        key: &str,
        slot: &Slot,
        build: F,
    ) -> Result<Arc<dyn ConfigurableSink>, CloneError>
    where
        F: FnOnce() -> Result<Arc<dyn ConfigurableSink>, CloneError>,
    {
        let _building = slot.building.lock();
        if let Some(existing) = slot.destination.get() {
            return Ok(Arc::clone(existing));
        }

        let destination = build()?;
        debug!(
            event = events::DESTINATION_INSERT,
            component = COMPONENT,
            key,
            sink = destination.name(),
            policy = %self.policy,
            "bound new destination"
        );
        Ok(Arc::clone(slot.destination.get_or_init(|| destination)))
    }

    fn resolve_first_writer_wins<F>(
        &self,
        key: &str,
        slot: &Slot,
        build: F,
    ) -> Result<Arc<dyn ConfigurableSink>, CloneError>
    where
        F: FnOnce() -> Result<Arc<dyn ConfigurableSink>, CloneError>,
    {
        let candidate = build()?;
        let winner = Arc::clone(slot.destination.get_or_init(|| Arc::clone(&candidate)));

        if Arc::ptr_eq(&winner, &candidate) {
            debug!(
                event = events::DESTINATION_INSERT,
                component = COMPONENT,
                key,
                sink = candidate.name(),
                policy = %self.policy,
                "bound new destination"
            );
        } else {
            debug!(
                event = events::DESTINATION_CANDIDATE_DISCARDED,
                component = COMPONENT,
                key,
                sink = candidate.name(),
                "lost the race for key, closing candidate"
            );
            candidate.close();
        }
        Ok(winner)
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ConfigurableSink>> {
        self.slots
            .get(key)
            .and_then(|slot| slot.destination.get().cloned())
    }

    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.destination.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bound keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|(key, _)| key).collect()
    }

    /// Every bound destination, ordered by key.
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn ConfigurableSink>)> {
        let mut entries: Vec<(String, Arc<dyn ConfigurableSink>)> = self
            .slots
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .destination
                    .get()
                    .map(|destination| (entry.key().clone(), Arc::clone(destination)))
            })
            .collect();
        entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        entries
    }
}
