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

//! The context-keyed router sink.

use crate::error::{ConfigError, SinkError};
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::observability::{events, fields};
use crate::routing::destination_cache::{CachePolicy, DestinationCache};
use crate::routing::sink_cloner::SinkCloner;
use crate::sink::{ConfigurableSink, Sink};
use crate::substitution::{EnvSubstitutor, Substitutor};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info, warn};

const COMPONENT: &str = "keyed_router";
const KEYED_ROUTER_TAG: &str = "KeyedRouter:";
const KEYED_ROUTER_FN_ACTIVATE_TAG: &str = "activate():";
const KEYED_ROUTER_FN_ADD_SINK_TAG: &str = "add_sink():";
const KEYED_ROUTER_FN_RESOLVE_TAG: &str = "resolve_destination():";

/// Lifecycle of a [`KeyedRouter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum RouterState {
    /// Accepting configuration calls.
    Unconfigured = 0,
    /// Routing events.
    Active = 1,
    /// Terminal.
    Closed = 2,
}

impl RouterState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => RouterState::Unconfigured,
            1 => RouterState::Active,
            _ => RouterState::Closed,
        }
    }
}

impl Display for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterState::Unconfigured => write!(f, "unconfigured"),
            RouterState::Active => write!(f, "active"),
            RouterState::Closed => write!(f, "closed"),
        }
    }
}

/// A sink that routes each event to a destination chosen by the event's diagnostic
/// context.
///
/// One template sink is attached at configuration time. The first event seen for a
/// given context gets its own copy of the template, identical except for the property
/// named by [`set_property_name`](Self::set_property_name), whose value is the layout
/// output for that event after `${NAME}` substitution. Every later event carrying the
/// same context is delivered to that same copy. Events without a context go to the
/// template itself.
///
/// Copies live as long as the router; nothing is ever evicted.
///
/// ```
/// use keyed_appender::{
///     ConfigurableSink, DiagnosticContext, FileSink, KeyedRouter, LogEvent, PatternLayout,
///     PropertyValue, Sink,
/// };
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut template = FileSink::new();
/// template
///     .set_property("path", &format!("{}/default.log", dir.path().display()))
///     .unwrap();
/// template.activate().unwrap();
///
/// let mut router = KeyedRouter::new("DISPATCH");
/// router.set_property_name("path").unwrap();
/// router
///     .set_layout(Arc::new(PatternLayout::new(&format!(
///         "{}/logs/%x.log",
///         dir.path().display()
///     ))))
///     .unwrap();
/// router.add_sink(Arc::new(template)).unwrap();
/// router.activate().unwrap();
///
/// let event = LogEvent::new(log::Level::Info, "demo", "hello")
///     .with_context(DiagnosticContext::from_iter(["alt"]));
/// router.append(&event).unwrap();
///
/// let destination = router.destination("alt").unwrap();
/// assert_eq!(
///     destination.property("path"),
///     Some(PropertyValue::Text(format!("{}/logs/alt.log", dir.path().display())))
/// );
/// ```
pub struct KeyedRouter {
    name: String,
    template: Option<Arc<dyn ConfigurableSink>>,
    property_name: Option<String>,
    layout: Option<Arc<dyn Layout>>,
    substitutor: Arc<dyn Substitutor>,
    cloner: OnceLock<SinkCloner>,
    destinations: DestinationCache,
    state: AtomicU8,
    dropped_events: AtomicU64,
}

impl KeyedRouter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: None,
            property_name: None,
            layout: None,
            substitutor: Arc::new(EnvSubstitutor),
            cloner: OnceLock::new(),
            destinations: DestinationCache::new(CachePolicy::default()),
            state: AtomicU8::new(RouterState::Unconfigured as u8),
            dropped_events: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> RouterState {
        RouterState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn ensure_configurable(&self) -> Result<(), ConfigError> {
        match self.state() {
            RouterState::Unconfigured => Ok(()),
            state => Err(ConfigError::NotConfigurable {
                router: self.name.clone(),
                state,
            }),
        }
    }

    /// Names the template property overridden per routing key, e.g. `path`.
    ///
    /// `${NAME}` tokens are expanded once, when the first keyed event arrives.
    pub fn set_property_name(&mut self, property_name: impl Into<String>) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        self.property_name = Some(property_name.into());
        Ok(())
    }

    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// Sets the layout that turns an event into the override value.
    pub fn set_layout(&mut self, layout: Arc<dyn Layout>) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        self.layout = Some(layout);
        Ok(())
    }

    pub fn layout(&self) -> Option<&Arc<dyn Layout>> {
        self.layout.as_ref()
    }

    /// Replaces the default process-environment substitutor.
    pub fn set_substitutor(&mut self, substitutor: Arc<dyn Substitutor>) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        self.substitutor = substitutor;
        Ok(())
    }

    pub fn set_cache_policy(&mut self, policy: CachePolicy) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        self.destinations = DestinationCache::new(policy);
        Ok(())
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.destinations.policy()
    }

    /// Attaches the template sink. Only one template may ever be attached.
    pub fn add_sink(&mut self, sink: Arc<dyn ConfigurableSink>) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        if let Some(existing) = &self.template {
            warn!(
                event = events::ROUTER_TEMPLATE_REJECTED,
                component = COMPONENT,
                router = self.name.as_str(),
                sink = sink.name(),
                existing = existing.name(),
                "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_ADD_SINK_TAG} template already attached"
            );
            return Err(ConfigError::TemplateAlreadyAttached {
                router: self.name.clone(),
                existing: existing.name().to_string(),
            });
        }
        debug!(
            event = events::ROUTER_TEMPLATE_ATTACH,
            component = COMPONENT,
            router = self.name.as_str(),
            sink = sink.name(),
            sink_type = sink.sink_type(),
            "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_ADD_SINK_TAG} attached template"
        );
        self.template = Some(sink);
        Ok(())
    }

    /// The attached template as a zero or one element list. Per-key copies are never
    /// listed here.
    pub fn attached_sinks(&self) -> Vec<Arc<dyn ConfigurableSink>> {
        self.template.iter().cloned().collect()
    }

    pub fn sink(&self, name: &str) -> Option<Arc<dyn ConfigurableSink>> {
        self.template
            .as_ref()
            .filter(|template| template.name() == name)
            .cloned()
    }

    pub fn is_attached(&self, sink: &Arc<dyn ConfigurableSink>) -> bool {
        self.template
            .as_ref()
            .is_some_and(|template| Arc::ptr_eq(template, sink))
    }

    /// Detaches `sink` if it is the template. Returns whether anything was detached.
    pub fn remove_sink(&mut self, sink: &Arc<dyn ConfigurableSink>) -> Result<bool, ConfigError> {
        self.ensure_configurable()?;
        if self.is_attached(sink) {
            self.template = None;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn remove_sink_named(&mut self, name: &str) -> Result<bool, ConfigError> {
        self.ensure_configurable()?;
        if self.sink(name).is_some() {
            self.template = None;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn remove_all_sinks(&mut self) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        self.template = None;
        Ok(())
    }

    /// Validates the configuration and starts routing.
    ///
    /// Requirements are checked in order: layout, property name, template. The first
    /// one missing is reported and the router stays unconfigured.
    pub fn activate(&mut self) -> Result<(), ConfigError> {
        self.ensure_configurable()?;
        if let Err(err) = self.validate() {
            error!(
                event = events::ROUTER_ACTIVATE_FAILED,
                component = COMPONENT,
                router = self.name.as_str(),
                err = %err,
                "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_ACTIVATE_TAG} activation failed"
            );
            return Err(err);
        }

        self.state
            .store(RouterState::Active as u8, Ordering::Release);
        info!(
            event = events::ROUTER_ACTIVATE_OK,
            component = COMPONENT,
            router = self.name.as_str(),
            property = self.property_name.as_deref().unwrap_or_default(),
            policy = %self.cache_policy(),
            "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_ACTIVATE_TAG} router active"
        );
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.is_none() {
            return Err(ConfigError::MissingLayout {
                router: self.name.clone(),
            });
        }
        if self
            .property_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
        {
            return Err(ConfigError::MissingPropertyName {
                router: self.name.clone(),
            });
        }
        if self.template.is_none() {
            return Err(ConfigError::MissingTemplate {
                router: self.name.clone(),
            });
        }
        Ok(())
    }

    /// `None` until the first keyed event, then whether the template exposes the
    /// override property.
    pub fn is_overridable(&self) -> Option<bool> {
        self.cloner.get().map(SinkCloner::is_overridable)
    }

    pub fn destination(&self, key: &str) -> Option<Arc<dyn ConfigurableSink>> {
        self.destinations.get(key)
    }

    pub fn destination_keys(&self) -> Vec<String> {
        self.destinations.keys()
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// Every per-key destination created so far, ordered by key.
    pub fn destinations(&self) -> Vec<(String, Arc<dyn ConfigurableSink>)> {
        self.destinations.snapshot()
    }

    /// Events dropped because no destination could be built for their key.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }

    fn not_active(&self, state: RouterState) -> SinkError {
        SinkError::RouterNotActive {
            router: self.name.clone(),
            state,
        }
    }

    /// Picks the destination for `event`, building and caching a new one when its
    /// context has not been seen before.
    ///
    /// Returns `Ok(None)` when a destination was needed but could not be built; the
    /// failure is logged and counted, and a later event with the same context tries
    /// again.
    pub fn resolve_destination(
        &self,
        event: &LogEvent,
    ) -> Result<Option<Arc<dyn ConfigurableSink>>, SinkError> {
        let state = self.state();
        if state != RouterState::Active {
            return Err(self.not_active(state));
        }
        let (Some(template), Some(layout), Some(property_name)) =
            (&self.template, &self.layout, &self.property_name)
        else {
            return Err(self.not_active(state));
        };

        let Some(key) = event.context_key() else {
            return Ok(Some(Arc::clone(template)));
        };

        let cloner = self.cloner.get_or_init(|| {
            SinkCloner::new(
                Arc::clone(template),
                self.substitutor.substitute(property_name),
            )
        });
        if !cloner.is_overridable() {
            return Ok(Some(Arc::clone(template)));
        }

        let resolved = self.destinations.resolve(&key, || {
            let override_value = self.substitutor.substitute(&layout.format(event));
            debug!(
                event = events::ROUTER_DESTINATION_BUILD,
                component = COMPONENT,
                router = self.name.as_str(),
                key = key.as_str(),
                override_value = override_value.as_str(),
                "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_RESOLVE_TAG} building destination"
            );
            cloner.create(&override_value)
        });

        match resolved {
            Ok(destination) => Ok(Some(destination)),
            Err(err) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
                error!(
                    event = events::CLONE_CREATE_FAILED,
                    component = COMPONENT,
                    router = self.name.as_str(),
                    key = key.as_str(),
                    property = cloner.property_name(),
                    err = %err,
                    "{KEYED_ROUTER_TAG}{KEYED_ROUTER_FN_RESOLVE_TAG} unable to build destination, dropping event"
                );
                Ok(None)
            }
        }
    }
}

impl Sink for KeyedRouter {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, event: &LogEvent) -> Result<(), SinkError> {
        match self.resolve_destination(event)? {
            Some(destination) => destination.append(event),
            None => {
                debug!(
                    event = events::ROUTER_EVENT_DROPPED,
                    component = COMPONENT,
                    router = self.name.as_str(),
                    key = fields::format_optional_key(event.context_key().as_deref()),
                    "{KEYED_ROUTER_TAG} event dropped"
                );
                Ok(())
            }
        }
    }

    /// Moves the router to its terminal state. The template and per-key destinations
    /// are left open for their owner to close.
    fn close(&self) {
        let previous = self.state.swap(RouterState::Closed as u8, Ordering::AcqRel);
        if RouterState::from_u8(previous) == RouterState::Closed {
            return;
        }
        debug!(
            event = events::ROUTER_CLOSE,
            component = COMPONENT,
            router = self.name.as_str(),
            destinations = self.destinations.len(),
            "{KEYED_ROUTER_TAG} closed"
        );
    }
}
