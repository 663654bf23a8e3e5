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

use super::{Config, LayoutConfig, RouterConfig, SinkConfig};
use crate::error::{ConfigError, PropertyError};
use crate::keyed_router::KeyedRouter;
use crate::layout::{Layout, LevelPatternLayout, PatternLayout};
use crate::log_bridge::KeyedLogger;
use crate::observability::events;
use crate::sink::{ConfigurableSink, Sink, SinkRegistry};
use crate::substitution::{EnvSubstitutor, Substitutor};
use log::LevelFilter;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

const COMPONENT: &str = "logging_setup";

/// Sinks and routers built from a [`Config`], all activated.
///
/// Owns every sink and router it built. Call [`shutdown`](Self::shutdown) to close
/// them, including the per-key destinations the routers created.
pub struct LoggingSetup {
    sinks: BTreeMap<String, Arc<dyn ConfigurableSink>>,
    routers: BTreeMap<String, Arc<KeyedRouter>>,
    root: Arc<dyn Sink>,
    root_name: String,
    level: LevelFilter,
}

impl LoggingSetup {
    /// Builds with the default sink kinds and process-environment substitution.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::build(config, &SinkRegistry::default(), Arc::new(EnvSubstitutor))
    }

    pub fn build(
        config: &Config,
        registry: &SinkRegistry,
        substitutor: Arc<dyn Substitutor>,
    ) -> Result<Self, ConfigError> {
        let level = LevelFilter::from_str(config.level.trim())
            .map_err(|_| ConfigError::InvalidLevel(config.level.clone()))?;

        let mut sinks = BTreeMap::new();
        for (name, sink_config) in &config.sinks {
            let sink = build_sink(name, sink_config, registry, substitutor.as_ref())?;
            sinks.insert(name.clone(), sink);
        }

        let mut routers = BTreeMap::new();
        for router_config in &config.routers {
            let name = &router_config.name;
            if sinks.contains_key(name) || routers.contains_key(name) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
            let router = build_router(router_config, &sinks, substitutor.clone())?;
            routers.insert(name.clone(), Arc::new(router));
        }

        let root: Arc<dyn Sink> = match (routers.get(&config.root), sinks.get(&config.root)) {
            (Some(router), _) => router.clone(),
            (None, Some(sink)) => Arc::new(Arc::clone(sink)),
            (None, None) => return Err(ConfigError::UnknownRoot(config.root.clone())),
        };

        Ok(Self {
            sinks,
            routers,
            root,
            root_name: config.root.clone(),
            level,
        })
    }

    /// The sink every logged event is sent to.
    pub fn root(&self) -> Arc<dyn Sink> {
        self.root.clone()
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn router(&self, name: &str) -> Option<Arc<KeyedRouter>> {
        self.routers.get(name).cloned()
    }

    pub fn sink(&self, name: &str) -> Option<Arc<dyn ConfigurableSink>> {
        self.sinks.get(name).cloned()
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// A `log` facade adapter feeding the root sink at the configured level.
    pub fn logger(&self) -> KeyedLogger {
        KeyedLogger::new(self.root(), self.level)
    }

    /// Closes routers, then each router's destinations, then the named sinks.
    pub fn shutdown(&self) {
        let mut destinations = 0;
        for router in self.routers.values() {
            router.close();
            for (_, destination) in router.destinations() {
                destination.close();
                destinations += 1;
            }
        }
        for sink in self.sinks.values() {
            sink.close();
        }
        info!(
            event = events::SETUP_SHUTDOWN,
            component = COMPONENT,
            routers = self.routers.len(),
            sinks = self.sinks.len(),
            destinations,
            "logging setup shut down"
        );
    }
}

fn build_layout(config: &LayoutConfig) -> Arc<dyn Layout> {
    match &config.debug_pattern {
        Some(debug_pattern) => Arc::new(
            LevelPatternLayout::new(config.pattern.as_str())
                .with_debug_pattern(debug_pattern.as_str()),
        ),
        None => Arc::new(PatternLayout::new(config.pattern.as_str())),
    }
}

fn build_sink(
    name: &str,
    config: &SinkConfig,
    registry: &SinkRegistry,
    substitutor: &dyn Substitutor,
) -> Result<Arc<dyn ConfigurableSink>, ConfigError> {
    let mut sink = registry.create(&config.kind)?;
    let property_error = |source: PropertyError| ConfigError::Property {
        sink: name.to_string(),
        source,
    };

    if sink.has_writable_property("name") {
        sink.set_property("name", name).map_err(property_error)?;
    }
    for (property, value) in &config.properties {
        let value = substitutor.substitute(&value.to_string());
        sink.set_property(property, &value).map_err(property_error)?;
    }
    if let Some(layout) = &config.layout {
        sink.set_layout(build_layout(layout));
    }
    sink.activate().map_err(|source| ConfigError::Activation {
        sink: name.to_string(),
        source,
    })?;

    debug!(
        event = events::SETUP_SINK_BUILT,
        component = COMPONENT,
        sink = name,
        sink_type = sink.sink_type(),
        "built sink"
    );
    Ok(Arc::from(sink))
}

fn build_router(
    config: &RouterConfig,
    sinks: &BTreeMap<String, Arc<dyn ConfigurableSink>>,
    substitutor: Arc<dyn Substitutor>,
) -> Result<KeyedRouter, ConfigError> {
    let mut router = KeyedRouter::new(config.name.as_str());
    router.set_substitutor(substitutor)?;
    router.set_cache_policy(config.cache_policy)?;
    if let Some(property_name) = &config.property_name {
        router.set_property_name(property_name.as_str())?;
    }
    if let Some(layout) = &config.layout {
        router.set_layout(build_layout(layout))?;
    }
    if let Some(sink_ref) = &config.sink_ref {
        let template = sinks
            .get(sink_ref)
            .ok_or_else(|| ConfigError::UnknownSinkRef(sink_ref.clone()))?;
        router.add_sink(template.clone())?;
    }
    router.activate()?;

    debug!(
        event = events::SETUP_ROUTER_BUILT,
        component = COMPONENT,
        router = config.name.as_str(),
        sink = config.sink_ref.as_deref().unwrap_or_default(),
        policy = %config.cache_policy,
        "built router"
    );
    Ok(router)
}
