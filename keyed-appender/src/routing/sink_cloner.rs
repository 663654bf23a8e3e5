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

//! Prototype cloner: stamps out per-key copies of a template sink.

use crate::error::CloneError;
use crate::observability::events;
use crate::sink::{ConfigurableSink, Sink};
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "sink_cloner";
const SINK_CLONER_TAG: &str = "SinkCloner:";
const SINK_CLONER_FN_CREATE_TAG: &str = "create():";

/// Copies a template sink, overriding exactly one named property per copy.
///
/// Derived purely from the template and the property name, so recomputing it is
/// harmless. Whether the property can be overridden is probed once at construction;
/// when it cannot, [`SinkCloner::create`] hands back the template itself.
pub struct SinkCloner {
    template: Arc<dyn ConfigurableSink>,
    property_name: String,
    overridable: bool,
}

impl SinkCloner {
    pub fn new(template: Arc<dyn ConfigurableSink>, property_name: impl Into<String>) -> Self {
        let property_name = property_name.into();
        let overridable = verify_property(template.as_ref(), &property_name);
        debug!(
            event = events::CLONER_COMPUTE,
            component = COMPONENT,
            sink = template.name(),
            sink_type = template.sink_type(),
            property = property_name.as_str(),
            overridable,
            "computed sink cloner"
        );
        Self {
            template,
            property_name,
            overridable,
        }
    }

    pub fn is_overridable(&self) -> bool {
        self.overridable
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn template(&self) -> &Arc<dyn ConfigurableSink> {
        &self.template
    }

    /// Builds a new, activated sink configured like the template except for the
    /// overridden property, which is set to `override_value`.
    ///
    /// The template's layout is shared, not copied.
    pub fn create(&self, override_value: &str) -> Result<Arc<dyn ConfigurableSink>, CloneError> {
        if !self.overridable {
            return Ok(self.template.clone());
        }

        let sink_type = self.template.sink_type();
        let mut output = self
            .template
            .new_instance()
            .map_err(|source| CloneError::Construct { sink_type, source })?;

        for (name, value) in self.template.list_properties() {
            if name == self.property_name {
                continue;
            }
            output
                .set_property(name, &value.to_string())
                .map_err(|source| CloneError::Property { sink_type, source })?;
        }
        output
            .set_property(&self.property_name, override_value)
            .map_err(|source| CloneError::Property { sink_type, source })?;

        if let Some(layout) = self.template.layout() {
            output.set_layout(layout);
        }

        output
            .activate()
            .map_err(|source| CloneError::Activate { sink_type, source })?;

        debug!(
            event = events::CLONE_CREATE_OK,
            component = COMPONENT,
            sink_type,
            property = self.property_name.as_str(),
            override_value,
            "{SINK_CLONER_TAG}{SINK_CLONER_FN_CREATE_TAG} created sink copy"
        );
        Ok(Arc::from(output))
    }
}

/// Whether `name` is a writable property of the sink's concrete type.
///
/// Logs a warning when it is not, since every event will then go to the template.
pub fn verify_property(sink: &dyn ConfigurableSink, name: &str) -> bool {
    if sink.has_writable_property(name) {
        return true;
    }
    warn!(
        event = events::CLONER_PROPERTY_MISSING,
        component = COMPONENT,
        sink = sink.name(),
        sink_type = sink.sink_type(),
        property = name,
        "No property named '{name}' was found on sink of type {} (all events will go to the default sink)",
        sink.sink_type()
    );
    false
}
