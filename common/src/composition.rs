//! Registration order of application-wide capabilities.
//!
//! The theme engine must be registered after everything else that affects the
//! UI, since the component library setup reads the configured preset.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::runtime_config::RuntimeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Router,
    HttpClient,
    Toast,
    Confirm,
    Alert,
    RuntimeConfig,
    Theme,
}

impl Capability {
    /// Required registration order.
    pub const ORDER: [Capability; 7] = [
        Capability::Router,
        Capability::HttpClient,
        Capability::Toast,
        Capability::Confirm,
        Capability::Alert,
        Capability::RuntimeConfig,
        Capability::Theme,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Router => "router",
            Capability::HttpClient => "http client",
            Capability::Toast => "toast service",
            Capability::Confirm => "confirmation service",
            Capability::Alert => "alert popups",
            Capability::RuntimeConfig => "runtime config",
            Capability::Theme => "theme engine",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("{0} is registered twice")]
    Duplicate(Capability),
    #[error("{got} registered where {expected} was expected")]
    OutOfOrder { expected: Capability, got: Capability },
    #[error("{0} was never registered")]
    Incomplete(Capability),
}

/// Tracks registrations and enforces [`Capability::ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionPlan {
    registered: Vec<Capability>,
}

impl CompositionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, capability: Capability) -> Result<(), CompositionError> {
        let next = Capability::ORDER.get(self.registered.len());
        let Some(&expected) = next.filter(|_| !self.registered.contains(&capability)) else {
            return Err(CompositionError::Duplicate(capability));
        };
        if expected != capability {
            return Err(CompositionError::OutOfOrder { expected, got: capability });
        }
        self.registered.push(capability);
        Ok(())
    }

    pub fn registered(&self) -> &[Capability] {
        &self.registered
    }

    /// Checks every capability was registered.
    pub fn finish(self) -> Result<Vec<Capability>, CompositionError> {
        match Capability::ORDER.get(self.registered.len()) {
            Some(&missing) => Err(CompositionError::Incomplete(missing)),
            None => Ok(self.registered),
        }
    }
}

/// Values every view can reach without explicit passing. Cloning shares the
/// same instances.
#[derive(Debug)]
pub struct AmbientBindings<H> {
    pub config: Rc<RuntimeConfig>,
    pub http: Rc<H>,
}

impl<H> AmbientBindings<H> {
    pub fn new(config: RuntimeConfig, http: H) -> Self {
        Self {
            config: Rc::new(config),
            http: Rc::new(http),
        }
    }
}

impl<H> Clone for AmbientBindings<H> {
    fn clone(&self) -> Self {
        Self {
            config: Rc::clone(&self.config),
            http: Rc::clone(&self.http),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_plan_in_order_finishes() {
        let mut plan = CompositionPlan::new();
        for capability in Capability::ORDER {
            plan.register(capability).unwrap();
        }
        assert_eq!(plan.finish().unwrap(), Capability::ORDER.to_vec());
    }

    #[test]
    fn theme_before_component_services_is_rejected() {
        let mut plan = CompositionPlan::new();
        plan.register(Capability::Router).unwrap();
        let err = plan.register(Capability::Theme).unwrap_err();
        assert_eq!(err, CompositionError::OutOfOrder { expected: Capability::HttpClient, got: Capability::Theme });
        assert_eq!(plan.registered(), &[Capability::Router]);
    }

    #[test]
    fn duplicates_and_late_registrations_are_rejected() {
        let mut plan = CompositionPlan::new();
        plan.register(Capability::Router).unwrap();
        assert_eq!(plan.register(Capability::Router), Err(CompositionError::Duplicate(Capability::Router)));

        let mut plan = CompositionPlan::new();
        for capability in Capability::ORDER {
            plan.register(capability).unwrap();
        }
        assert_eq!(plan.register(Capability::Theme), Err(CompositionError::Duplicate(Capability::Theme)));
    }

    #[test]
    fn unfinished_plan_names_the_missing_capability() {
        let mut plan = CompositionPlan::new();
        plan.register(Capability::Router).unwrap();
        plan.register(Capability::HttpClient).unwrap();
        assert_eq!(plan.finish(), Err(CompositionError::Incomplete(Capability::Toast)));
    }

    #[test]
    fn ambient_bindings_are_shared_not_copied() {
        let bindings = AmbientBindings::new(RuntimeConfig::default(), String::from("client"));
        let seen_by_view_a = bindings.clone();
        let seen_by_view_b = bindings.clone();
        assert!(Rc::ptr_eq(&seen_by_view_a.config, &seen_by_view_b.config));
        assert!(Rc::ptr_eq(&seen_by_view_a.http, &seen_by_view_b.http));

        let other = AmbientBindings::new(RuntimeConfig::default(), String::from("client"));
        assert!(!Rc::ptr_eq(&other.http, &bindings.http));
    }
}
