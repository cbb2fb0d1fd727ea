use crate::domain::{Boundary, Period, PeriodDescriptor, WeekStart};
use log::trace;

/// Context handed to boundary hooks
#[derive(Debug, Clone)]
pub struct ResolverState<'a> {
    /// Descriptor being resolved for this boundary
    pub descriptor: &'a PeriodDescriptor,
    /// Set when the descriptor resolved through the named-period table
    pub period: Option<Period>,
    pub week_start: WeekStart,
    /// The reference instant, in Unix seconds
    pub now: i64,
}

/// Trait for post-processing a resolved boundary timestamp
pub trait BoundaryHook: Send + Sync {
    /// Return the timestamp to use instead of `timestamp`
    fn adjust(&self, timestamp: i64, boundary: Boundary, state: &ResolverState<'_>) -> i64;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Wraps a closure so it can be registered as a hook
pub struct FnHook<F> {
    name: String,
    func: F,
}

impl<F> FnHook<F>
where
    F: Fn(i64, Boundary, &ResolverState<'_>) -> i64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> BoundaryHook for FnHook<F>
where
    F: Fn(i64, Boundary, &ResolverState<'_>) -> i64 + Send + Sync,
{
    fn adjust(&self, timestamp: i64, boundary: Boundary, state: &ResolverState<'_>) -> i64 {
        (self.func)(timestamp, boundary, state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered set of boundary hooks; each sees the previous hook's output
pub struct HookRegistry {
    hooks: Vec<Box<dyn BoundaryHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new boundary hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: BoundaryHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Run every registered hook over a boundary timestamp
    pub fn apply(&self, timestamp: i64, boundary: Boundary, state: &ResolverState<'_>) -> i64 {
        self.hooks.iter().fold(timestamp, |current, hook| {
            let adjusted = hook.adjust(current, boundary, state);
            if adjusted != current {
                trace!(
                    "hook '{}' moved {:?} boundary {} -> {}",
                    hook.name(),
                    boundary,
                    current,
                    adjusted
                );
            }
            adjusted
        })
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shift(i64);

    impl BoundaryHook for Shift {
        fn adjust(&self, timestamp: i64, _boundary: Boundary, _state: &ResolverState<'_>) -> i64 {
            timestamp + self.0
        }

        fn name(&self) -> &str {
            "shift"
        }
    }

    fn state(descriptor: &PeriodDescriptor) -> ResolverState<'_> {
        ResolverState {
            descriptor,
            period: None,
            week_start: WeekStart::SUNDAY,
            now: 0,
        }
    }

    #[test]
    fn empty_registry_is_identity() {
        let registry = HookRegistry::new();
        let descriptor = PeriodDescriptor::Timestamp(42);
        assert!(registry.is_empty());
        assert_eq!(registry.apply(42, Boundary::Start, &state(&descriptor)), 42);
    }

    #[test]
    fn hooks_chain_in_registration_order() {
        let mut registry = HookRegistry::new();
        registry.register(Shift(10));
        registry.register(FnHook::new("double", |ts, _, _: &ResolverState<'_>| ts * 2));

        let descriptor = PeriodDescriptor::Timestamp(1);
        assert_eq!(registry.apply(1, Boundary::End, &state(&descriptor)), 22);
        assert_eq!(registry.list_hooks(), vec!["shift", "double"]);
    }

    #[test]
    fn hooks_see_the_boundary() {
        let mut registry = HookRegistry::new();
        registry.register(FnHook::new(
            "end-only",
            |ts, boundary: Boundary, _: &ResolverState<'_>| {
                if boundary.is_end() { ts + 1 } else { ts }
            },
        ));

        let descriptor = PeriodDescriptor::Named(Period::Today);
        assert_eq!(registry.apply(100, Boundary::Start, &state(&descriptor)), 100);
        assert_eq!(registry.apply(100, Boundary::End, &state(&descriptor)), 101);
    }
}
