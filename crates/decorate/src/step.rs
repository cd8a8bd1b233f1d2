use crate::method_decorator::MethodDecorator;
use micro_stamp::{ComposeContext, Composer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, trace};

static NEXT_STEP_ID: AtomicU64 = AtomicU64::new(1);

/// One registered decoration: wrap the method `method_name` with `decorator`.
///
/// A step acts as its own composition hook. Each time the stamp it is registered on is built, the
/// hook looks up `method_name` in the method table and wraps it, unless the entry is missing or
/// the step has already been applied. The applied flag belongs to the step alone and is never
/// reset, so two steps decorating the same method both apply, each exactly once, no matter how
/// often the stamp is composed again. A build where the method is missing leaves the flag unset.
#[derive(Debug)]
pub struct DecorationStep {
    id: u64,
    method_name: Arc<str>,
    decorator: MethodDecorator,
    applied: AtomicBool,
}

impl DecorationStep {
    pub fn new(method_name: impl Into<Arc<str>>, decorator: MethodDecorator) -> Self {
        Self {
            id: NEXT_STEP_ID.fetch_add(1, Ordering::Relaxed),
            method_name: method_name.into(),
            decorator,
            applied: AtomicBool::new(false),
        }
    }

    /// Unique id of this step, reported in logs.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn decorator(&self) -> &MethodDecorator {
        &self.decorator
    }

    /// Whether this step has wrapped its method in some build.
    pub fn is_applied(&self) -> bool {
        self.applied.load(Ordering::Acquire)
    }
}

impl Composer for DecorationStep {
    fn compose(&self, ctx: &mut ComposeContext<'_>) {
        let Some(decoratee) = ctx.methods().get(&*self.method_name) else {
            trace!(step = self.id, method = %self.method_name, "method not found, skip decoration");
            return;
        };

        if self.applied.swap(true, Ordering::AcqRel) {
            trace!(step = self.id, method = %self.method_name, "step already applied");
            return;
        }

        let decoratee = decoratee.clone();
        let stamp = Arc::new(ctx.descriptor().clone());
        let decorated = self.decorator.wrap(decoratee, Some(stamp));

        debug!(step = self.id, method = %self.method_name, name = decorated.name(), "decorated method");
        ctx.methods_mut().insert(self.method_name.to_string(), decorated);
    }
}
