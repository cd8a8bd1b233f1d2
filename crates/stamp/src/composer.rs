use crate::descriptor::Descriptor;
use crate::method::MethodTable;

/// A deferred build hook.
///
/// Every time a stamp is built or composed, the merged [`Descriptor`] is handed to each registered
/// composer in registration order before any instance can be created. A composer registered on a
/// stamp runs again whenever that stamp takes part in a later composition, so composers must
/// tolerate seeing entries they already produced.
pub trait Composer: Send + Sync {
    fn compose(&self, ctx: &mut ComposeContext<'_>);
}

/// Mutable view of the descriptor being assembled by one build event.
#[derive(Debug)]
pub struct ComposeContext<'a> {
    descriptor: &'a mut Descriptor,
}

impl<'a> ComposeContext<'a> {
    pub fn new(descriptor: &'a mut Descriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &*self.descriptor
    }

    pub fn methods(&self) -> &MethodTable {
        self.descriptor.methods()
    }

    pub fn methods_mut(&mut self) -> &mut MethodTable {
        self.descriptor.methods_mut()
    }
}

struct FnComposer<F: Fn(&mut ComposeContext<'_>)>(F);

impl<F: Fn(&mut ComposeContext<'_>) + Send + Sync> Composer for FnComposer<F> {
    fn compose(&self, ctx: &mut ComposeContext<'_>) {
        (self.0)(ctx);
    }
}

pub fn composer_fn<F>(f: F) -> impl Composer
where
    F: Fn(&mut ComposeContext<'_>) + Send + Sync,
{
    FnComposer(f)
}
