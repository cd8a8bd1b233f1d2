use micro_decorate::{DecorateMethods, MethodDecorator};
use micro_stamp::{int_value, Stamp};
use serde_json::json;

#[derive(Debug, Copy, Clone)]
pub struct BenchCase {
    name: &'static str,
    group: BenchGroup,
    depth: usize,
}

impl BenchCase {
    pub fn new(name: &'static str, group: BenchGroup, depth: usize) -> Self {
        Self { name, group, depth }
    }

    pub fn shallow(name: &'static str, depth: usize) -> Self {
        Self::new(name, BenchGroup::Shallow, depth)
    }

    pub fn deep(name: &'static str, depth: usize) -> Self {
        Self::new(name, BenchGroup::Deep, depth)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> BenchGroup {
        self.group
    }

    /// Number of decoration steps stacked on the benchmarked method.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A stamp whose `getA` method is wrapped `depth` times by a `+1` decorator.
    pub fn stamp(&self) -> Stamp {
        let base = Stamp::builder().prop("a", 0).method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?))).build();
        (0..self.depth).fold(base, |stamp, _| stamp.decorate_method("getA", plus_one()))
    }
}

#[derive(Clone, Copy, Debug)]
pub enum BenchGroup {
    Shallow,
    Deep,
}

impl BenchGroup {
    pub fn name(self) -> &'static str {
        match self {
            BenchGroup::Shallow => "shallow",
            BenchGroup::Deep => "deep",
        }
    }
}

pub fn plus_one() -> MethodDecorator {
    MethodDecorator::named("plusOne", |ctx, _args| Ok(json!(int_value(&ctx.decoratee(&[])?)? + 1)))
}
