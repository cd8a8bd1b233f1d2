use crate::method_decorator::MethodDecorator;
use std::vec;

/// Method decorators keyed by method name, in insertion order.
///
/// Inserting a name that is already present replaces its decorator but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct DecoratorMap {
    entries: Vec<(String, MethodDecorator)>,
}

impl DecoratorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a decorator, returning the one previously registered under `name`.
    pub fn insert(&mut self, name: impl Into<String>, decorator: MethodDecorator) -> Option<MethodDecorator> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, decorator)),
            None => {
                self.entries.push((name, decorator));
                None
            }
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, decorator: MethodDecorator) -> Self {
        self.insert(name, decorator);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MethodDecorator> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, decorator)| decorator)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MethodDecorator)> for DecoratorMap {
    fn from_iter<I: IntoIterator<Item = (K, MethodDecorator)>>(iter: I) -> Self {
        iter.into_iter().fold(DecoratorMap::new(), |map, (name, decorator)| map.with(name, decorator))
    }
}

impl<K: Into<String>, const N: usize> From<[(K, MethodDecorator); N]> for DecoratorMap {
    fn from(entries: [(K, MethodDecorator); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for DecoratorMap {
    type Item = (String, MethodDecorator);
    type IntoIter = vec::IntoIter<(String, MethodDecorator)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
