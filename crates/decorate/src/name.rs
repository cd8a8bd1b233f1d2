/// Placeholder used for decorators and methods without a name.
pub const ANONYMOUS: &str = "<anonymous>";

/// Display name of a decorated method: `decorator(decoratee)`.
pub fn synthesize_name(decorator: Option<&str>, decoratee: Option<&str>) -> String {
    format!("{}({})", decorator.unwrap_or(ANONYMOUS), decoratee.unwrap_or(ANONYMOUS))
}
