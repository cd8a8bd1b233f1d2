use crate::decorator_map::DecoratorMap;
use crate::method_decorator::MethodDecorator;
use crate::step::DecorationStep;
use micro_stamp::{Stamp, StampBuilder};
use std::sync::Arc;

/// Declarative method decoration, chainable on [`Stamp`] and [`StampBuilder`].
///
/// Decorating a method that the stamp does not have is not an error: the decoration is kept and
/// silently does nothing until a method of that name shows up in a later composition.
pub trait DecorateMethods: Sized {
    /// Registers one [`DecorationStep`] wrapping `name` with `decorator`.
    ///
    /// Steps apply in registration order, so the last registered decorator is the outermost one.
    #[must_use]
    fn decorate_method(self, name: impl Into<Arc<str>>, decorator: MethodDecorator) -> Self;

    /// Registers one step per entry, in the map's order. `None` registers nothing.
    #[must_use]
    fn decorate_methods(self, descriptors: Option<DecoratorMap>) -> Self {
        descriptors.into_iter().flatten().fold(self, |acc, (name, decorator)| acc.decorate_method(name, decorator))
    }
}

/// Every call is a build event: the returned stamp has the new step applied.
impl DecorateMethods for Stamp {
    fn decorate_method(self, name: impl Into<Arc<str>>, decorator: MethodDecorator) -> Self {
        self.with_composer(DecorationStep::new(name, decorator))
    }
}

/// Steps are collected and applied by [`StampBuilder::build`].
impl DecorateMethods for StampBuilder {
    fn decorate_method(self, name: impl Into<Arc<str>>, decorator: MethodDecorator) -> Self {
        self.composer(DecorationStep::new(name, decorator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_stamp::{int_argument, int_value, MethodError};
    use mockall::automock;
    use mockall::predicate::eq;
    use serde_json::{json, Value};

    fn get_a_stamp(a: i64) -> Stamp {
        Stamp::builder().prop("a", a).method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?))).build()
    }

    fn get_a_b_stamp() -> Stamp {
        Stamp::builder()
            .prop("a", 1)
            .prop("b", 2)
            .method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?)))
            .method("getB", 0, |this, _args| Ok(json!(this.int_prop("b")?)))
            .build()
    }

    fn echo_stamp() -> Stamp {
        Stamp::builder().method("echo", 1, |_this, args| Ok(json!(int_argument(args, 0)?))).build()
    }

    fn plus(name: &str, n: i64) -> MethodDecorator {
        MethodDecorator::named(name, move |ctx, _args| Ok(json!(int_value(&ctx.decoratee(&[])?)? + n)))
    }

    fn arg_plus(name: &str, n: i64) -> MethodDecorator {
        MethodDecorator::named(name, move |ctx, args| ctx.decoratee(&[json!(int_argument(args, 0)? + n)]))
    }

    fn square() -> MethodDecorator {
        MethodDecorator::named("square", |ctx, _args| {
            let first = int_value(&ctx.decoratee(&[])?)?;
            let second = int_value(&ctx.decoratee(&[])?)?;
            Ok(json!(first * second))
        })
    }

    fn run_twice() -> MethodDecorator {
        MethodDecorator::named("runTwice", |ctx, args| {
            ctx.decoratee(args)?;
            ctx.decoratee(args)?;
            Ok(Value::Null)
        })
    }

    fn get(stamp: &Stamp, name: &str) -> Result<Value, MethodError> {
        stamp.create().call(name, &[])
    }

    #[test]
    fn test_missing_method_is_not_created() {
        let stamp = Stamp::empty().decorate_method("dummyMethod", plus("newDummyMethod", 1));
        let instance = stamp.create();

        assert!(!instance.has_method("dummyMethod"));
        assert_eq!(stamp.create().call("dummyMethod", &[]), Err(MethodError::not_found("dummyMethod")));
    }

    #[test]
    fn test_missing_method_keeps_chain_usable() {
        let stamp = get_a_stamp(1).decorate_method("getB", plus("plusOne", 1)).decorate_method("getA", plus("plusOne", 1));

        assert_eq!(get(&stamp, "getA"), Ok(json!(2)));
        assert_eq!(stamp.create().method_names(), vec!["getA"]);
    }

    #[test]
    fn test_decorated_method_is_still_a_method() {
        let stamp = get_a_stamp(1).decorate_method("getA", MethodDecorator::named("newDummyMethod", |_ctx, _args| Ok(Value::Null)));

        assert_eq!(get(&stamp, "getA"), Ok(Value::Null));
    }

    #[test]
    fn test_arity_is_preserved() {
        let stamp = Stamp::builder()
            .method("sum", 3, |_this, _args| Ok(json!(0)))
            .build()
            .decorate_method("sum", MethodDecorator::anonymous(|ctx, args| ctx.decoratee(args)))
            .decorate_method("sum", MethodDecorator::anonymous(|ctx, args| ctx.decoratee(args)));

        assert_eq!(stamp.create().method("sum").map(micro_stamp::Method::arity), Some(3));
    }

    #[automock]
    trait Observer {
        fn observe(&self, decoratee_result: Value, args: Vec<Value>);
    }

    #[test]
    fn test_decorator_receives_callable_decoratee() {
        let mut mock = MockObserver::new();
        mock.expect_observe().with(eq(json!("bar")), eq(vec![json!(1), json!(2)])).times(1).return_const(());
        let mock = Arc::new(mock);

        let observer = Arc::clone(&mock);
        let stamp = Stamp::builder()
            .prop("foo", "bar")
            .method("dummyMethod", 0, |this, _args| Ok(this.prop("foo").cloned().unwrap_or(Value::Null)))
            .build()
            .decorate_method(
                "dummyMethod",
                MethodDecorator::named("observed", move |ctx, args| {
                    let result = ctx.decoratee(&[])?;
                    observer.observe(result.clone(), args.to_vec());
                    Ok(result)
                }),
            );

        assert_eq!(stamp.create().call("dummyMethod", &[json!(1), json!(2)]), Ok(json!("bar")));
    }

    #[test]
    fn test_decoratee_is_bound_to_instance() {
        let stamp = Stamp::builder()
            .prop("foo", "bar")
            .method("dummyMethod", 0, |this, _args| Ok(this.prop("foo").cloned().unwrap_or(Value::Null)))
            .build()
            .decorate_method("dummyMethod", MethodDecorator::named("decorator", |ctx, _args| ctx.decoratee(&[])));

        let mut instance = stamp.create();
        assert_eq!(instance.call("dummyMethod", &[]), Ok(json!("bar")));

        instance.set_prop("foo", "baz");
        assert_eq!(instance.call("dummyMethod", &[]), Ok(json!("baz")));
    }

    #[test]
    fn test_decorator_changes_result() {
        let stamp = get_a_stamp(1).decorate_method("getA", plus("plusOne", 1));

        assert_eq!(get(&stamp, "getA"), Ok(json!(2)));
    }

    #[test]
    fn test_decorator_changes_arguments() {
        let stamp = echo_stamp().decorate_method("echo", arg_plus("plusTwo", 2));

        assert_eq!(stamp.create().call("echo", &[json!(1)]), Ok(json!(3)));
    }

    #[test]
    fn test_chained_decorators_change_result() {
        let stamp = get_a_stamp(1).decorate_method("getA", plus("plusTwo", 2)).decorate_method("getA", plus("plusThree", 3));

        assert_eq!(get(&stamp, "getA"), Ok(json!(6)));
    }

    #[test]
    fn test_chained_decorators_change_arguments() {
        let stamp = echo_stamp().decorate_method("echo", arg_plus("plusTwo", 2)).decorate_method("echo", arg_plus("plusThree", 3));

        assert_eq!(stamp.create().call("echo", &[json!(1)]), Ok(json!(6)));
    }

    #[test]
    fn test_chain_order_is_registration_order() {
        let tag = |name: &'static str| {
            MethodDecorator::named(name, move |ctx, _args| {
                let inner = ctx.decoratee(&[])?;
                Ok(json!(format!("{name}({})", inner.as_str().unwrap_or_default())))
            })
        };
        let stamp = Stamp::builder()
            .method("value", 0, |_this, _args| Ok(json!("x")))
            .build()
            .decorate_method("value", tag("A"))
            .decorate_method("value", tag("B"));

        assert_eq!(get(&stamp, "value"), Ok(json!("B(A(x))")));
    }

    #[test]
    fn test_decorate_methods_none_has_no_effect() {
        let stamp = get_a_stamp(1).decorate_methods(None);

        assert_eq!(get(&stamp, "getA"), Ok(json!(1)));
        assert!(stamp.descriptor().composers().is_empty());

        let chained = stamp.decorate_methods(None).decorate_method("getA", plus("plusOne", 1));
        assert_eq!(get(&chained, "getA"), Ok(json!(2)));
    }

    #[test]
    fn test_decorate_methods_behaves_like_chained_decorate_method() {
        let base = get_a_b_stamp();

        let multiple = base.clone().decorate_methods(Some(DecoratorMap::from([("getA", plus("plusTwo", 2)), ("getB", plus("plusTwo", 2))])));
        let chained = base.decorate_method("getA", plus("plusTwo", 2)).decorate_method("getB", plus("plusTwo", 2));

        assert_eq!(get(&multiple, "getA"), get(&chained, "getA"));
        assert_eq!(get(&multiple, "getB"), get(&chained, "getB"));
        assert_eq!(get(&multiple, "getA"), Ok(json!(3)));
        assert_eq!(get(&multiple, "getB"), Ok(json!(4)));
    }

    #[test]
    fn test_chained_decorate_methods_behaves_like_double_chained_decorate_method() {
        let base = get_a_b_stamp();

        let multiple = base
            .clone()
            .decorate_methods(Some(DecoratorMap::from([("getA", plus("plusTwo", 2)), ("getB", plus("plusTwo", 2))])))
            .decorate_methods(Some(DecoratorMap::from([("getA", plus("plusThree", 3)), ("getB", plus("plusThree", 3))])));
        let chained = base
            .decorate_method("getA", plus("plusTwo", 2))
            .decorate_method("getA", plus("plusThree", 3))
            .decorate_method("getB", plus("plusTwo", 2))
            .decorate_method("getB", plus("plusThree", 3));

        assert_eq!(get(&multiple, "getA"), get(&chained, "getA"));
        assert_eq!(get(&multiple, "getB"), get(&chained, "getB"));
        assert_eq!(get(&multiple, "getA"), Ok(json!(6)));
        assert_eq!(get(&multiple, "getB"), Ok(json!(7)));
    }

    #[test]
    fn test_decorator_calls_decoratee_multiple_times() {
        let once = get_a_stamp(2).decorate_method("getA", square());
        let twice = once.clone().decorate_method("getA", square());
        let thrice = twice.clone().decorate_method("getA", square());

        assert_eq!(get(&once, "getA"), Ok(json!(4)));
        assert_eq!(get(&twice, "getA"), Ok(json!(16)));
        assert_eq!(get(&thrice, "getA"), Ok(json!(256)));
    }

    #[test]
    fn test_decorator_calls_decoratee_with_side_effects_multiple_times() {
        let stamp = Stamp::builder()
            .prop("a", 1)
            .method("increment", 0, |this, _args| {
                let next = this.int_prop("a")? + 1;
                this.set_prop("a", next);
                Ok(Value::Null)
            })
            .build()
            .decorate_method("increment", run_twice())
            .decorate_method("increment", run_twice())
            .decorate_method("increment", run_twice());

        let mut instance = stamp.create();
        instance.call("increment", &[]).unwrap();
        assert_eq!(instance.prop("a"), Some(&json!(9)));

        instance.call("increment", &[]).unwrap();
        assert_eq!(instance.prop("a"), Some(&json!(17)));
    }

    #[test]
    fn test_anonymous_decorator_without_instance_access() {
        let arg_plus_one = MethodDecorator::anonymous(|ctx, args| ctx.decoratee(&[json!(int_argument(args, 0)? + 1)]));
        let stamp = echo_stamp().decorate_method("echo", arg_plus_one);

        assert_eq!(stamp.create().call("echo", &[json!(1)]), Ok(json!(2)));
    }

    #[test]
    fn test_decorator_can_call_other_instance_methods() {
        let stamp = get_a_b_stamp().decorate_method(
            "getA",
            MethodDecorator::named("plusB", |ctx, _args| {
                let a = int_value(&ctx.decoratee(&[])?)?;
                let b = int_value(&ctx.this_mut().call("getB", &[])?)?;
                Ok(json!(a + b))
            }),
        );

        assert_eq!(get(&stamp, "getA"), Ok(json!(3)));
    }

    #[test]
    fn test_decorated_method_name() {
        let stamp = echo_stamp().decorate_method("echo", arg_plus("plusTwo", 2));

        assert_eq!(stamp.create().method("echo").and_then(micro_stamp::Method::name), Some("plusTwo(echo)"));
    }

    #[test]
    fn test_anonymous_decorated_method_name() {
        let stamp = echo_stamp().decorate_method("echo", MethodDecorator::anonymous(|ctx, args| ctx.decoratee(args)));

        assert_eq!(stamp.create().method("echo").and_then(micro_stamp::Method::name), Some("<anonymous>(echo)"));
    }

    #[test]
    fn test_chained_decorated_method_name() {
        let stamp = echo_stamp().decorate_method("echo", arg_plus("plusTwo", 2)).decorate_method("echo", arg_plus("plusThree", 3));

        assert_eq!(stamp.create().method("echo").and_then(micro_stamp::Method::name), Some("plusThree(plusTwo(echo))"));
    }

    #[test]
    fn test_recomposition_does_not_wrap_again() {
        let decorated = get_a_stamp(1).decorate_method("getA", plus("plusTwo", 2)).decorate_method("getA", plus("plusThree", 3));

        let with_itself = Stamp::compose([&decorated, &decorated]);
        let with_other = decorated.compose_with(&Stamp::builder().prop("b", 5).build());
        let nested = Stamp::compose([&Stamp::empty(), &with_other, &with_itself]);

        for stamp in [&with_itself, &with_other, &nested] {
            assert_eq!(get(stamp, "getA"), Ok(json!(6)));
            assert_eq!(stamp.create().method("getA").and_then(micro_stamp::Method::name), Some("plusThree(plusTwo(getA))"));
        }
    }

    #[test]
    fn test_decoration_applies_to_method_composed_in_later() {
        let decorator_only = Stamp::empty().decorate_method("getA", plus("plusOne", 1));
        assert!(!decorator_only.create().has_method("getA"));

        let composed = get_a_stamp(1).compose_with(&decorator_only);
        assert_eq!(get(&composed, "getA"), Ok(json!(2)));
    }

    #[test]
    fn test_overriding_method_is_not_wrapped_again() {
        let decorated = get_a_stamp(1).decorate_method("getA", plus("plusOne", 1));
        assert_eq!(get(&decorated, "getA"), Ok(json!(2)));

        let overridden = Stamp::compose([&decorated, &get_a_stamp(10)]);
        assert_eq!(get(&overridden, "getA"), Ok(json!(10)));
        assert_eq!(overridden.create().method("getA").and_then(micro_stamp::Method::name), Some("getA"));
    }

    #[test]
    fn test_base_stamp_is_not_affected() {
        let base = get_a_stamp(1);
        let decorated = base.clone().decorate_method("getA", plus("plusOne", 1));

        assert_eq!(get(&base, "getA"), Ok(json!(1)));
        assert_eq!(get(&decorated, "getA"), Ok(json!(2)));
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let failing_decoratee = Stamp::builder()
            .method("getA", 0, |_this, _args| Err(MethodError::custom("decoratee failed")))
            .build()
            .decorate_method("getA", plus("plusOne", 1));
        assert_eq!(get(&failing_decoratee, "getA"), Err(MethodError::custom("decoratee failed")));

        let failing_decorator = get_a_stamp(1).decorate_method("getA", MethodDecorator::named("fail", |_ctx, _args| Err(MethodError::custom("decorator failed"))));
        assert_eq!(get(&failing_decorator, "getA"), Err(MethodError::custom("decorator failed")));
    }

    #[test]
    fn test_builder_matches_stamp_chaining() {
        let built = Stamp::builder()
            .prop("a", 1)
            .method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?)))
            .decorate_method("getA", plus("plusTwo", 2))
            .decorate_methods(Some(DecoratorMap::from([("getA", plus("plusThree", 3))])))
            .decorate_methods(None)
            .build();
        let chained = get_a_stamp(1).decorate_method("getA", plus("plusTwo", 2)).decorate_method("getA", plus("plusThree", 3));

        assert_eq!(get(&built, "getA"), get(&chained, "getA"));
        assert_eq!(
            built.create().method("getA").and_then(micro_stamp::Method::name),
            chained.create().method("getA").and_then(micro_stamp::Method::name)
        );
    }

    #[test]
    fn test_builder_step_before_method_declaration() {
        let stamp = Stamp::builder()
            .decorate_method("getA", plus("plusOne", 1))
            .prop("a", 1)
            .method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?)))
            .build();

        assert_eq!(get(&stamp, "getA"), Ok(json!(2)));
    }
}
