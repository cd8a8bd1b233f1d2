use micro_decorate::{DecorateMethods, DecoratorMap, MethodDecorator};
use micro_stamp::{int_argument, MethodError, Stamp};
use serde_json::{json, Value};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn logged(method: &'static str) -> MethodDecorator {
    MethodDecorator::named("logged", move |ctx, args| {
        info!(method, ?args, "calling");
        let result = ctx.decoratee(args);
        info!(method, ?result, "returned");
        result
    })
}

fn non_negative() -> MethodDecorator {
    MethodDecorator::named("nonNegative", |ctx, args| {
        if int_argument(args, 0)? < 0 {
            return Err(MethodError::invalid_argument(0, "must not be negative"));
        }
        ctx.decoratee(args)
    })
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let counter = Stamp::builder()
        .name("Counter")
        .prop("count", 0)
        .method("add", 1, |this, args| {
            let next = this.int_prop("count")? + int_argument(args, 0)?;
            this.set_prop("count", next);
            Ok(json!(next))
        })
        .method("reset", 0, |this, _args| {
            this.set_prop("count", 0);
            Ok(Value::Null)
        })
        .build()
        .decorate_method("add", non_negative())
        .decorate_methods(Some(DecoratorMap::from([("add", logged("add")), ("reset", logged("reset"))])));

    let mut instance = counter.create();
    for amount in [1, 2, -3] {
        if let Err(e) = instance.call("add", &[json!(amount)]) {
            error!(cause = %e, amount, "add failed");
        }
    }
    if let Err(e) = instance.call("reset", &[]) {
        error!(cause = %e, "reset failed");
    }

    info!(names = ?instance.method("add").and_then(|m| m.name()), state = %serde_json::to_value(&instance).unwrap_or_default(), "done");
}
