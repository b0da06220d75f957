//! Calling closures and blocks through the host.

use pretty_assertions::assert_eq;

use vx_value::list::{first, rest};

use super::{ints, message, TestHost};
use crate::{Builtin, ControlAction, Evaluator, Op, Value};

#[test]
fn closure_receives_its_argument() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let square = host.closure(|ev, host, x| ev.evaluate_binary(host, x, Op::Multiply, x));
    let result = ev
        .evaluate_binary(&mut host, &square, Op::Function, &Value::number(9))
        .unwrap();
    assert_eq!(result, Value::number(81));
}

#[test]
fn return_ends_a_closure_call() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let early = host.closure(|ev, host, x| {
        ev.evaluate_unary(host, Op::Return, x)?;
        Ok(Value::string("unreachable"))
    });
    let result = ev
        .evaluate_binary(&mut host, &early, Op::NamedUnary, &Value::number(7))
        .unwrap();
    assert_eq!(result, Value::number(7));
}

#[test]
fn return_escapes_a_block_call() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let block = host.block(|_, _, x| Err(ControlAction::Return(x.clone())));
    let result = ev.evaluate_binary(&mut host, &block, Op::Function, &Value::number(7));
    assert!(matches!(&result, Err(ControlAction::Return(v)) if *v == Value::number(7)));
    assert_eq!(message(result), "`return` outside of a function");
}

#[test]
fn nested_calls_see_their_own_arguments() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let inc = host.closure(|ev, host, x| ev.evaluate_binary(host, x, Op::Add, &Value::number(1)));
    let twice = host.closure(move |ev, host, x| {
        let once = ev.evaluate_binary(host, &inc, Op::Function, x)?;
        ev.evaluate_binary(host, &inc, Op::Function, &once)
    });
    let result = ev
        .evaluate_binary(&mut host, &twice, Op::Function, &Value::number(1))
        .unwrap();
    assert_eq!(result, Value::number(3));
}

#[test]
fn bound_arguments_come_first() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let minus = host.closure(|ev, host, args| {
        ev.evaluate_binary(host, first(args), Op::Subtract, rest(args))
    });
    let ten_minus = ev
        .evaluate_binary(&mut host, &minus, Op::BindArgs, &Value::number(10))
        .unwrap();
    assert!(ten_minus.is_functional());
    assert_eq!(
        ev.evaluate_binary(&mut host, &ten_minus, Op::Function, &Value::number(3))
            .unwrap(),
        Value::number(7)
    );
    assert_eq!(
        ev.evaluate_binary(&mut host, &ints(&[1, 2, 3]), Op::Map, &ten_minus)
            .unwrap(),
        ints(&[9, 8, 7])
    );
}

#[test]
fn bindings_stack_in_order() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let echo = host.closure(|_, _, args| Ok(args.clone()));
    let once = ev
        .evaluate_binary(&mut host, &echo, Op::BindArgs, &Value::number(1))
        .unwrap();
    let twice = ev
        .evaluate_binary(&mut host, &once, Op::BindArgs, &Value::number(2))
        .unwrap();
    let result = ev
        .evaluate_binary(&mut host, &twice, Op::Function, &Value::number(3))
        .unwrap();
    assert_eq!(
        result,
        Value::list([Value::number(1), Value::number(2), Value::number(3)])
    );
}

#[test]
fn builtins_and_blocks_can_be_bound() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    let join = ev
        .evaluate_binary(&mut host, &Value::Builtin(Builtin::Join), Op::BindArgs, &Value::string("-"))
        .unwrap();
    let args = Value::list([Value::string("a"), Value::string("b")]);
    assert_eq!(
        ev.evaluate_binary(&mut host, &join, Op::Function, &args).unwrap(),
        Value::string("a-b")
    );

    let typeof_ = Value::Builtin(Builtin::Typeof);
    assert_eq!(
        ev.evaluate_binary(&mut host, &typeof_, Op::Function, &join)
            .unwrap(),
        Value::base_type(crate::BaseType::Function)
    );
}

#[test]
fn only_functions_can_be_bound() {
    let ev = Evaluator::new();
    let mut host = TestHost::new();
    assert_eq!(
        message(ev.evaluate_binary(&mut host, &Value::number(1), Op::BindArgs, &Value::number(2))),
        "operator not defined for integers"
    );
}
