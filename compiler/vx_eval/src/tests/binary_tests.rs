//! Infix operators.

use super::{binary, ints, message, TestHost};
use crate::{BaseType, Builtin, EvalConfig, Evaluator, Op, Value};

fn n(i: i64) -> Value {
    Value::number(i)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn int_type() -> Value {
    Value::base_type(BaseType::Integer)
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_arithmetic() {
        assert_eq!(binary(&n(3), Op::Add, &n(4)).unwrap(), n(7));
        assert_eq!(binary(&n(-7), Op::Modulo, &n(2)).unwrap(), n(1));
        assert_eq!(binary(&n(2), Op::Empower, &n(10)).unwrap(), n(1024));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(message(binary(&n(6), Op::Divide, &n(0))), "division by zero");
        assert_eq!(message(binary(&n(6), Op::Remain, &n(0))), "division by zero");
    }

    #[test]
    fn configured_integer_width() {
        let ev = Evaluator::builder()
            .config(EvalConfig::default().with_max_integer_bits(16))
            .build();
        let mut host = TestHost::new();
        assert_eq!(
            ev.evaluate_binary(&mut host, &n(2), Op::Empower, &n(8)).unwrap(),
            n(256)
        );
        assert_eq!(
            message(ev.evaluate_binary(&mut host, &n(2), Op::Empower, &n(40))),
            "bigint overflow"
        );
    }

    #[test]
    fn mixed_and_undefined_operands() {
        assert_eq!(
            message(binary(&n(1), Op::Add, &s("a"))),
            "operator not defined on mixed types"
        );
        assert_eq!(
            message(binary(&s("a"), Op::Add, &s("b"))),
            "operator not defined for string values"
        );
        assert_eq!(
            message(binary(&Value::Bool(true), Op::Add, &Value::Bool(false))),
            "operator not defined for boolean values"
        );
        assert_eq!(
            message(binary(&n(1), Op::And, &n(1))),
            "operator not defined for integers"
        );
    }
}

mod logic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_or_on_booleans() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(binary(&t, Op::And, &f).unwrap(), f);
        assert_eq!(binary(&t, Op::Or, &f).unwrap(), t);
    }
}

mod strings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repeat_strings() {
        assert_eq!(binary(&s("ab"), Op::Multiply, &n(3)).unwrap(), s("ababab"));
        assert_eq!(binary(&s("ab"), Op::Multiply, &n(0)).unwrap(), s(""));
        assert_eq!(
            binary(&s("ab"), Op::Multiply, &Value::Bool(true)).unwrap(),
            s("ab")
        );
        assert_eq!(
            binary(&Value::packed([7u8]), Op::Multiply, &Value::Bool(false)).unwrap(),
            Value::packed(b"")
        );
    }

    #[test]
    fn bad_string_factors() {
        assert_eq!(
            message(binary(&s("ab"), Op::Multiply, &n(-1))),
            "negative string multiplier"
        );
        assert_eq!(
            message(binary(&s("ab"), Op::Multiply, &Value::Byte(2))),
            "string/pack repetition requires int or bool"
        );
    }
}

mod relations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ordering() {
        assert_eq!(binary(&n(1), Op::Lt, &n(2)).unwrap(), Value::Bool(true));
        assert_eq!(binary(&n(2), Op::Lte, &n(2)).unwrap(), Value::Bool(true));
        assert_eq!(binary(&s("b"), Op::Gt, &s("a")).unwrap(), Value::Bool(true));
        assert_eq!(
            binary(&Value::Byte(3), Op::Gte, &Value::Byte(4)).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(binary(&n(1), Op::Cmp, &n(2)).unwrap(), n(-1));
        assert_eq!(binary(&n(2), Op::Cmp, &n(2)).unwrap(), n(0));
        assert_eq!(binary(&n(3), Op::Cmp, &n(2)).unwrap(), n(1));
        assert_eq!(
            message(binary(&n(1), Op::Lt, &s("a"))),
            "mismatched types in compare()"
        );
    }

    #[test]
    fn equality() {
        assert_eq!(
            binary(&ints(&[1, 2]), Op::Equal, &ints(&[1, 2])).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(binary(&n(1), Op::Unequal, &n(2)).unwrap(), Value::Bool(true));
        assert_eq!(
            binary(&n(1), Op::Equal, &Value::EmptyList).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            message(binary(&n(1), Op::Equal, &s("1"))),
            "mismatched types in equality relation"
        );
    }

    #[test]
    fn membership_and_type_tests() {
        let r = Value::range(n(1), Op::Delta, n(5));
        assert_eq!(binary(&n(4), Op::In, &r).unwrap(), Value::Bool(true));
        assert_eq!(binary(&n(5), Op::In, &r).unwrap(), Value::Bool(false));
        assert_eq!(binary(&n(5), Op::Isa, &int_type()).unwrap(), Value::Bool(true));
    }
}

mod construction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ranges_need_comparable_bounds() {
        let r = binary(&n(1), Op::Gamut, &n(3)).unwrap();
        assert!(r.is_range());
        assert_eq!(
            binary(&Value::Byte(b'a'), Op::Delta, &Value::Byte(b'z')).unwrap(),
            Value::range(Value::Byte(b'a'), Op::Delta, Value::Byte(b'z'))
        );
        assert_eq!(
            message(binary(&n(1), Op::Gamut, &s("3"))),
            "mismatched types in compare()"
        );
    }

    #[test]
    fn lists_concatenate() {
        let ab = binary(&n(1), Op::List, &n(2)).unwrap();
        assert_eq!(ab, Value::list([n(1), n(2)]));
        let abc = binary(&ab, Op::List, &n(3)).unwrap();
        assert_eq!(abc, Value::list([n(1), n(2), n(3)]));
        assert_eq!(binary(&Value::EmptyList, Op::List, &n(1)).unwrap(), n(1));
    }

    #[test]
    fn mappings_need_singular_operands() {
        let m = binary(&s("k"), Op::Mapping, &n(1)).unwrap();
        assert!(m.is_mapping());
        assert_eq!(
            message(binary(&Value::EmptyList, Op::Mapping, &n(1))),
            "mapping keys must be singular and non-null"
        );
        assert_eq!(
            message(binary(&ints(&[1]), Op::Mapping, &n(1))),
            "mapping keys must be singular and non-null"
        );
        assert_eq!(
            message(binary(&s("k"), Op::Mapping, &Value::list([n(1), n(2)]))),
            "mapping values must be singular"
        );
    }

    #[test]
    fn list_repetition() {
        let ab = Value::list([n(1), n(2)]);
        assert_eq!(
            binary(&ab, Op::Repeat, &n(2)).unwrap(),
            Value::list([n(1), n(2), n(1), n(2)])
        );
        assert_eq!(binary(&ab, Op::Repeat, &n(0)).unwrap(), Value::EmptyList);
        assert_eq!(
            message(binary(&ab, Op::Repeat, &s("2"))),
            "non-numeric list repetition factor"
        );
        assert_eq!(
            message(binary(&ab, Op::Repeat, &n(-2))),
            "negative list repetition factor"
        );
    }

    #[test]
    fn deferred_operators_build_expressions() {
        let v = binary(&Value::Bool(true), Op::Then, &n(1)).unwrap();
        assert_eq!(v.expr_op(), Some(Op::Then));
        let f = binary(&Value::EmptyList, Op::Lambda, &n(0)).unwrap();
        assert!(matches!(f, Value::Function(_)));
    }
}

mod types {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_expressions() {
        let array_type = binary(&int_type(), Op::Subscript, &Value::EmptyList).unwrap();
        assert!(array_type.is_type());
        assert_eq!(array_type.to_string(), "integer[]");

        let string_type = Value::base_type(BaseType::String);
        let either = binary(&int_type(), Op::Union, &string_type).unwrap();
        assert!(either.is_type());
        assert_eq!(binary(&s("x"), Op::Isa, &either).unwrap(), Value::Bool(true));

        let table_type = binary(&string_type, Op::Empower, &int_type()).unwrap();
        assert!(table_type.is_type());
    }

    #[test]
    fn tables_check_their_keys() {
        let string_type = Value::base_type(BaseType::String);
        let entries = Value::array([Value::mapping(s("a"), n(1))]);
        let table = binary(&string_type, Op::Empower, &entries).unwrap();
        assert!(table.is_table());
        assert_eq!(binary(&table, Op::Subscript, &s("a")).unwrap(), n(1));

        let bad_key = Value::array([Value::mapping(n(1), n(1))]);
        assert_eq!(
            message(binary(&string_type, Op::Empower, &bad_key)),
            "table key 1 is not a string"
        );
        assert_eq!(
            message(binary(&string_type, Op::Empower, &ints(&[1]))),
            "table elements must be mappings, not integers"
        );
    }
}

mod access {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn subscript_and_member() {
        assert_eq!(binary(&ints(&[10, 20]), Op::Subscript, &n(1)).unwrap(), n(20));
        assert_eq!(binary(&s("abc"), Op::Member, &s("length")).unwrap(), n(3));
    }
}

mod calls {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_and_types_are_callable() {
        let abs = Value::Builtin(Builtin::Abs);
        assert_eq!(binary(&abs, Op::Function, &n(-3)).unwrap(), n(3));
        assert_eq!(binary(&int_type(), Op::Function, &s("12")).unwrap(), n(12));
        assert_eq!(
            message(binary(&n(1), Op::Function, &n(2))),
            "cannot call integers"
        );
    }
}
