//! Integration tests for the ICFP evaluator.
//!
//! Tests key evaluator features:
//! - literals, operators and conditionals
//! - lazy and eager application
//! - memoization on/off and reduction counts
//! - error reporting
//! - reduction budget
//! - deep recursion through the fixed-point combinator

use icfp_eval::{evaluate, EvalConfig, EvalError, Evaluation, Evaluator, Env, Value};
use icfp_types::{Expr, VarId};
use num_bigint::BigInt;
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Parse a wire program (panics on parse errors).
fn parse(source: &str) -> Expr {
    match icfp_parser::parse(source) {
        Ok(expr) => expr,
        Err(e) => panic!("parse error for {source:?}: {e}"),
    }
}

/// Evaluate with an explicit config (panics on evaluation errors).
fn run_with(source: &str, config: EvalConfig) -> Evaluation {
    match evaluate(parse(source), config) {
        Ok(result) => result,
        Err(e) => panic!("evaluation error for {source:?}: {e}"),
    }
}

/// Evaluate with the default config.
fn run(source: &str) -> Evaluation {
    run_with(source, EvalConfig::default())
}

/// Evaluate and return the error.
fn run_err(source: &str) -> EvalError {
    match evaluate(parse(source), EvalConfig::default()) {
        Ok(result) => panic!("expected error for {source:?}, got {}", result.value),
        Err(e) => e,
    }
}

fn int(n: i64) -> Value {
    Value::from(n)
}

/// `n!` via a self-applying recursion combinator.
const FACTORIAL_3: &str = r#"B$ B$ L" B$ L# B$ v" B$ v# v# L# B$ v" B$ v# v# L" L# ? B= v# I! I" B$ L$ B+ B$ v" v$ B$ v" v$ B- v# I" I%"#;

/// Naive Fibonacci of 6 via the Y combinator.
const FIBONACCI_6: &str = r#"B$ B$ L! B$ L" B$ v" v" L" B$ v! B$ v" v" L! L" ? B< v" I# I" B+ B$ v! B- v" I" B$ v! B- v" I# I'"#;

/// `sum(n) = n + sum(n - 1)` for n = 3000 via the Y combinator.
const SUM_TO_3000: &str = r#"B$ B$ L! B$ L" B$ v" v" L" B$ v! B$ v" v" L! L" ? B= v" I! I! B+ v" B$ v! B- v" I" I@w"#;

/// The same recursion for n = 100000.
const SUM_TO_100000: &str = r#"B$ B$ L! B$ L" B$ v" v" L" B$ v! B$ v" v" L! L" ? B= v" I! I! B+ v" B$ v! B- v" I" I,>o"#;

/// `f acc n = if n == 0 then acc else f (acc + n) (n - 1)` from `f 0 20000`.
/// The accumulator is passed lazily and `n` eagerly, so the loop builds a
/// chain of 20000 deferred additions that is only forced at the end.
const ACCUMULATE_20000: &str = r#"B$ B$ B$ L! B$ L" B$ v" v" L" B$ v! B$ v" v" L! L" L# ? B= v# I! v" B! B$ v! B+ v" v# B- v# I" I! I#9i"#;

/// The language self-check program.
const LANGUAGE_TEST: &str = r#"? B= B$ B$ B$ B$ L$ L$ L$ L# v$ I" I# I$ I% I$ ? B= B$ L$ v$ I+ I+ ? B= BD I$ S4%34 S4 ? B= BT I$ S4%34 S4%3 ? B= B. S4% S34 S4%34 ? U! B& T F ? B& T T ? U! B| F F ? B| F T ? B< U- I$ U- I# ? B> I$ I# ? B= U- I" B% U- I$ I# ? B= I" B% I( I$ ? B= U- I" B/ U- I$ I# ? B= I# B/ I( I$ ? B= I' B* I# I$ ? B= I$ B+ I" I# ? B= U$ I4%34 S4%34 ? B= U# S4%34 I4%34 ? U! F ? B= U- I$ B- I# I& ? B= I$ B- I& I# ? B= S4%34 S4%34 ? B= F F ? B= I$ I$ ? T B. B. SM%,&k#(%#+}IEj}3%.$}z3/,6%},!.'5!'%y4%34} U$ B+ I# B* I$> I1~s:U@ Sz}4/}#,!)-}0/).43}&/2})4 S)&})3}./4}#/22%#4 S").!29}q})3}./4}#/22%#4 S").!29}q})3}./4}#/22%#4 S").!29}q})3}./4}#/22%#4 S").!29}k})3}./4}#/22%#4 S5.!29}k})3}./4}#/22%#4 S5.!29}_})3}./4}#/22%#4 S5.!29}a})3}./4}#/22%#4 S5.!29}b})3}./4}#/22%#4 S").!29}i})3}./4}#/22%#4 S").!29}h})3}./4}#/22%#4 S").!29}m})3}./4}#/22%#4 S").!29}m})3}./4}#/22%#4 S").!29}c})3}./4}#/22%#4 S").!29}c})3}./4}#/22%#4 S").!29}r})3}./4}#/22%#4 S").!29}p})3}./4}#/22%#4 S").!29}{})3}./4}#/22%#4 S").!29}{})3}./4}#/22%#4 S").!29}d})3}./4}#/22%#4 S").!29}d})3}./4}#/22%#4 S").!29}l})3}./4}#/22%#4 S").!29}N})3}./4}#/22%#4 S").!29}>})3}./4}#/22%#4 S!00,)#!4)/.})3}./4}#/22%#4 S!00,)#!4)/.})3}./4}#/22%#4"#;

// ══════════════════════════════════════════════════════════════════════════════
// Literals & operators
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_literals() {
    assert_eq!(run("T").value, Value::Bool(true));
    assert_eq!(run("F").value, Value::Bool(false));
    assert_eq!(run("I/6").value, int(1337));
    assert_eq!(run("SB%,,/}Q/2,$_").value, Value::from("Hello World!"));
}

#[test]
fn test_arithmetic() {
    assert_eq!(run("B+ I# I$").value, int(5));
    assert_eq!(run("B- I# I$").value, int(-1));
    assert_eq!(run("B* I# I$").value, int(6));
    assert_eq!(run("U- I$").value, int(-3));
}

#[test]
fn test_truncating_division_and_remainder() {
    // -7 / 2 and -7 % 2
    assert_eq!(run("B/ U- I( I#").value, int(-3));
    assert_eq!(run("B% U- I( I#").value, int(-1));
    // 3 / -2
    assert_eq!(run("B/ I$ U- I#").value, int(-1));
    assert_eq!(run("B% I( I$").value, int(1));
}

#[test]
fn test_big_integers() {
    // (2^64)^2 exceeds every native integer width.
    let src = "B* IA33?&-jqQi IA33?&-jqQi";
    let two_64 = BigInt::from(1u128 << 64);
    assert_eq!(run(src).value, Value::Int(&two_64 * &two_64));
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(run("B< I# I$").value, Value::Bool(true));
    assert_eq!(run("B> I# I$").value, Value::Bool(false));
    assert_eq!(run("B= I$ I$").value, Value::Bool(true));
    assert_eq!(run("B| F T").value, Value::Bool(true));
    assert_eq!(run("B& T F").value, Value::Bool(false));
    assert_eq!(run("U! F").value, Value::Bool(true));
}

#[test]
fn test_equality_across_types_is_false() {
    assert_eq!(run("B= I\" S\"").value, Value::Bool(false));
    assert_eq!(run("B= T I\"").value, Value::Bool(false));
    assert_eq!(run("B= S4%34 S4%34").value, Value::Bool(true));
}

#[test]
fn test_bool_never_equals_int() {
    assert_eq!(run("B= T I\"").value, Value::Bool(false));
    assert_eq!(run("B= I\" T").value, Value::Bool(false));
    assert_eq!(run("B= F I!").value, Value::Bool(false));
    assert_eq!(run("B= T T").value, Value::Bool(true));
}

#[test]
fn test_string_operators() {
    assert_eq!(run("B. S4% S34").value, Value::from("test"));
    assert_eq!(run("BT I$ S4%34").value, Value::from("tes"));
    assert_eq!(run("BD I$ S4%34").value, Value::from("t"));
}

#[test]
fn test_slice_at_exact_length() {
    assert_eq!(run("BT I% S4%34").value, Value::from("test"));
    assert_eq!(run("BD I% S4%34").value, Value::from(""));
}

#[test]
fn test_string_int_conversions() {
    assert_eq!(run("U# S4%34").value, int(15818151));
    assert_eq!(run("U$ I4%34").value, Value::from("test"));
    assert_eq!(run("U$ I!").value, Value::from("a"));
    // The empty digit sequence folds to zero.
    assert_eq!(run("U# S").value, int(0));
}

#[test]
fn test_if_selects_one_branch() {
    let result = run("? B> I# I$ S9%3 S./");
    assert_eq!(result.value, Value::from("no"));
    assert_eq!(result.reductions, 0);
    // The untaken branch would fail if it were evaluated.
    assert_eq!(run("? T I\" v#").value, int(1));
    assert_eq!(run("? F v# I\"").value, int(1));
}

// ══════════════════════════════════════════════════════════════════════════════
// Application
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_lazy_application() {
    let result = run("B$ L# B$ L\" B+ v\" v\" B* I$ I# v8");
    assert_eq!(result.value, int(12));
    assert_eq!(result.reductions, 2);
}

#[test]
fn test_curried_application() {
    let result = run("B$ B$ L# L$ v# B. SB%,,/ S}Q/2,$_ IK");
    assert_eq!(result.value, Value::from("Hello World!"));
    assert_eq!(result.reductions, 2);
}

#[test]
fn test_unused_argument_is_never_evaluated() {
    // `v8` is unbound, but the body never references `v2`.
    let result = run("B$ L# I$ v8");
    assert_eq!(result.value, int(3));
    assert_eq!(result.reductions, 1);
}

#[test]
fn test_eager_application_evaluates_argument() {
    let result = run("B! L# B+ v# v# B* I# I$");
    assert_eq!(result.value, int(12));
    assert_eq!(result.reductions, 1);
    // Unlike `B$`, the unused unbound argument is an error.
    assert_eq!(run_err("B! L# I$ v8"), EvalError::UnboundVariable(VarId(8)));
}

#[test]
fn test_unapplied_lambda_is_a_closure() {
    let result = run("L# v#");
    let closure = result.value.as_closure().expect("closure");
    assert_eq!(closure.param, VarId(2));
    assert_eq!(result.value.to_string(), "<closure v2>");
    assert_eq!(result.reductions, 0);
}

#[test]
fn test_inner_binder_shadows_outer() {
    assert_eq!(run("B$ B$ L# L# v# I\" I#").value, int(2));
    assert_eq!(run("B$ L# B$ L# v# I% I\"").value, int(4));
}

// ══════════════════════════════════════════════════════════════════════════════
// Memoization & reduction counting
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_memoization_changes_reduction_count() {
    let src = "B$ L# B+ v# v# B$ L$ v$ I\"";
    let memo = run_with(src, EvalConfig::default());
    let plain = run_with(src, EvalConfig::default().with_memoize(false));
    assert_eq!(memo.value, int(2));
    assert_eq!(plain.value, int(2));
    assert_eq!(memo.reductions, 2);
    assert_eq!(plain.reductions, 3);
}

#[test]
fn test_factorial_reduction_counts() {
    let memo = run_with(FACTORIAL_3, EvalConfig::default());
    assert_eq!(memo.value, int(16));
    assert_eq!(memo.reductions, 57);

    let plain = run_with(FACTORIAL_3, EvalConfig::default().with_memoize(false));
    assert_eq!(plain.value, int(16));
    assert_eq!(plain.reductions, 109);
}

#[test]
fn test_fibonacci_via_y_combinator() {
    let memo = run(FIBONACCI_6);
    assert_eq!(memo.value, int(13));
    assert_eq!(memo.reductions, 39);

    let plain = run_with(FIBONACCI_6, EvalConfig::default().with_memoize(false));
    assert_eq!(plain.value, int(13));
    assert_eq!(plain.reductions, 77);

    // Same program with n = 10.
    let fib_10 = FIBONACCI_6.replace(" I'", " I+");
    let result = run(&fib_10);
    assert_eq!(result.value, int(89));
    assert_eq!(result.reductions, 199);
}

#[test]
fn test_evaluator_counter_accumulates() {
    let mut evaluator = Evaluator::new(EvalConfig::default());
    let expr = Rc::new(parse("B$ L# v# I\""));
    assert_eq!(evaluator.eval(expr.clone(), Env::new()).unwrap(), int(1));
    assert_eq!(evaluator.reductions(), 1);
    assert_eq!(evaluator.eval(expr, Env::new()).unwrap(), int(1));
    assert_eq!(evaluator.reductions(), 2);
}

// ══════════════════════════════════════════════════════════════════════════════
// Reduction budget
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_divergent_program_hits_budget() {
    let omega = "B$ L\" B$ v\" v\" L\" B$ v\" v\"";
    let err = evaluate(parse(omega), EvalConfig::default().with_max_reductions(Some(100)))
        .unwrap_err();
    assert_eq!(err, EvalError::ReductionBudgetExceeded { limit: 100 });

    // The counter stops at the ceiling.
    let mut evaluator = Evaluator::new(EvalConfig::default().with_max_reductions(Some(100)));
    assert!(evaluator.eval(Rc::new(parse(omega)), Env::new()).is_err());
    assert_eq!(evaluator.reductions(), 100);
}

#[test]
fn test_budget_boundary_is_inclusive() {
    let exact = EvalConfig::default().with_max_reductions(Some(57));
    assert_eq!(run_with(FACTORIAL_3, exact).reductions, 57);

    let short = EvalConfig::default().with_max_reductions(Some(56));
    assert_eq!(
        evaluate(parse(FACTORIAL_3), short).unwrap_err(),
        EvalError::ReductionBudgetExceeded { limit: 56 }
    );
}

#[test]
fn test_unlimited_config() {
    let result = run_with(FACTORIAL_3, EvalConfig::unlimited());
    assert_eq!(result.value, int(16));
}

// ══════════════════════════════════════════════════════════════════════════════
// Errors
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_unbound_variable() {
    assert_eq!(run_err("v#"), EvalError::UnboundVariable(VarId(2)));
    // Bindings of other variables stay visible inside nested lambdas.
    assert_eq!(run("B$ L# B$ L$ v# I\" I#").value, int(2));
}

#[test]
fn test_type_mismatches() {
    assert_eq!(
        run_err("B+ I\" S4"),
        EvalError::TypeMismatch {
            operator: "+",
            expected: "int",
            found: "string",
        }
    );
    assert_eq!(
        run_err("? I\" T F"),
        EvalError::TypeMismatch {
            operator: "?",
            expected: "bool",
            found: "int",
        }
    );
    assert_eq!(
        run_err("U- T"),
        EvalError::TypeMismatch {
            operator: "-",
            expected: "int",
            found: "bool",
        }
    );
    assert_eq!(
        run_err("B. S4 I\""),
        EvalError::TypeMismatch {
            operator: ".",
            expected: "string",
            found: "int",
        }
    );
    assert!(matches!(
        run_err("B= L# v# I\""),
        EvalError::TypeMismatch { operator: "=", found: "closure", .. }
    ));
}

#[test]
fn test_expected_closure() {
    assert_eq!(
        run_err("B$ I\" I\""),
        EvalError::ExpectedClosure { found: "int" }
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run_err("B/ I\" I!"), EvalError::DivisionByZero { operator: "/" });
    assert_eq!(run_err("B% I\" I!"), EvalError::DivisionByZero { operator: "%" });
}

#[test]
fn test_slice_out_of_range() {
    assert_eq!(
        run_err("BT I& S4%34"),
        EvalError::SliceOutOfRange {
            count: BigInt::from(5),
            length: 4,
        }
    );
    assert!(matches!(
        run_err("BD U- I\" S4%34"),
        EvalError::SliceOutOfRange { length: 4, .. }
    ));
}

#[test]
fn test_int_to_string_rejects_negative() {
    assert!(matches!(run_err("U$ U- I\""), EvalError::Codec(_)));
}

// ══════════════════════════════════════════════════════════════════════════════
// Deep recursion
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_deep_recursion_is_heap_bounded() {
    let result = run(SUM_TO_3000);
    assert_eq!(result.value, int(4_501_500));
    assert_eq!(result.reductions, 9005);
}

#[test]
fn test_very_deep_recursion_with_memoization() {
    let result = run_with(SUM_TO_100000, EvalConfig::unlimited());
    assert_eq!(result.value, int(5_000_050_000));
    assert_eq!(result.reductions, 300_005);
}

#[test]
fn test_deferred_accumulator_without_memoization() {
    let result = run_with(ACCUMULATE_20000, EvalConfig::unlimited().with_memoize(false));
    assert_eq!(result.value, int(200_010_000));
    assert_eq!(result.reductions, 80_006);
}

#[test]
fn test_deferred_accumulator_with_memoization() {
    let result = run_with(ACCUMULATE_20000, EvalConfig::unlimited());
    assert_eq!(result.value, int(200_010_000));
    assert_eq!(result.reductions, 80_006);
}

#[test]
fn test_language_self_check() {
    let result = run(LANGUAGE_TEST);
    assert_eq!(
        result.value,
        Value::from("Self-check OK, send `solve language_test 4w3s0m3` to claim points for it")
    );
    assert_eq!(result.reductions, 5);
}

// ══════════════════════════════════════════════════════════════════════════════
// Trace
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_trace_records_each_step() {
    let traced = run_with("B$ L# v# I$", EvalConfig::default().with_trace(true));
    assert_eq!(
        traced.trace,
        vec![
            "[0] ($ (λ v2 v2) 3)".to_string(),
            "[0] (λ v2 v2)".to_string(),
            "[1] v2".to_string(),
            "[0] 3".to_string(),
        ]
    );
    assert!(run("B$ L# v# I$").trace.is_empty());
}

#[test]
fn test_evaluation_determinism_100_iterations() {
    let first = run(FACTORIAL_3);
    for i in 0..100 {
        let again = run(FACTORIAL_3);
        assert_eq!(first.value, again.value, "Determinism failure at iteration {i}");
        assert_eq!(first.reductions, again.reductions);
    }
}
