use std::fs::{self};

use std::thread;

use numfields::{
    Formula, FormulaError, Number, Value,
    ast::Expr,
    error::{EvalError, ParseError, ScanError},
    generate_sequence,
    interpreter::{evaluator::Context, parser::MAX_NESTING_DEPTH},
    is_valid_formula, parse, scan,
    sequence::{DEFAULT_LENGTH, DEFAULT_SEED},
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blocks(&content, "formula").into_iter().enumerate() {
            count += 1;
            for line in code.lines().filter(|l| !l.trim().is_empty()) {
                assert!(is_valid_formula(line),
                        "formula example {} in {:?} is not valid:\n{}",
                        i + 1,
                        path,
                        line);
            }
        }

        for (i, code) in extract_blocks(&content, "invalid").into_iter().enumerate() {
            count += 1;
            for line in code.lines().filter(|l| !l.trim().is_empty()) {
                assert!(!is_valid_formula(line),
                        "invalid example {} in {:?} was accepted:\n{}",
                        i + 1,
                        path,
                        line);
            }
        }

        for (i, code) in extract_blocks(&content, "sequence").into_iter().enumerate() {
            count += 1;
            let example = SequenceExample::from_block(&code);
            match generate_sequence(&example.formula, &example.seed, example.length) {
                Ok(terms) => assert_eq!(terms,
                                        example.output,
                                        "sequence example {} in {:?} produced the wrong terms:\n{}",
                                        i + 1,
                                        path,
                                        code),
                Err(e) => panic!("sequence example {} in {:?} failed:\n{}\nError: {:?}",
                                 i + 1,
                                 path,
                                 code,
                                 e),
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str, tag: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();
    let opening = format!("```{tag}");

    for line in content.lines() {
        let trimmed = line.trim_start();
        if !inside && trimmed.trim_end() == opening {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// A ```sequence block: `key: value` lines, `seed` and `length` optional.
struct SequenceExample {
    formula: String,
    seed:    Vec<Number>,
    length:  usize,
    output:  Vec<Number>,
}

impl SequenceExample {
    fn from_block(block: &str) -> Self {
        let mut example = Self { formula: String::new(),
                                 seed:    DEFAULT_SEED.to_vec(),
                                 length:  DEFAULT_LENGTH,
                                 output:  Vec::new(), };

        for line in block.lines().filter(|l| !l.trim().is_empty()) {
            let (key, value) =
                line.split_once(':').unwrap_or_else(|| panic!("malformed example line: {line}"));
            let value = value.trim();
            match key.trim() {
                "formula" => example.formula = value.to_string(),
                "seed" => example.seed = numbers(value),
                "length" => example.length = value.parse().unwrap(),
                "output" => example.output = numbers(value),
                other => panic!("unknown key '{other}' in sequence example"),
            }
        }

        example
    }
}

fn numbers(list: &str) -> Vec<Number> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().unwrap_or_else(|e| panic!("bad number '{s}': {e}")))
        .collect()
}

fn integers(values: &[i64]) -> Vec<Number> {
    values.iter().copied().map(Number::Integer).collect()
}

fn eval(src: &str) -> Result<Value, FormulaError> {
    eval_in(&mut Context::new(), src)
}

fn eval_in(context: &mut Context, src: &str) -> Result<Value, FormulaError> {
    Ok(Formula::parse(src)?.evaluate(context)?)
}

fn assert_valid(src: &str) {
    if let Err(e) = Formula::parse(src) {
        panic!("Formula '{src}' was rejected: {e}");
    }
    assert!(is_valid_formula(src));
}

fn assert_invalid(src: &str) {
    if Formula::parse(src).is_ok() {
        panic!("Formula '{src}' parsed but was expected to be rejected")
    }
    assert!(!is_valid_formula(src));
}

#[test]
fn operator_precedence() {
    assert_eq!(eval("2+3*4").unwrap(), Value::from(14));
    assert_eq!(eval("2^3^2").unwrap(), Value::from(64));
    assert_eq!(eval("2*3^2").unwrap(), Value::from(18));
    assert_eq!(eval("8/2/2").unwrap(), Value::from(2.0));
}

#[test]
fn variables_default_to_zero() {
    assert_eq!(eval("x+1").unwrap(), Value::from(1));
}

#[test]
fn assignment_chains_bind_every_name() {
    let mut context = Context::new();

    assert_eq!(eval_in(&mut context, "x = y = 3").unwrap(), Value::from(3));
    assert_eq!(context.get_variable("x"), Some(&Value::from(3)));
    assert_eq!(context.get_variable("y"), Some(&Value::from(3)));
}

#[test]
fn fibonacci_history() {
    assert_eq!(generate_sequence("history[n-1]+history[n-2]", &integers(&[0, 1]), 6).unwrap(),
               integers(&[0, 1, 1, 2, 3, 5]));
}

#[test]
fn out_of_range_read_is_zero() {
    let mut context = Context::new().with_variable("a", integers(&[1, 2]));

    assert_eq!(eval_in(&mut context, "a[5]").unwrap(), Value::from(0));
}

#[test]
fn malformed_input() {
    assert!(matches!(parse(&scan("1+").unwrap()), Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(scan("@"), Err(ScanError { character: '@', .. })));
    assert_invalid("1+");
    assert_invalid("@");
}

#[test]
fn grammar_gaps_are_rejected() {
    assert_invalid("-5");
    assert_invalid("x = -1");
    assert_invalid("+1");
    assert_invalid("1,2");
    assert_invalid("f(1,)");
    assert_invalid("a[]");
    assert_invalid("[1, 2");
    assert_invalid("((1)");
}

#[test]
fn well_formed_but_failing_formulas_are_valid() {
    assert_valid("[1](2)");
    assert_valid("5[0]");
    assert_valid("history[0.5]");

    assert!(matches!(eval("[1](2)"), Err(FormulaError::Eval(EvalError::NotCallable { .. }))));
    assert!(matches!(eval("5[0]"), Err(FormulaError::Eval(EvalError::NotIndexable { .. }))));
}

#[test]
fn multiline_formulas_report_lines() {
    assert_valid("history[n-1]\n+\nhistory[n-2]");
    assert_eq!(scan("1 +\n\n$"), Err(ScanError { character: '$', line: 3 }));
    assert_eq!(parse(&scan("(1\n+ 2").unwrap()),
               Err(ParseError::ExpectedDelimiter { expected: "')' after grouping expression",
                                                   found:    "end of input".to_string(),
                                                   line:     2, }));
}

#[test]
fn division_by_zero_is_ieee() {
    assert_eq!(eval("1/0").unwrap(), Value::from(f64::INFINITY));
    assert_eq!(eval("0-1/0").unwrap(), Value::from(f64::NEG_INFINITY));
    assert_eq!(eval("0/0").unwrap(), Value::from(f64::NAN));
    assert_eq!(generate_sequence("1/n", &[], 2).unwrap(), vec![Number::real(f64::INFINITY),
                                                               Number::real(1.0)]);
}

#[test]
fn powers_with_real_and_negative_exponents() {
    assert_eq!(eval("4^0.5").unwrap(), Value::from(2.0));
    assert_eq!(eval("2^(0-1)").unwrap(), Value::from(0.5));
    assert_eq!(eval("2^62*4").unwrap(), Value::from(2f64.powi(64)));
}

#[test]
fn history_writes_are_part_of_the_result() {
    assert_eq!(generate_sequence("history[n-1] = history[n-1] * 10", &integers(&[1]), 3).unwrap(),
               integers(&[10, 100, 100]));
}

#[test]
fn geometric_growth_with_real_seed() {
    let terms = generate_sequence("history[n-1] * 1.5", &[Number::real(2.0)], 4).unwrap();

    assert_eq!(terms,
               vec![Number::real(2.0), Number::real(3.0), Number::real(4.5), Number::real(6.75)]);
}

#[test]
fn formula_from_file() {
    let source = fs::read_to_string("tests/tribonacci.formula").expect("missing file");

    assert_valid(&source);
    assert_eq!(generate_sequence(&source, &integers(&[0, 0, 1]), 8).unwrap(),
               integers(&[0, 0, 1, 1, 2, 4, 7, 13]));
}

fn assert_too_deep(src: &str) {
    assert!(!is_valid_formula(src));
    assert!(matches!(generate_sequence(src, &[], 3),
                     Err(FormulaError::Parse(ParseError::NestingTooDeep { .. }))));
}

#[test]
fn long_chains_are_rejected_not_overflowed() {
    assert_too_deep(&format!("1{}", "+1".repeat(10_000)));
    assert_too_deep(&format!("2{}", "*2".repeat(10_000)));
    assert_too_deep(&format!("a{}", "[0]".repeat(10_000)));
    assert_too_deep(&format!("sum{}", "()".repeat(10_000)));
    assert_too_deep(&format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000)));
}

#[test]
fn chains_up_to_the_limit_evaluate() {
    let ones = format!("1{}", "+1".repeat(MAX_NESTING_DEPTH - 1));

    assert_valid(&ones);
    assert_eq!(generate_sequence(&ones, &[], 2).unwrap(),
               integers(&[MAX_NESTING_DEPTH as i64, MAX_NESTING_DEPTH as i64]));

    let lookups = format!("history{}", "[0]".repeat(MAX_NESTING_DEPTH - 1));
    assert_valid(&lookups);
    assert!(eval(&lookups).is_err());
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn parsed_formulas_are_shareable_across_threads() {
    assert_send_sync::<Expr>();
    assert_send_sync::<Formula>();

    let formula = Formula::parse("history[n-1] + history[n-2] + n").unwrap();
    let expected = formula.generate(DEFAULT_SEED, 30).unwrap();

    thread::scope(|scope| {
        let workers = (0..4).map(|_| scope.spawn(|| formula.generate(DEFAULT_SEED, 30)))
                            .collect::<Vec<_>>();

        for worker in workers {
            assert_eq!(worker.join().unwrap().as_ref(), Ok(&expected));
        }
    });
}
